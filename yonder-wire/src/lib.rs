mod config;
pub mod field;
pub mod raw;

pub mod constants {
    /// Default number of bytes a buffered field writer can hold before it
    /// reports itself as full
    pub const DEFAULT_MAX_BUFFER_SIZE: usize = 4096;

    /// Default maximum length (in bytes) of any decoded string
    pub const DEFAULT_MAX_STRING_LEN: usize = 65535;

    /// Default maximum number of elements in any decoded sequence
    pub const DEFAULT_MAX_PATH_SEGMENTS: usize = 1024;
}

pub use config::{WireConfig, WireConfigBuilder};
pub use field::{
    BufferedFieldWriter, FieldError, FieldHeader, FieldKind, FieldReader,
    FieldWriter, SliceFieldReader, FRAME_OVERHEAD,
};
pub use raw::{RawError, RawReader, RawWriter};
