pub mod command;
pub mod dispatch;
mod error;
pub mod fs;
pub mod path;

#[cfg(test)]
mod test_utils;

pub use command::{
    Command, CommandArgs, DeleteArgs, ExistsArgs, Factory, ListPathsArgs,
    MkDirsArgs, Payload, Registry, RenameArgs, Reply, SendProgress,
    SetTimesArgs, ENVELOPE_FIELD_COUNT,
};
pub use dispatch::{Dispatcher, DispatcherBuilder, Namespaces};
pub use error::{CommandError, CorruptReason, DecodeError, RegistryError};
pub use fs::{ExecutionContext, LocalFileSystem, UNCHANGED_TIME};
pub use path::{PathError, PathValue};
