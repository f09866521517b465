mod local;

pub use local::LocalFileSystem;

use crate::path::PathValue;
use std::collections::HashSet;

/// Timestamp value meaning "leave this time as it is"
pub const UNCHANGED_TIME: i64 = -1;

/// The file-system engine a command is executed against
///
/// Commands only ever delegate to these operations; whatever error an
/// operation produces is handed back to the caller of the command as is.
/// Implementations are responsible for their own synchronization, as
/// unrelated commands may be executed concurrently.
pub trait ExecutionContext {
    type Error: std::error::Error + 'static;

    /// Direct children of `path`
    fn list_children(
        &self,
        path: &PathValue,
    ) -> Result<HashSet<PathValue>, Self::Error>;

    /// Applies access & modification times, given in milliseconds since the
    /// unix epoch, where [`UNCHANGED_TIME`] leaves that time untouched
    fn set_times(
        &self,
        path: &PathValue,
        access_time: i64,
        modification_time: i64,
    ) -> Result<(), Self::Error>;

    fn exists(&self, path: &PathValue) -> Result<bool, Self::Error>;

    /// Removes `path`, returning false if there was nothing to remove
    fn delete(
        &self,
        path: &PathValue,
        recursive: bool,
    ) -> Result<bool, Self::Error>;

    fn rename(
        &self,
        from: &PathValue,
        to: &PathValue,
    ) -> Result<(), Self::Error>;

    /// Creates `path` along with any missing parents
    fn mkdirs(&self, path: &PathValue) -> Result<(), Self::Error>;
}
