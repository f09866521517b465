//! Typed commands for operating on a remote file system.
//!
//! A [`Command`] pairs a [`PathValue`] (and optional namespace) with the
//! arguments of one operation. Commands travel either as a compact raw
//! encoding or as a field-tagged encoding that can be written a field at a
//! time into a writer with limited room, and are executed on the receiving
//! side by a [`Dispatcher`] against an [`ExecutionContext`].

pub use yonder_core::{
    command, dispatch, fs, path, Command, CommandArgs, CommandError,
    CorruptReason, DecodeError, DeleteArgs, Dispatcher, DispatcherBuilder,
    ExecutionContext, ExistsArgs, Factory, ListPathsArgs, LocalFileSystem,
    MkDirsArgs, Namespaces, PathError, PathValue, Payload, Registry,
    RegistryError, RenameArgs, Reply, SendProgress, SetTimesArgs,
    ENVELOPE_FIELD_COUNT, UNCHANGED_TIME,
};

/// Codecs and their configuration
pub mod wire {
    pub use yonder_wire::*;
}
