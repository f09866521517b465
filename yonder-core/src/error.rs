use crate::path::PathError;
use derive_more::Display;
use yonder_derive::Error;
use yonder_wire::{FieldError, RawError};

/// Why a sequence of bytes could not be turned back into a command
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum CorruptReason {
    #[display(fmt = "Raw codec: {}", _0)]
    Raw(RawError),

    #[display(fmt = "Field codec: {}", _0)]
    Field(FieldError),

    #[display(fmt = "Field {} outside of {} declared fields", id, field_count)]
    FieldOutOfRange { id: u8, field_count: u8 },

    #[display(fmt = "Expected {} fields, but only {} were sent", expected, actual)]
    MissingFields { expected: u8, actual: u8 },

    #[display(fmt = "Invalid path: {}", _0)]
    InvalidPath(PathError),
}

impl std::error::Error for CorruptReason {}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Malformed or truncated bytes, or a field id outside of the declared
    /// range of the command
    CorruptCommand(#[source] CorruptReason),

    /// No factory registered for the type tag
    UnknownTypeTag(u16),
}

impl From<CorruptReason> for DecodeError {
    fn from(x: CorruptReason) -> Self {
        Self::CorruptCommand(x)
    }
}

impl From<RawError> for DecodeError {
    fn from(x: RawError) -> Self {
        Self::CorruptCommand(CorruptReason::Raw(x))
    }
}

impl From<FieldError> for DecodeError {
    fn from(x: FieldError) -> Self {
        Self::CorruptCommand(CorruptReason::Field(x))
    }
}

impl From<PathError> for DecodeError {
    fn from(x: PathError) -> Self {
        Self::CorruptCommand(CorruptReason::InvalidPath(x))
    }
}

/// Failure anywhere along decoding, namespace resolution and execution of
/// a command, where `E` is the error of the execution context
#[derive(Debug, Error)]
pub enum CommandError<E: std::error::Error + 'static> {
    Decode(#[source] DecodeError),

    /// No execution context hosts the namespace; `None` is the default one
    UnknownNamespace(Option<String>),

    /// Passed through from the execution context untouched
    Execution(#[source] E),
}

impl<E: std::error::Error + 'static> From<DecodeError> for CommandError<E> {
    fn from(x: DecodeError) -> Self {
        Self::Decode(x)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    DuplicateTypeTag(u16),

    /// The factory produced a command with a different tag than the one it
    /// was registered under
    TypeTagMismatch { registered: u16, produced: u16 },
}
