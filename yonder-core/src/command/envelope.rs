//! Fields shared by every command, encoded identically by both codecs
//! ahead of the variant's own fields.

use crate::{error::DecodeError, path::PathValue};
use yonder_wire::{FieldReader, FieldWriter, RawReader, RawWriter};

/// Number of fields every command starts with
pub const ENVELOPE_FIELD_COUNT: u8 = 2;

pub(crate) const NAMESPACE_FIELD: u8 = 0;
pub(crate) const PATH_FIELD: u8 = 1;

pub(crate) fn encode_raw(
    namespace: Option<&str>,
    path: &PathValue,
    writer: &mut RawWriter,
) {
    writer.write_opt_str(namespace);
    writer.write_str_seq(path.segments());
}

pub(crate) fn decode_raw(
    reader: &mut RawReader,
) -> Result<(Option<String>, PathValue), DecodeError> {
    let namespace = reader.read_opt_str()?;
    let path = PathValue::from_segments(reader.read_str_seq()?)?;
    Ok((namespace, path))
}

/// Writes one envelope field; `id` must be below [`ENVELOPE_FIELD_COUNT`]
pub(crate) fn write_field<W: FieldWriter + ?Sized>(
    namespace: Option<&str>,
    path: &PathValue,
    writer: &mut W,
    id: u8,
) -> bool {
    debug_assert!(id == NAMESPACE_FIELD || id == PATH_FIELD);
    match id {
        NAMESPACE_FIELD => writer.write_opt_str(id, namespace),
        _ => writer.write_str_seq(id, path.segments()),
    }
}

/// Reads one envelope field; `id` must be below [`ENVELOPE_FIELD_COUNT`]
pub(crate) fn read_field<R: FieldReader + ?Sized>(
    namespace: &mut Option<String>,
    path: &mut PathValue,
    reader: &mut R,
    id: u8,
) -> Result<(), DecodeError> {
    debug_assert!(id == NAMESPACE_FIELD || id == PATH_FIELD);
    match id {
        NAMESPACE_FIELD => *namespace = reader.read_opt_str(id)?,
        _ => *path = PathValue::from_segments(reader.read_str_seq(id)?)?,
    }

    Ok(())
}
