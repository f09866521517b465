use super::{envelope::ENVELOPE_FIELD_COUNT, Reply};
use crate::{
    error::{CorruptReason, DecodeError},
    fs::ExecutionContext,
    path::PathValue,
};
use yonder_wire::{FieldReader, FieldWriter, RawReader, RawWriter};

/// Variant-specific part of a command: its extra fields, how they are
/// encoded by both codecs, and the operation it delegates to
///
/// Field ids handed to the field codec methods are absolute, so the first
/// extra field of every variant has id [`ENVELOPE_FIELD_COUNT`]. The defaults
/// describe a variant without extra fields.
pub trait Payload: Default + Sized {
    /// Wire identity of the variant; never changed or reused once released
    const TYPE_TAG: u16;

    /// Number of fields the variant adds after the envelope's
    const EXTRA_FIELD_COUNT: u8 = 0;

    type Output;

    fn encode_raw(&self, _writer: &mut RawWriter) {}

    fn decode_raw(_reader: &mut RawReader) -> Result<Self, DecodeError> {
        Ok(Self::default())
    }

    /// Writes the field with the given id, returning false if the writer
    /// could not take it yet
    fn write_field<W: FieldWriter + ?Sized>(
        &self,
        _writer: &mut W,
        _id: u8,
    ) -> bool {
        true
    }

    fn read_field<R: FieldReader + ?Sized>(
        &mut self,
        _reader: &mut R,
        id: u8,
    ) -> Result<(), DecodeError> {
        Err(out_of_range::<Self>(id))
    }

    fn execute<C: ExecutionContext + ?Sized>(
        &self,
        path: &PathValue,
        ctx: &C,
    ) -> Result<Self::Output, C::Error>;

    fn into_reply(output: Self::Output) -> Reply;
}

/// Error for a field id that the variant `P` does not declare
pub(crate) fn out_of_range<P: Payload>(id: u8) -> DecodeError {
    DecodeError::CorruptCommand(CorruptReason::FieldOutOfRange {
        id,
        field_count: ENVELOPE_FIELD_COUNT + P::EXTRA_FIELD_COUNT,
    })
}
