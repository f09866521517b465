use super::{envelope::ENVELOPE_FIELD_COUNT, payload::out_of_range, Payload, Reply};
use crate::{error::DecodeError, fs::ExecutionContext, path::PathValue};
use serde::{Deserialize, Serialize};
use yonder_wire::{FieldReader, FieldWriter, RawReader, RawWriter};

const RECURSIVE_FIELD: u8 = ENVELOPE_FIELD_COUNT;

#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq, Eq)]
pub struct DeleteArgs {
    /// Whether a non-empty directory may be removed along with its contents
    pub recursive: bool,
}

impl Payload for DeleteArgs {
    const TYPE_TAG: u16 = 2;
    const EXTRA_FIELD_COUNT: u8 = 1;

    type Output = bool;

    fn encode_raw(&self, writer: &mut RawWriter) {
        writer.write_bool(self.recursive);
    }

    fn decode_raw(reader: &mut RawReader) -> Result<Self, DecodeError> {
        Ok(Self {
            recursive: reader.read_bool()?,
        })
    }

    fn write_field<W: FieldWriter + ?Sized>(
        &self,
        writer: &mut W,
        id: u8,
    ) -> bool {
        match id {
            RECURSIVE_FIELD => writer.write_bool(id, self.recursive),
            _ => true,
        }
    }

    fn read_field<R: FieldReader + ?Sized>(
        &mut self,
        reader: &mut R,
        id: u8,
    ) -> Result<(), DecodeError> {
        match id {
            RECURSIVE_FIELD => self.recursive = reader.read_bool(id)?,
            _ => return Err(out_of_range::<Self>(id)),
        }

        Ok(())
    }

    fn execute<C: ExecutionContext + ?Sized>(
        &self,
        path: &PathValue,
        ctx: &C,
    ) -> Result<Self::Output, C::Error> {
        ctx.delete(path, self.recursive)
    }

    fn into_reply(output: Self::Output) -> Reply {
        Reply::Deleted(output)
    }
}
