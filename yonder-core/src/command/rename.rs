use super::{envelope::ENVELOPE_FIELD_COUNT, payload::out_of_range, Payload, Reply};
use crate::{error::DecodeError, fs::ExecutionContext, path::PathValue};
use serde::{Deserialize, Serialize};
use yonder_wire::{FieldReader, FieldWriter, RawReader, RawWriter};

const DESTINATION_FIELD: u8 = ENVELOPE_FIELD_COUNT;

/// Moves the command's path to `destination`
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq, Eq)]
pub struct RenameArgs {
    pub destination: PathValue,
}

impl Payload for RenameArgs {
    const TYPE_TAG: u16 = 9;
    const EXTRA_FIELD_COUNT: u8 = 1;

    type Output = ();

    fn encode_raw(&self, writer: &mut RawWriter) {
        writer.write_str_seq(self.destination.segments());
    }

    fn decode_raw(reader: &mut RawReader) -> Result<Self, DecodeError> {
        Ok(Self {
            destination: PathValue::from_segments(reader.read_str_seq()?)?,
        })
    }

    fn write_field<W: FieldWriter + ?Sized>(
        &self,
        writer: &mut W,
        id: u8,
    ) -> bool {
        match id {
            DESTINATION_FIELD => {
                writer.write_str_seq(id, self.destination.segments())
            }
            _ => true,
        }
    }

    fn read_field<R: FieldReader + ?Sized>(
        &mut self,
        reader: &mut R,
        id: u8,
    ) -> Result<(), DecodeError> {
        match id {
            DESTINATION_FIELD => {
                self.destination =
                    PathValue::from_segments(reader.read_str_seq(id)?)?
            }
            _ => return Err(out_of_range::<Self>(id)),
        }

        Ok(())
    }

    fn execute<C: ExecutionContext + ?Sized>(
        &self,
        path: &PathValue,
        ctx: &C,
    ) -> Result<Self::Output, C::Error> {
        ctx.rename(path, &self.destination)
    }

    fn into_reply(_: Self::Output) -> Reply {
        Reply::Done
    }
}
