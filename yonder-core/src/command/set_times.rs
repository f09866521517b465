use super::{envelope::ENVELOPE_FIELD_COUNT, payload::out_of_range, Payload, Reply};
use crate::{
    error::DecodeError,
    fs::{ExecutionContext, UNCHANGED_TIME},
    path::PathValue,
};
use serde::{Deserialize, Serialize};
use yonder_wire::{FieldReader, FieldWriter, RawReader, RawWriter};

const ACCESS_TIME_FIELD: u8 = ENVELOPE_FIELD_COUNT;
const MODIFICATION_TIME_FIELD: u8 = ENVELOPE_FIELD_COUNT + 1;

/// Sets access and modification times, in milliseconds since the unix epoch
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SetTimesArgs {
    pub access_time: i64,
    pub modification_time: i64,
}

impl Default for SetTimesArgs {
    fn default() -> Self {
        Self {
            access_time: UNCHANGED_TIME,
            modification_time: UNCHANGED_TIME,
        }
    }
}

impl Payload for SetTimesArgs {
    const TYPE_TAG: u16 = 10;
    const EXTRA_FIELD_COUNT: u8 = 2;

    type Output = ();

    fn encode_raw(&self, writer: &mut RawWriter) {
        writer.write_i64(self.access_time);
        writer.write_i64(self.modification_time);
    }

    fn decode_raw(reader: &mut RawReader) -> Result<Self, DecodeError> {
        Ok(Self {
            access_time: reader.read_i64()?,
            modification_time: reader.read_i64()?,
        })
    }

    fn write_field<W: FieldWriter + ?Sized>(
        &self,
        writer: &mut W,
        id: u8,
    ) -> bool {
        match id {
            ACCESS_TIME_FIELD => writer.write_i64(id, self.access_time),
            MODIFICATION_TIME_FIELD => {
                writer.write_i64(id, self.modification_time)
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
            ACCESS_TIME_FIELD => self.access_time = reader.read_i64(id)?,
            MODIFICATION_TIME_FIELD => {
                self.modification_time = reader.read_i64(id)?
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
        ctx.set_times(path, self.access_time, self.modification_time)
    }

    fn into_reply(_: Self::Output) -> Reply {
        Reply::Done
    }
}
