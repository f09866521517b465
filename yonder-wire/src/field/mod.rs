mod reader;
mod writer;

pub use reader::SliceFieldReader;
pub use writer::BufferedFieldWriter;

use crate::raw::{RawError, RawWriter};
use strum_macros::AsRefStr;
use yonder_derive::Error;

/// Self-described type of a single field on the wire
#[derive(Copy, Clone, Debug, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum FieldKind {
    Bool,
    I64,
    Str,
    OptStr,
    StrSeq,
}

impl FieldKind {
    pub fn to_u8(self) -> u8 {
        match self {
            Self::Bool => 0,
            Self::I64 => 1,
            Self::Str => 2,
            Self::OptStr => 3,
            Self::StrSeq => 4,
        }
    }

    pub fn from_u8(x: u8) -> Option<Self> {
        match x {
            0 => Some(Self::Bool),
            1 => Some(Self::I64),
            2 => Some(Self::Str),
            3 => Some(Self::OptStr),
            4 => Some(Self::StrSeq),
            _ => None,
        }
    }
}

/// Leading frame of a field-tagged message
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FieldHeader {
    /// Identifies which kind of message follows
    pub type_tag: u16,

    /// Total number of fields the sender wrote after the header
    pub field_count: u8,
}

impl FieldHeader {
    /// Size of an encoded header in bytes
    pub const SIZE: usize = 3;

    pub(crate) fn encode(&self) -> RawWriter {
        let mut w = RawWriter::with_capacity(Self::SIZE);
        w.write_u16(self.type_tag);
        w.write_u8(self.field_count);
        w
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    Raw(#[source] RawError),
    UnknownKind(u8),
    IdMismatch { expected: u8, actual: u8 },
    KindMismatch {
        id: u8,
        expected: FieldKind,
        actual: FieldKind,
    },
    OutOfOrder { last: u8, requested: u8 },
    MissingHeader,
}

impl From<RawError> for FieldError {
    fn from(x: RawError) -> Self {
        Self::Raw(x)
    }
}

/// Destination for a field-tagged message that may not be able to accept an
/// entire message at once
///
/// Every write either commits the whole field and returns `true`, or leaves
/// the destination untouched and returns `false`, in which case the same
/// field must be written again later.
pub trait FieldWriter {
    fn write_header(&mut self, header: FieldHeader) -> bool;
    fn write_bool(&mut self, id: u8, value: bool) -> bool;
    fn write_i64(&mut self, id: u8, value: i64) -> bool;
    fn write_str(&mut self, id: u8, value: &str) -> bool;
    fn write_opt_str(&mut self, id: u8, value: Option<&str>) -> bool;
    fn write_str_seq(&mut self, id: u8, values: &[String]) -> bool;
}

/// Source of a field-tagged message; fields must be requested in ascending
/// id order
pub trait FieldReader {
    fn read_header(&mut self) -> Result<FieldHeader, FieldError>;
    fn read_bool(&mut self, id: u8) -> Result<bool, FieldError>;
    fn read_i64(&mut self, id: u8) -> Result<i64, FieldError>;
    fn read_str(&mut self, id: u8) -> Result<String, FieldError>;
    fn read_opt_str(&mut self, id: u8) -> Result<Option<String>, FieldError>;
    fn read_str_seq(&mut self, id: u8) -> Result<Vec<String>, FieldError>;

    /// Consumes the next field without interpreting it, returning its id
    fn skip_field(&mut self) -> Result<u8, FieldError>;
}

/// Bytes preceding the payload of every field: id, kind and payload length
pub const FRAME_OVERHEAD: usize = 6;

/// Frames a payload as id, kind, `u32` payload length, then the payload
///
/// The length lets a reader skip a field whose kind it does not know.
pub(crate) fn field_frame(id: u8, kind: FieldKind, payload: &[u8]) -> RawWriter {
    let mut w = RawWriter::with_capacity(FRAME_OVERHEAD + payload.len());
    w.write_u8(id);
    w.write_u8(kind.to_u8());
    w.write_u32(payload.len() as u32);
    w.write_slice(payload);
    w
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_kind_should_survive_conversion_to_and_from_u8() {
        for kind in &[
            FieldKind::Bool,
            FieldKind::I64,
            FieldKind::Str,
            FieldKind::OptStr,
            FieldKind::StrSeq,
        ] {
            assert_eq!(FieldKind::from_u8(kind.to_u8()), Some(*kind));
        }
    }

    #[test]
    fn field_kind_from_u8_should_reject_unknown_values() {
        assert_eq!(FieldKind::from_u8(200), None);
    }

    #[test]
    fn field_kind_should_have_snake_case_name() {
        assert_eq!(FieldKind::StrSeq.as_ref(), "str_seq");
    }

    #[test]
    fn field_frame_should_prefix_payload_with_its_length() {
        let frame = field_frame(2, FieldKind::Str, &[0, 0, 0, 1, b'x']);

        assert_eq!(frame.as_slice(), &[2, 2, 0, 0, 0, 5, 0, 0, 0, 1, b'x']);
        assert_eq!(frame.len(), FRAME_OVERHEAD + 5);
    }

    #[test]
    fn header_should_encode_to_fixed_size() {
        let header = FieldHeader {
            type_tag: 10,
            field_count: 4,
        };

        assert_eq!(header.encode().as_slice(), &[0, 10, 4]);
        assert_eq!(header.encode().len(), FieldHeader::SIZE);
    }

    #[test]
    fn field_error_should_report_raw_error_as_source() {
        use std::error::Error;

        let err = FieldError::from(RawError::InvalidUtf8);
        assert!(err.source().is_some(), "Missing source for {}", err);
        assert!(FieldError::MissingHeader.source().is_none());
    }
}
