use super::{FieldError, FieldHeader, FieldKind, FieldReader};
use crate::{
    raw::{RawError, RawReader},
    WireConfig,
};

/// Field reader over the complete bytes of a received message
#[derive(Debug, Clone)]
pub struct SliceFieldReader<'a> {
    raw: RawReader<'a>,
    header_read: bool,
    last_id: Option<u8>,
}

impl<'a> SliceFieldReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_config(buf, &WireConfig::default())
    }

    pub fn with_config(buf: &'a [u8], config: &WireConfig) -> Self {
        Self {
            raw: RawReader::with_config(buf, config),
            header_read: false,
            last_id: None,
        }
    }

    /// Number of bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.raw.remaining()
    }

    /// Consumes the reader, failing if any bytes were left unread
    pub fn finish(self) -> Result<(), FieldError> {
        self.raw.finish().map_err(FieldError::from)
    }

    /// Reads the next frame, verifying that ids ascend, and returns its id,
    /// its kind byte and a reader over exactly its payload
    fn next_frame(&mut self) -> Result<(u8, u8, RawReader<'a>), FieldError> {
        if !self.header_read {
            return Err(FieldError::MissingHeader);
        }

        let id = self.raw.read_u8()?;
        if let Some(last) = self.last_id {
            if id <= last {
                return Err(FieldError::OutOfOrder {
                    last,
                    requested: id,
                });
            }
        }

        let kind = self.raw.read_u8()?;
        let len = self.raw.read_u32()? as usize;
        let payload = self.raw.split_to(len)?;

        self.last_id = Some(id);
        Ok((id, kind, payload))
    }

    fn expect_frame(
        &mut self,
        id: u8,
        expected: FieldKind,
    ) -> Result<RawReader<'a>, FieldError> {
        if let Some(last) = self.last_id {
            if id <= last {
                return Err(FieldError::OutOfOrder {
                    last,
                    requested: id,
                });
            }
        }

        let (actual_id, kind, payload) = self.next_frame()?;
        if actual_id != id {
            return Err(FieldError::IdMismatch {
                expected: id,
                actual: actual_id,
            });
        }

        let actual =
            FieldKind::from_u8(kind).ok_or(FieldError::UnknownKind(kind))?;
        if actual != expected {
            return Err(FieldError::KindMismatch {
                id,
                expected,
                actual,
            });
        }

        Ok(payload)
    }

    /// Reads the value of field `id` from its payload, which it must fill
    fn read_value<T, F>(
        &mut self,
        id: u8,
        kind: FieldKind,
        f: F,
    ) -> Result<T, FieldError>
    where
        F: FnOnce(&mut RawReader<'a>) -> Result<T, RawError>,
    {
        let mut payload = self.expect_frame(id, kind)?;
        let value = f(&mut payload)?;
        payload.finish()?;
        Ok(value)
    }
}

impl<'a> FieldReader for SliceFieldReader<'a> {
    fn read_header(&mut self) -> Result<FieldHeader, FieldError> {
        let type_tag = self.raw.read_u16()?;
        let field_count = self.raw.read_u8()?;

        self.header_read = true;
        self.last_id = None;

        Ok(FieldHeader {
            type_tag,
            field_count,
        })
    }

    fn read_bool(&mut self, id: u8) -> Result<bool, FieldError> {
        self.read_value(id, FieldKind::Bool, RawReader::read_bool)
    }

    fn read_i64(&mut self, id: u8) -> Result<i64, FieldError> {
        self.read_value(id, FieldKind::I64, RawReader::read_i64)
    }

    fn read_str(&mut self, id: u8) -> Result<String, FieldError> {
        self.read_value(id, FieldKind::Str, RawReader::read_str)
    }

    fn read_opt_str(&mut self, id: u8) -> Result<Option<String>, FieldError> {
        self.read_value(id, FieldKind::OptStr, RawReader::read_opt_str)
    }

    fn read_str_seq(&mut self, id: u8) -> Result<Vec<String>, FieldError> {
        self.read_value(id, FieldKind::StrSeq, RawReader::read_str_seq)
    }

    /// Skips by the framed length, so kinds unknown to this reader are
    /// skipped as well
    fn skip_field(&mut self) -> Result<u8, FieldError> {
        let (id, _, _) = self.next_frame()?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{BufferedFieldWriter, FieldWriter};

    fn header() -> FieldHeader {
        FieldHeader {
            type_tag: 7,
            field_count: 3,
        }
    }

    fn write_sample() -> Vec<u8> {
        let mut w = BufferedFieldWriter::new(1024);
        assert!(w.write_header(header()));
        assert!(w.write_opt_str(0, None));
        assert!(w.write_str_seq(1, &[String::from("a"), String::from("b")]));
        assert!(w.write_i64(2, -1));
        w.take_bytes()
    }

    #[test]
    fn read_should_return_fields_in_written_order() {
        let bytes = write_sample();
        let mut r = SliceFieldReader::new(&bytes);

        assert_eq!(r.read_header().unwrap(), header());
        assert_eq!(r.read_opt_str(0).unwrap(), None);
        assert_eq!(
            r.read_str_seq(1).unwrap(),
            vec![String::from("a"), String::from("b")]
        );
        assert_eq!(r.read_i64(2).unwrap(), -1);
        r.finish().unwrap();
    }

    #[test]
    fn read_should_fail_if_header_not_read_first() {
        let bytes = write_sample();
        let mut r = SliceFieldReader::new(&bytes);

        match r.read_opt_str(0) {
            Err(FieldError::MissingHeader) => (),
            x => panic!("Unexpected result: {:?}", x),
        }
    }

    #[test]
    fn read_should_fail_if_ids_do_not_ascend() {
        let bytes = write_sample();
        let mut r = SliceFieldReader::new(&bytes);
        r.read_header().unwrap();
        r.read_opt_str(0).unwrap();

        match r.read_opt_str(0) {
            Err(FieldError::OutOfOrder {
                last: 0,
                requested: 0,
            }) => (),
            x => panic!("Unexpected result: {:?}", x),
        }
    }

    #[test]
    fn read_should_fail_if_next_id_is_not_the_requested_one() {
        let bytes = write_sample();
        let mut r = SliceFieldReader::new(&bytes);
        r.read_header().unwrap();

        match r.read_opt_str(1) {
            Err(FieldError::IdMismatch {
                expected: 1,
                actual: 0,
            }) => (),
            x => panic!("Unexpected result: {:?}", x),
        }
    }

    #[test]
    fn read_should_fail_if_kind_differs() {
        let bytes = write_sample();
        let mut r = SliceFieldReader::new(&bytes);
        r.read_header().unwrap();

        match r.read_bool(0) {
            Err(FieldError::KindMismatch {
                id: 0,
                expected: FieldKind::Bool,
                actual: FieldKind::OptStr,
            }) => (),
            x => panic!("Unexpected result: {:?}", x),
        }
    }

    #[test]
    fn skip_field_should_skip_unknown_kind_by_length() {
        let mut r = SliceFieldReader::new(&[0, 1, 1, 0, 99, 0, 0, 0, 2, 0xab, 0xcd]);
        r.read_header().unwrap();

        assert_eq!(r.skip_field().unwrap(), 0);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn read_should_fail_on_unknown_kind_for_requested_id() {
        let mut r = SliceFieldReader::new(&[0, 1, 1, 0, 99, 0, 0, 0, 1, 0]);
        r.read_header().unwrap();

        match r.read_bool(0) {
            Err(FieldError::UnknownKind(99)) => (),
            x => panic!("Unexpected result: {:?}", x),
        }
    }

    #[test]
    fn read_should_fail_if_payload_length_disagrees_with_value() {
        // Bool field framed with a 2 byte payload
        let mut r = SliceFieldReader::new(&[0, 1, 1, 0, 0, 0, 0, 0, 2, 1, 0]);
        r.read_header().unwrap();

        match r.read_bool(0) {
            Err(FieldError::Raw(RawError::TrailingBytes(1))) => (),
            x => panic!("Unexpected result: {:?}", x),
        }
    }

    #[test]
    fn read_should_fail_if_field_is_truncated() {
        let mut bytes = write_sample();
        bytes.truncate(bytes.len() - 1);

        let mut r = SliceFieldReader::new(&bytes);
        r.read_header().unwrap();
        r.read_opt_str(0).unwrap();
        r.read_str_seq(1).unwrap();

        match r.read_i64(2) {
            Err(FieldError::Raw(_)) => (),
            x => panic!("Unexpected result: {:?}", x),
        }
    }

    #[test]
    fn skip_field_should_consume_each_kind() {
        let mut w = BufferedFieldWriter::new(1024);
        assert!(w.write_header(header()));
        assert!(w.write_bool(0, true));
        assert!(w.write_str(1, "skip me"));
        assert!(w.write_i64(2, 42));
        assert!(w.write_opt_str(3, Some("me too")));
        assert!(w.write_str_seq(4, &[String::from("x")]));
        let bytes = w.take_bytes();

        let mut r = SliceFieldReader::new(&bytes);
        r.read_header().unwrap();
        assert_eq!(r.skip_field().unwrap(), 0);
        assert_eq!(r.skip_field().unwrap(), 1);
        assert_eq!(r.read_i64(2).unwrap(), 42);
        assert_eq!(r.skip_field().unwrap(), 3);
        assert_eq!(r.skip_field().unwrap(), 4);
        assert_eq!(r.remaining(), 0);
    }
}
