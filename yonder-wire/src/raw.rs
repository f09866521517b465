use crate::WireConfig;
use bytes::{Buf, BufMut, BytesMut};
use yonder_derive::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RawError {
    /// The input ended before a complete value could be read
    UnexpectedEof { needed: usize, remaining: usize },

    /// A string was not valid utf-8
    InvalidUtf8,

    /// A bool or presence byte was something other than 0 or 1
    InvalidFlag(u8),

    /// A string length exceeded the configured maximum
    StringTooLong { len: usize, max: usize },

    /// A sequence length exceeded the configured maximum
    SequenceTooLong { len: usize, max: usize },

    /// Bytes remained after the final value was read
    TrailingBytes(usize),
}

/// Dense, order-dependent writer of primitive values
///
/// Integers are big-endian, strings and sequences are prefixed with a `u32`
/// length, and optional strings with a presence byte.
#[derive(Debug, Default)]
pub struct RawWriter {
    buf: BytesMut,
}

impl RawWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buf.put_u16(value);
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.put_u32(value);
    }

    pub fn write_i64(&mut self, value: i64) {
        self.buf.put_i64(value);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buf.put_u8(value as u8);
    }

    pub fn write_str(&mut self, value: &str) {
        self.write_len(value.len());
        self.buf.put_slice(value.as_bytes());
    }

    pub fn write_opt_str(&mut self, value: Option<&str>) {
        match value {
            Some(s) => {
                self.write_bool(true);
                self.write_str(s);
            }
            None => self.write_bool(false),
        }
    }

    /// Appends bytes as they are, without a length prefix
    pub fn write_slice(&mut self, bytes: &[u8]) {
        self.buf.put_slice(bytes);
    }

    pub fn write_str_seq<S: AsRef<str>>(&mut self, values: &[S]) {
        self.write_len(values.len());
        for value in values {
            self.write_str(value.as_ref());
        }
    }

    /// Number of bytes written so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..]
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf.to_vec()
    }

    // Lengths beyond u32::MAX are not representable; readers reject anything
    // past their configured limits long before that
    fn write_len(&mut self, len: usize) {
        self.buf.put_u32(len as u32);
    }
}

/// Reader over a byte slice produced by a [`RawWriter`]
#[derive(Debug, Clone)]
pub struct RawReader<'a> {
    buf: &'a [u8],
    max_string_len: usize,
    max_sequence_len: usize,
}

impl<'a> RawReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_config(buf, &WireConfig::default())
    }

    pub fn with_config(buf: &'a [u8], config: &WireConfig) -> Self {
        Self {
            buf,
            max_string_len: config.max_string_len,
            max_sequence_len: config.max_path_segments,
        }
    }

    /// Number of bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    pub fn read_u8(&mut self) -> Result<u8, RawError> {
        self.ensure(1)?;
        Ok(self.buf.get_u8())
    }

    pub fn read_u16(&mut self) -> Result<u16, RawError> {
        self.ensure(2)?;
        Ok(self.buf.get_u16())
    }

    pub fn read_u32(&mut self) -> Result<u32, RawError> {
        self.ensure(4)?;
        Ok(self.buf.get_u32())
    }

    pub fn read_i64(&mut self) -> Result<i64, RawError> {
        self.ensure(8)?;
        Ok(self.buf.get_i64())
    }

    pub fn read_bool(&mut self) -> Result<bool, RawError> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            x => Err(RawError::InvalidFlag(x)),
        }
    }

    pub fn read_str(&mut self) -> Result<String, RawError> {
        let len = self.read_len()?;
        if len > self.max_string_len {
            return Err(RawError::StringTooLong {
                len,
                max: self.max_string_len,
            });
        }

        self.ensure(len)?;
        let (head, tail) = self.buf.split_at(len);
        let s = std::str::from_utf8(head).map_err(|_| RawError::InvalidUtf8)?;
        self.buf = tail;

        Ok(s.to_string())
    }

    pub fn read_opt_str(&mut self) -> Result<Option<String>, RawError> {
        if self.read_bool()? {
            self.read_str().map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn read_str_seq(&mut self) -> Result<Vec<String>, RawError> {
        let len = self.read_len()?;
        if len > self.max_sequence_len {
            return Err(RawError::SequenceTooLong {
                len,
                max: self.max_sequence_len,
            });
        }

        let mut values = Vec::with_capacity(len);
        for _ in 0..len {
            values.push(self.read_str()?);
        }

        Ok(values)
    }

    /// Advances past `n` bytes without interpreting them
    pub fn skip(&mut self, n: usize) -> Result<(), RawError> {
        self.ensure(n)?;
        self.buf.advance(n);
        Ok(())
    }

    /// Splits off the next `n` bytes as a reader of their own, with the same
    /// limits, advancing this reader past them
    pub fn split_to(&mut self, n: usize) -> Result<RawReader<'a>, RawError> {
        self.ensure(n)?;
        let (head, tail) = self.buf.split_at(n);
        self.buf = tail;

        Ok(RawReader {
            buf: head,
            max_string_len: self.max_string_len,
            max_sequence_len: self.max_sequence_len,
        })
    }

    /// Consumes the reader, failing if any bytes were left unread
    pub fn finish(self) -> Result<(), RawError> {
        match self.buf.remaining() {
            0 => Ok(()),
            n => Err(RawError::TrailingBytes(n)),
        }
    }

    fn read_len(&mut self) -> Result<usize, RawError> {
        Ok(self.read_u32()? as usize)
    }

    fn ensure(&self, needed: usize) -> Result<(), RawError> {
        let remaining = self.buf.remaining();
        if remaining < needed {
            Err(RawError::UnexpectedEof { needed, remaining })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_should_encode_integers_big_endian() {
        let mut w = RawWriter::new();
        w.write_u16(0x0102);
        w.write_i64(-2);

        assert_eq!(
            w.as_slice(),
            &[0x01, 0x02, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe]
        );
    }

    #[test]
    fn writer_should_prefix_strings_with_length() {
        let mut w = RawWriter::new();
        w.write_str("ab");

        assert_eq!(w.as_slice(), &[0, 0, 0, 2, b'a', b'b']);
    }

    #[test]
    fn writer_should_mark_absent_optional_string_with_single_byte() {
        let mut w = RawWriter::new();
        w.write_opt_str(None);

        assert_eq!(w.as_slice(), &[0]);
    }

    #[test]
    fn reader_should_read_values_in_written_order() {
        let mut w = RawWriter::new();
        w.write_u8(7);
        w.write_bool(true);
        w.write_opt_str(Some("ns"));
        w.write_str_seq(&["data", "in"]);
        w.write_i64(i64::min_value());
        let bytes = w.into_vec();

        let mut r = RawReader::new(&bytes);
        assert_eq!(r.read_u8().unwrap(), 7);
        assert_eq!(r.read_bool().unwrap(), true);
        assert_eq!(r.read_opt_str().unwrap(), Some(String::from("ns")));
        assert_eq!(
            r.read_str_seq().unwrap(),
            vec![String::from("data"), String::from("in")]
        );
        assert_eq!(r.read_i64().unwrap(), i64::min_value());
        r.finish().unwrap();
    }

    #[test]
    fn reader_should_fail_if_input_is_truncated() {
        let mut r = RawReader::new(&[0, 0, 0]);

        match r.read_i64() {
            Err(RawError::UnexpectedEof {
                needed: 8,
                remaining: 3,
            }) => (),
            x => panic!("Unexpected result: {:?}", x),
        }
    }

    #[test]
    fn reader_should_fail_if_string_is_shorter_than_its_length() {
        let mut r = RawReader::new(&[0, 0, 0, 5, b'a']);

        match r.read_str() {
            Err(RawError::UnexpectedEof { .. }) => (),
            x => panic!("Unexpected result: {:?}", x),
        }
    }

    #[test]
    fn reader_should_fail_on_invalid_bool_byte() {
        let mut r = RawReader::new(&[2]);

        match r.read_bool() {
            Err(RawError::InvalidFlag(2)) => (),
            x => panic!("Unexpected result: {:?}", x),
        }
    }

    #[test]
    fn reader_should_fail_on_invalid_utf8() {
        let mut r = RawReader::new(&[0, 0, 0, 1, 0xff]);

        match r.read_str() {
            Err(RawError::InvalidUtf8) => (),
            x => panic!("Unexpected result: {:?}", x),
        }
    }

    #[test]
    fn reader_should_enforce_configured_string_limit() {
        let config = WireConfig {
            max_string_len: 1,
            ..WireConfig::default()
        };
        let mut r = RawReader::with_config(&[0, 0, 0, 2, b'a', b'b'], &config);

        match r.read_str() {
            Err(RawError::StringTooLong { len: 2, max: 1 }) => (),
            x => panic!("Unexpected result: {:?}", x),
        }
    }

    #[test]
    fn reader_should_enforce_configured_sequence_limit() {
        let config = WireConfig {
            max_path_segments: 0,
            ..WireConfig::default()
        };
        let mut r = RawReader::with_config(&[0, 0, 0, 1], &config);

        match r.read_str_seq() {
            Err(RawError::SequenceTooLong { len: 1, max: 0 }) => (),
            x => panic!("Unexpected result: {:?}", x),
        }
    }

    #[test]
    fn finish_should_fail_if_bytes_remain() {
        let r = RawReader::new(&[1, 2]);

        match r.finish() {
            Err(RawError::TrailingBytes(2)) => (),
            x => panic!("Unexpected result: {:?}", x),
        }
    }

    #[test]
    fn split_to_should_bound_reader_to_given_bytes() {
        let mut r = RawReader::new(&[0, 7, 1, 2, 3]);
        let mut head = r.split_to(2).unwrap();

        assert_eq!(head.read_u16().unwrap(), 7);
        assert!(head.read_u8().is_err(), "Read past split");
        assert_eq!(r.remaining(), 3);
    }

    #[test]
    fn split_to_should_fail_if_input_is_shorter() {
        let mut r = RawReader::new(&[1, 2]);

        match r.split_to(3) {
            Err(RawError::UnexpectedEof {
                needed: 3,
                remaining: 2,
            }) => (),
            x => panic!("Unexpected result: {:?}", x),
        }
    }
}
