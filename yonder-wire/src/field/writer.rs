use super::{field_frame, FieldHeader, FieldKind, FieldWriter};
use crate::{constants, raw::RawWriter, WireConfig};
use bytes::{BufMut, BytesMut};
use log::{trace, warn};

/// Field writer backed by an outbound buffer of fixed capacity
///
/// Once the buffer cannot hold the next field, writes report `false` until
/// the buffered bytes are drained with [`BufferedFieldWriter::take_bytes`].
#[derive(Debug)]
pub struct BufferedFieldWriter {
    buf: BytesMut,
    capacity: usize,
}

impl BufferedFieldWriter {
    pub fn new(capacity: usize) -> Self {
        // Capacity is a logical limit; the allocation grows on demand
        let initial = capacity.min(constants::DEFAULT_MAX_BUFFER_SIZE);
        Self {
            buf: BytesMut::with_capacity(initial),
            capacity,
        }
    }

    pub fn with_config(config: &WireConfig) -> Self {
        Self::new(config.max_buffer_size)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of bytes currently buffered
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn remaining_capacity(&self) -> usize {
        self.capacity - self.buf.len()
    }

    /// Removes and returns everything buffered so far, freeing the full
    /// capacity for subsequent writes
    pub fn take_bytes(&mut self) -> Vec<u8> {
        self.buf.split().to_vec()
    }

    fn commit<D>(&mut self, frame: RawWriter, describe: D) -> bool
    where
        D: Fn() -> String,
    {
        let needed = frame.len();

        if needed > self.capacity {
            warn!(
                "{} needs {} bytes, larger than total capacity of {}",
                describe(),
                needed,
                self.capacity
            );
            return false;
        }

        if needed > self.remaining_capacity() {
            trace!(
                "{} needs {} bytes, only {} remaining",
                describe(),
                needed,
                self.remaining_capacity()
            );
            return false;
        }

        self.buf.put_slice(frame.as_slice());
        true
    }

    fn commit_field<F>(&mut self, id: u8, kind: FieldKind, f: F) -> bool
    where
        F: FnOnce(&mut RawWriter),
    {
        let mut payload = RawWriter::new();
        f(&mut payload);
        let frame = field_frame(id, kind, payload.as_slice());
        self.commit(frame, || format!("Field {} ({})", id, kind.as_ref()))
    }
}

impl FieldWriter for BufferedFieldWriter {
    fn write_header(&mut self, header: FieldHeader) -> bool {
        self.commit(header.encode(), || String::from("Header"))
    }

    fn write_bool(&mut self, id: u8, value: bool) -> bool {
        self.commit_field(id, FieldKind::Bool, |w| w.write_bool(value))
    }

    fn write_i64(&mut self, id: u8, value: i64) -> bool {
        self.commit_field(id, FieldKind::I64, |w| w.write_i64(value))
    }

    fn write_str(&mut self, id: u8, value: &str) -> bool {
        self.commit_field(id, FieldKind::Str, |w| w.write_str(value))
    }

    fn write_opt_str(&mut self, id: u8, value: Option<&str>) -> bool {
        self.commit_field(id, FieldKind::OptStr, |w| w.write_opt_str(value))
    }

    fn write_str_seq(&mut self, id: u8, values: &[String]) -> bool {
        self.commit_field(id, FieldKind::StrSeq, |w| w.write_str_seq(values))
    }
}
