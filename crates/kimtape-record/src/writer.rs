use std::io::{ErrorKind, Write};

use bytes::BytesMut;

use crate::codec::{encode_record, encode_terminator, Record, MAX_RECORD_WIRE_LEN};
use crate::error::{Result, TapeError};

/// Writes serialized records to any `Write` stream.
pub struct RecordWriter<T> {
    inner: T,
    buf: BytesMut,
}

impl<T: Write> RecordWriter<T> {
    /// Create a new record writer.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(MAX_RECORD_WIRE_LEN),
        }
    }

    /// Serialize and write one record (blocking).
    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        self.buf.clear();
        encode_record(record, &mut self.buf);
        self.write_buffered()
    }

    /// Serialize and write the end-of-transmission summary record.
    pub fn write_terminator(&mut self, total_data_bytes: u16) -> Result<()> {
        self.buf.clear();
        encode_terminator(total_data_bytes, &mut self.buf);
        self.write_buffered()
    }

    fn write_buffered(&mut self) -> Result<()> {
        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(TapeError::SinkClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(TapeError::Io(err)),
            }
        }

        self.flush()
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(TapeError::Io(err)),
            }
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}
