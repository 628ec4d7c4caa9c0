use std::io::{ErrorKind, Read};

use crate::codec::MAX_RECORD_DATA;
use crate::error::{Result, TapeError};

/// Reads record-sized chunks from any `Read` stream.
///
/// Each call yields up to 24 bytes. The source is only ever asked for the
/// bytes it has: a short chunk occurs at end-of-input and nowhere else, and
/// exhaustion is reported as `Ok(None)` rather than a sentinel byte.
pub struct ChunkReader<T> {
    inner: T,
    buf: [u8; MAX_RECORD_DATA],
}

impl<T: Read> ChunkReader<T> {
    /// Create a new chunk reader.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: [0u8; MAX_RECORD_DATA],
        }
    }

    /// Read the next chunk (blocking).
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    pub fn read_chunk(&mut self) -> Result<Option<&[u8]>> {
        let mut filled = 0usize;
        while filled < self.buf.len() {
            match self.inner.read(&mut self.buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(TapeError::Io(err)),
            }
        }

        if filled == 0 {
            return Ok(None);
        }
        Ok(Some(&self.buf[..filled]))
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn splits_input_into_24_byte_chunks() {
        let input: Vec<u8> = (0..25).collect();
        let mut reader = ChunkReader::new(Cursor::new(input.clone()));

        let first = reader.read_chunk().unwrap().unwrap().to_vec();
        assert_eq!(first, input[..24]);

        let second = reader.read_chunk().unwrap().unwrap().to_vec();
        assert_eq!(second, input[24..]);

        assert!(reader.read_chunk().unwrap().is_none());
    }

    #[test]
    fn exact_multiple_ends_without_phantom_chunk() {
        let input = vec![0xA5u8; 48];
        let mut reader = ChunkReader::new(Cursor::new(input));

        assert_eq!(reader.read_chunk().unwrap().unwrap().len(), 24);
        assert_eq!(reader.read_chunk().unwrap().unwrap().len(), 24);
        assert!(reader.read_chunk().unwrap().is_none());
        assert!(reader.read_chunk().unwrap().is_none());
    }

    #[test]
    fn empty_input_yields_none_immediately() {
        let mut reader = ChunkReader::new(Cursor::new(Vec::<u8>::new()));
        assert!(reader.read_chunk().unwrap().is_none());
    }

    #[test]
    fn accumulates_short_reads_into_full_chunk() {
        let mut reader = ChunkReader::new(OneByteReader { remaining: 30 });

        let first = reader.read_chunk().unwrap().unwrap().to_vec();
        assert_eq!(first.len(), 24);

        let second = reader.read_chunk().unwrap().unwrap().to_vec();
        assert_eq!(second.len(), 6);

        assert!(reader.read_chunk().unwrap().is_none());
    }

    #[test]
    fn retries_interrupted_reads() {
        let inner = Cursor::new(vec![0x42u8; 3]);
        let mut reader = ChunkReader::new(InterruptOnce {
            interrupted: false,
            inner,
        });

        let chunk = reader.read_chunk().unwrap().unwrap();
        assert_eq!(chunk, &[0x42, 0x42, 0x42]);
    }

    #[test]
    fn io_errors_propagate() {
        let mut reader = ChunkReader::new(FailingReader);
        let err = reader.read_chunk().unwrap_err();
        assert!(matches!(err, TapeError::Io(_)));
    }

    #[test]
    fn accessors_and_into_inner() {
        let mut reader = ChunkReader::new(Cursor::new(vec![1u8, 2, 3]));
        let _ = reader.get_ref();
        let _ = reader.get_mut();
        let _inner = reader.into_inner();
    }

    struct OneByteReader {
        remaining: usize,
    }

    impl Read for OneByteReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.remaining == 0 || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = 0x11;
            self.remaining -= 1;
            Ok(1)
        }
    }

    struct InterruptOnce {
        interrupted: bool,
        inner: Cursor<Vec<u8>>,
    }

    impl Read for InterruptOnce {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            self.inner.read(buf)
        }
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(ErrorKind::BrokenPipe))
        }
    }
}
