use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{Result, TapeError};

/// Record start marker: ";" (ASCII 0x3B).
pub const START_MARKER: u8 = b';';

/// Maximum data bytes per record: 24 (0x18).
pub const MAX_RECORD_DATA: usize = 0x18;

/// Default starting address when the caller supplies none.
pub const DEFAULT_START_ADDRESS: u16 = 0x0200;

/// Text length of a full 24-byte record, `\r\n` included.
pub const MAX_RECORD_WIRE_LEN: usize = 13 + 2 * MAX_RECORD_DATA;

const LINE_ENDING: &[u8; 2] = b"\r\n";

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// One checksummed unit of paper-tape output: a bounded chunk of data plus
/// the memory address its first byte loads at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    address: u16,
    data: Bytes,
}

impl Record {
    /// Create a new record.
    ///
    /// Fails if `data` holds more than [`MAX_RECORD_DATA`] bytes.
    pub fn new(address: u16, data: impl Into<Bytes>) -> Result<Self> {
        let data = data.into();
        if data.len() > MAX_RECORD_DATA {
            return Err(TapeError::DataTooLarge {
                size: data.len(),
                max: MAX_RECORD_DATA,
            });
        }
        Ok(Self { address, data })
    }

    /// Starting address of this record's first data byte.
    pub fn address(&self) -> u16 {
        self.address
    }

    /// The data bytes, in input order.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Count of data bytes (the record's length field).
    pub fn length(&self) -> u8 {
        self.data.len() as u8
    }

    /// 16-bit wrapping sum of length, address bytes, and data bytes.
    pub fn checksum(&self) -> u16 {
        checksum(self.length(), self.address, &self.data)
    }

    /// The total text size of this record, `\r\n` included.
    pub fn wire_len(&self) -> usize {
        13 + 2 * self.data.len()
    }
}

/// Compute the record checksum: `length`, address high byte, address low
/// byte, and every data byte summed as unsigned 8-bit values into a 16-bit
/// accumulator that wraps modulo 65536.
pub fn checksum(length: u8, address: u16, data: &[u8]) -> u16 {
    let mut sum = u16::from(length);
    sum = sum.wrapping_add(address >> 8);
    sum = sum.wrapping_add(address & 0x00FF);
    for &byte in data {
        sum = sum.wrapping_add(u16::from(byte));
    }
    sum
}

/// Encode a record into the tape text format.
///
/// Text format (uppercase hex, big-endian address):
/// ```text
/// ;LLAAAADD...DDCCCC\r\n
/// ```
/// `LL` is the data length, `AAAA` the starting address, `DD...DD` the data
/// bytes, `CCCC` the checksum.
pub fn encode_record(record: &Record, dst: &mut BytesMut) {
    dst.reserve(record.wire_len());
    dst.put_u8(START_MARKER);
    put_hex_u8(dst, record.length());
    put_hex_u16(dst, record.address());
    for &byte in record.data() {
        put_hex_u8(dst, byte);
    }
    put_hex_u16(dst, record.checksum());
    dst.put_slice(LINE_ENDING);
}

/// Encode the end-of-transmission summary record.
///
/// Zero-length record whose address field carries the total count of data
/// bytes in the transmission, modulo 65536:
/// ```text
/// ;00TTTTCCCC\r\n
/// ```
pub fn encode_terminator(total_data_bytes: u16, dst: &mut BytesMut) {
    dst.reserve(13);
    dst.put_u8(START_MARKER);
    put_hex_u8(dst, 0);
    put_hex_u16(dst, total_data_bytes);
    put_hex_u16(dst, checksum(0, total_data_bytes, &[]));
    dst.put_slice(LINE_ENDING);
}

fn put_hex_u8(dst: &mut BytesMut, byte: u8) {
    dst.put_u8(HEX_DIGITS[usize::from(byte >> 4)]);
    dst.put_u8(HEX_DIGITS[usize::from(byte & 0x0F)]);
}

fn put_hex_u16(dst: &mut BytesMut, value: u16) {
    put_hex_u8(dst, (value >> 8) as u8);
    put_hex_u8(dst, value as u8);
}
