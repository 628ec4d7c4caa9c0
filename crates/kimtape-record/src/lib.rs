//! KIM-1 paper-tape record encoding.
//!
//! Converts an arbitrary binary byte stream into the ASCII-hex record format
//! used by the KIM-1 paper tape LOAD/DUMP routines. Every record is framed
//! with:
//! - A `;` start marker
//! - A 2-digit hex data length (up to 24 bytes per record)
//! - A 4-digit hex big-endian starting address
//! - The data bytes as hex pairs
//! - A 4-digit hex checksum (16-bit wrapping byte sum) and `\r\n`
//!
//! Records stream out one at a time as the input is read, so memory use
//! stays constant regardless of input size.

pub mod codec;
pub mod encoder;
pub mod error;
pub mod reader;
pub mod writer;

pub use codec::{
    checksum, encode_record, encode_terminator, Record, DEFAULT_START_ADDRESS, MAX_RECORD_DATA,
    MAX_RECORD_WIRE_LEN, START_MARKER,
};
pub use encoder::{EncodeSummary, Encoder, EncoderConfig, Records, Terminator};
pub use error::{Result, TapeError};
pub use reader::ChunkReader;
pub use writer::RecordWriter;
