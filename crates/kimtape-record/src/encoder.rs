use std::io::{Read, Write};

use bytes::Bytes;
use tracing::debug;

use crate::codec::{Record, DEFAULT_START_ADDRESS};
use crate::error::Result;
use crate::reader::ChunkReader;
use crate::writer::RecordWriter;

/// Whether an encoding run ends with the end-of-transmission summary record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    /// No summary record (the historical default).
    Omit,
    /// Append a zero-length record carrying the total data byte count.
    Emit,
}

/// Configuration for an encoding run.
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    /// Address of the first data byte. Default: 0x0200.
    pub start_address: u16,
    /// End-of-transmission record policy. Default: [`Terminator::Omit`].
    pub terminator: Terminator,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            start_address: DEFAULT_START_ADDRESS,
            terminator: Terminator::Omit,
        }
    }
}

/// Totals from one encoding run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EncodeSummary {
    /// Number of data records emitted.
    pub records: u64,
    /// Total data bytes carried by those records.
    pub data_bytes: u64,
}

/// Converts a binary byte stream into paper-tape records.
///
/// Each record carries up to 24 input bytes and the address its first byte
/// loads at; the address cursor starts at the configured start address and
/// advances by each record's length, wrapping modulo 65536.
#[derive(Debug, Default, Clone)]
pub struct Encoder {
    config: EncoderConfig,
}

impl Encoder {
    /// Create an encoder with default configuration.
    pub fn new() -> Self {
        Self::with_config(EncoderConfig::default())
    }

    /// Create an encoder with explicit configuration.
    pub fn with_config(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// Current encoder configuration.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Lazily encode `input` into a sequence of records.
    ///
    /// One record per non-empty input chunk, in input order. The iterator
    /// yields data records only; the summary record, when configured, is
    /// handled by [`Encoder::encode_to`].
    pub fn records<R: Read>(&self, input: R) -> Records<R> {
        Records {
            reader: ChunkReader::new(input),
            address: self.config.start_address,
            done: false,
        }
    }

    /// Stream records from `input` into `output`.
    ///
    /// Records are serialized and written one at a time; memory use is
    /// constant regardless of input size. Output already written stays
    /// written if an I/O error cuts the run short.
    pub fn encode_to<R: Read, W: Write>(&self, input: R, output: W) -> Result<EncodeSummary> {
        let mut writer = RecordWriter::new(output);
        let mut summary = EncodeSummary::default();

        for record in self.records(input) {
            let record = record?;
            writer.write_record(&record)?;
            summary.records += 1;
            summary.data_bytes += u64::from(record.length());
        }

        if self.config.terminator == Terminator::Emit {
            let total = (summary.data_bytes & 0xFFFF) as u16;
            debug!(total, "writing end-of-transmission record");
            writer.write_terminator(total)?;
        }

        debug!(
            records = summary.records,
            data_bytes = summary.data_bytes,
            "encode complete"
        );
        Ok(summary)
    }
}

/// Lazy record sequence over a byte stream. Created by [`Encoder::records`].
pub struct Records<R> {
    reader: ChunkReader<R>,
    address: u16,
    done: bool,
}

impl<R: Read> Iterator for Records<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.reader.read_chunk() {
            Ok(Some(chunk)) => {
                let address = self.address;
                self.address = address.wrapping_add(chunk.len() as u16);
                match Record::new(address, Bytes::copy_from_slice(chunk)) {
                    Ok(record) => Some(Ok(record)),
                    Err(err) => {
                        self.done = true;
                        Some(Err(err))
                    }
                }
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
