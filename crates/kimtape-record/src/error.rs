/// Errors that can occur while encoding paper-tape records.
#[derive(Debug, thiserror::Error)]
pub enum TapeError {
    /// The record data exceeds the 24-byte format limit.
    #[error("record data too large ({size} bytes, max {max})")]
    DataTooLarge { size: usize, max: usize },

    /// An I/O error occurred while reading input or writing records.
    #[error("tape I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The output sink stopped accepting bytes mid-record.
    #[error("output sink closed (short write)")]
    SinkClosed,
}

pub type Result<T> = std::result::Result<T, TapeError>;
