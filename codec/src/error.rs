//! Error types for codec operations

use thiserror::Error;

/// Error type for codec operations.
///
/// Every variant is recorded through the same sticky [crate::Status] cell: once a
/// coder holds one of these, all later field operations are skipped.
#[derive(Error, Debug)]
pub enum Error {
    #[error("channel i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("short write: {written} of {expected} bytes accepted")]
    ShortWrite { expected: usize, written: usize },
    #[error("unexpected end of data: {read} of {expected} bytes read")]
    EndOfData { expected: usize, read: usize },
    #[error("invalid length: {0}")]
    InvalidLength(u64),
    #[error("invalid utf-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("sequence count mismatch: count {count}, container holds {len}")]
    CountMismatch { count: usize, len: usize },
    #[error("extra data found: {0} bytes")]
    ExtraData(usize),
}
