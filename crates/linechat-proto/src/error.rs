//! Error types for the chat protocol.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Transport-level protocol errors raised by the line codec.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A line exceeded the configured maximum length.
    #[error("line too long: {actual} bytes (limit: {limit})")]
    LineTooLong {
        /// Bytes buffered when the limit was hit.
        actual: usize,
        /// Maximum allowed length.
        limit: usize,
    },
}

/// Errors produced while classifying a client line into a [`Command`](crate::Command).
///
/// Parse errors are never fatal: the server reports them back to the sender
/// as a plain text line and keeps reading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// `to|` line without a target or without a content field.
    #[error("malformed private message")]
    Format,

    /// `rename|` with an empty name or a name containing the field delimiter.
    #[error("invalid user name: {0:?}")]
    InvalidName(String),
}
