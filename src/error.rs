//! Error types for pdc.

use thiserror::Error;

use crate::core::ParseError;

/// Top-level error for everything the client can fail at.
#[derive(Debug, Error)]
pub enum PdcError {
    /// The expression was rejected; nothing was sent.
    #[error(transparent)]
    Expression(#[from] ParseError),

    /// Configuration could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// No server is listening on the configured address.
    #[error("Connection to server failed ({0})")]
    ConnectionRefused(String),

    /// Any other socket or file failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output could not be produced.
    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A received wire message could not be decoded.
    #[error("malformed wire message: {0}")]
    Decode(String),
}
