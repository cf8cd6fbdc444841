//! Output formatting for pdc.
//!
//! This module renders resolved messages and server replies in the selected format.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::PdcError;
use crate::protocol::ProtocolMessage;

pub use json::*;
pub use pretty::*;

/// Format a resolved message based on output format
///
/// # Errors
///
/// Returns `PdcError::Serialize` if JSON serialization fails.
pub fn format_message(message: &ProtocolMessage, format: OutputFormat) -> Result<String, PdcError> {
    match format {
        OutputFormat::Pretty => Ok(format_message_pretty(message)),
        OutputFormat::Json => format_message_json(message),
    }
}

/// Format a sent message and its reply based on output format
///
/// # Errors
///
/// Returns `PdcError::Serialize` if JSON serialization fails.
pub fn format_exchange(
    message: &ProtocolMessage,
    reply: &[String],
    format: OutputFormat,
) -> Result<String, PdcError> {
    match format {
        OutputFormat::Pretty => Ok(format_exchange_pretty(message, reply)),
        OutputFormat::Json => format_exchange_json(message, reply),
    }
}
