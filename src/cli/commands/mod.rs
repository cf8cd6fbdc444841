//! Command implementations for pdc.
//!
//! Each invocation resolves its tokens to a wire message and, unless this is
//! a dry run, hands it to the transport.

use std::fmt::Write;
use std::path::Path;

use chrono::NaiveDateTime;
use colored::Colorize;

use crate::cli::args::OutputFormat;
use crate::client::Transport;
use crate::error::PdcError;
use crate::output::{format_exchange, format_message};
use crate::protocol::encode;

/// How results are delivered and shown.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Resolve and print the message without contacting the server.
    pub dry_run: bool,
    /// Output format for the result.
    pub format: OutputFormat,
}

/// Execute one invocation.
///
/// # Errors
///
/// Returns an error if the tokens cannot be resolved (nothing is sent in
/// that case), the server cannot be reached, or output formatting fails.
pub fn send<S: AsRef<str>>(
    tokens: &[S],
    now: NaiveDateTime,
    transport: &dyn Transport,
    options: RunOptions,
) -> Result<String, PdcError> {
    let message = encode(tokens, now)?;
    tracing::info!(wire = %message, "resolved message");

    if options.dry_run {
        return format_message(&message, options.format);
    }

    let reply = transport.exchange(&message.to_wire())?;
    format_exchange(&message, &reply, options.format)
}

/// Execute one invocation per line of a file.
///
/// Blank lines and lines starting with `#` are skipped. A line that cannot
/// be resolved is reported and the remaining lines still run; a transport
/// failure stops the batch.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the server cannot be reached.
pub fn send_file(
    path: &Path,
    now: NaiveDateTime,
    transport: &dyn Transport,
    options: RunOptions,
) -> Result<String, PdcError> {
    let contents = std::fs::read_to_string(path)?;
    let mut output = String::new();

    for (number, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let result = match send(&tokens, now, transport, options) {
            Err(PdcError::Expression(e)) => {
                tracing::debug!(line = number + 1, error = %e, "skipping line");
                format!("{} line {}: {e}", "error:".red().bold(), number + 1)
            },
            other => other?,
        };

        if !output.is_empty() {
            output.push('\n');
        }
        write!(output, "{result}").ok();
    }

    Ok(output)
}
