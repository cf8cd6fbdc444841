//! Time chunk parsing.
//!
//! A time chunk is a token like `5`, `3d`, `0.3s` or `2.5h`: a number with an
//! optional unit. Fractions always need the unit, otherwise `4.5` would be
//! indistinguishable from the date "May 4th".

use once_cell::sync::Lazy;
use regex::Regex;

use super::ParseError;

static CHUNK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+(?:\.[0-9]+[smhd]|[smhd]?))$")
        .unwrap_or_else(|e| panic!("Invalid time chunk regex: {e}"))
});

/// Check whether a token is a time chunk.
#[must_use]
pub fn is_time_chunk(token: &str) -> bool {
    CHUNK_PATTERN.is_match(token)
}

/// Convert a single time chunk into seconds.
///
/// # Errors
///
/// Returns [`ParseError::InvalidChunk`] if the token is not a time chunk.
pub fn parse_time_chunk(token: &str) -> Result<f64, ParseError> {
    if !is_time_chunk(token) {
        return Err(ParseError::InvalidChunk(token.to_string()));
    }

    let (number, multiplier) = match token.as_bytes().last() {
        Some(b's') => (&token[..token.len() - 1], 1.0),
        Some(b'm') => (&token[..token.len() - 1], 60.0),
        Some(b'h') => (&token[..token.len() - 1], 3_600.0),
        Some(b'd') => (&token[..token.len() - 1], 86_400.0),
        _ => (token, 1.0),
    };

    number
        .parse::<f64>()
        .map(|n| n * multiplier)
        .map_err(|_| ParseError::InvalidChunk(token.to_string()))
}

/// Sum a sequence of time chunks.
///
/// An empty sequence sums to zero.
///
/// # Errors
///
/// Returns [`ParseError::InvalidChunk`] naming the first token that is not a chunk.
pub fn sum_time_chunks<S: AsRef<str>>(tokens: &[S]) -> Result<f64, ParseError> {
    tokens
        .iter()
        .map(|t| parse_time_chunk(t.as_ref()))
        .sum()
}

/// Format a seconds value the way the server reads it back.
#[must_use]
pub fn format_seconds(seconds: f64) -> String {
    format!("{seconds}")
}
