//! Failure kinds of the expression engine.
//!
//! Syntactic failures (a token that fits no grammar) and semantic failures
//! (a well-formed token whose numbers make no sense) are separate variants,
//! see [`ParseError::is_semantic`].

use std::fmt;

use thiserror::Error;

/// A single component of a calendar timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateTimeField {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl fmt::Display for DateTimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
        })
    }
}

/// Failures of the date/time disambiguator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateTimeError {
    /// Nothing to parse.
    #[error("missing date or time")]
    MissingDateTime,

    /// More than a date token and a time token.
    #[error("too many date/time arguments ({0}), expected at most 2")]
    TooManyDateTimeArgs(usize),

    #[error(
        "unrecognized date format '{0}', available: \"dd.mm[.yyyy]\", \"mm/dd[/yyyy]\", \"yyyy-mm[-dd]\""
    )]
    UnrecognizedDateFormat(String),

    #[error("unrecognized time format '{0}', expected \"HH:MM[:SS]\" or \"HH[:MM[:SS]]am/pm\"")]
    UnrecognizedTimeFormat(String),

    /// Hour, minute or second outside the time-of-day range.
    #[error("invalid time: {field} {value} is out of range")]
    InvalidTime { field: DateTimeField, value: u64 },

    /// Year, month or day that does not form a real calendar date.
    #[error("invalid date: {field} {value} is out of range")]
    InvalidCalendarDate { field: DateTimeField, value: u64 },
}

impl DateTimeError {
    /// Whether this is a range failure rather than a format failure.
    #[must_use]
    pub const fn is_semantic(&self) -> bool {
        matches!(self, Self::InvalidTime { .. } | Self::InvalidCalendarDate { .. })
    }
}

/// Failures of expression classification and command encoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("'{0}' is not a time chunk")]
    InvalidChunk(String),

    #[error("invalid alarm parameter '{0}'")]
    InvalidAlarmParams(String),

    #[error("invalid stopwatch parameter '{0}'")]
    InvalidStopwatchParams(String),

    #[error("not enough arguments for counter, expected an index or @label")]
    MissingCounterTarget,

    #[error("invalid counter index/name '{0}'")]
    InvalidCounterTarget(String),

    #[error("invalid counter expression '{0}'")]
    InvalidCounterExpression(String),

    #[error("operation modulo (%) is only allowed with integer parameters, got '{0}'")]
    NonIntegerModulo(String),

    #[error("'{0}' is neither an index nor a label")]
    InvalidSelector(String),

    #[error("invalid syntax: {0}")]
    InvalidDateTimeSyntax(#[source] DateTimeError),
}

impl ParseError {
    /// Whether the expression was well formed but numerically invalid.
    #[must_use]
    pub const fn is_semantic(&self) -> bool {
        match self {
            Self::NonIntegerModulo(_) => true,
            Self::InvalidDateTimeSyntax(inner) => inner.is_semantic(),
            _ => false,
        }
    }
}

impl From<DateTimeError> for ParseError {
    fn from(err: DateTimeError) -> Self {
        Self::InvalidDateTimeSyntax(err)
    }
}
