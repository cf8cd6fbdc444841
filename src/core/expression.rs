//! Classification of `add` expressions.
//!
//! An expression is tried against each object grammar in a fixed order and
//! the first grammar that claims it decides the object type:
//!
//! 1. timer: `5`, `1h 2m 3s`
//! 2. relative alarm: `+12m 180s`, `+ 10m`
//! 3. stopwatch: `s`, `s 1h 3m`
//! 4. counter: `c 2 +1`
//! 5. absolute alarm: `5pm`, `25.06 13:15`
//!
//! A grammar that claims an expression but cannot parse it rejects the whole
//! expression; later grammars are never consulted.

use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;

use super::chunk::{format_seconds, is_time_chunk, sum_time_chunks};
use super::counter::{parse_counter, CounterOperation};
use super::datetime::parse_datetime;
use super::ParseError;
use crate::protocol::ObjectKind;

/// A resolved time object description.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expression {
    /// Count down `seconds`.
    Timer { seconds: f64 },
    /// Ring `offset` whole seconds after the server receives the message.
    RelativeAlarm { offset: u64 },
    /// Ring at a calendar timestamp.
    AbsoluteAlarm { at: NaiveDateTime },
    /// Count up, starting from `seconds`.
    Stopwatch { seconds: f64 },
    /// Create or update a counter.
    Counter(CounterOperation),
}

impl Expression {
    /// The object type this expression creates.
    #[must_use]
    pub const fn object(&self) -> ObjectKind {
        match self {
            Self::Timer { .. } => ObjectKind::Timer,
            Self::RelativeAlarm { .. } | Self::AbsoluteAlarm { .. } => ObjectKind::Alarm,
            Self::Stopwatch { .. } => ObjectKind::Stopwatch,
            Self::Counter(_) => ObjectKind::Counter,
        }
    }

    /// The argument part of the wire message.
    #[must_use]
    pub fn payload(&self) -> String {
        match self {
            Self::Timer { seconds } | Self::Stopwatch { seconds } => format_seconds(*seconds),
            Self::RelativeAlarm { offset, .. } => offset.to_string(),
            Self::AbsoluteAlarm { at } => {
                format!("{}-{}", at.year(), at.format("%-m-%-d %-H:%-M:%-S"))
            },
            Self::Counter(op) => op.payload(),
        }
    }
}

/// Outcome of trying one grammar.
#[derive(Debug)]
enum Match {
    /// The grammar claimed and parsed the expression.
    Matched(Expression),
    /// The grammar does not apply; try the next one.
    NoMatch,
    /// The grammar claimed the expression but it is malformed.
    Invalid(ParseError),
}

impl From<Result<Expression, ParseError>> for Match {
    fn from(result: Result<Expression, ParseError>) -> Self {
        match result {
            Ok(expr) => Self::Matched(expr),
            Err(err) => Self::Invalid(err),
        }
    }
}

type Rule = fn(&[String], NaiveDateTime) -> Match;

/// Grammars in precedence order.
const RULES: [(&str, Rule); 5] = [
    ("timer", match_timer),
    ("relative alarm", match_relative_alarm),
    ("stopwatch", match_stopwatch),
    ("counter", match_counter),
    ("absolute alarm", match_absolute_alarm),
];

/// Classify and resolve an `add` expression.
///
/// `now` anchors relative alarms and fills in omitted dates and years, so
/// the same tokens and `now` always give the same result.
///
/// # Errors
///
/// Returns the [`ParseError`] of the first grammar that claims the expression
/// and fails to parse it.
pub fn classify<S: AsRef<str>>(tokens: &[S], now: NaiveDateTime) -> Result<Expression, ParseError> {
    let tokens: Vec<String> = tokens.iter().map(|t| t.as_ref().to_string()).collect();

    for (name, rule) in RULES {
        match rule(&tokens, now) {
            Match::Matched(expr) => {
                tracing::debug!(grammar = name, ?expr, "expression classified");
                return Ok(expr);
            },
            Match::Invalid(err) => {
                tracing::debug!(grammar = name, %err, "expression rejected");
                return Err(err);
            },
            Match::NoMatch => {},
        }
    }

    // The absolute alarm grammar claims everything it sees.
    Err(ParseError::InvalidDateTimeSyntax(
        super::DateTimeError::MissingDateTime,
    ))
}

fn match_timer(tokens: &[String], _now: NaiveDateTime) -> Match {
    if !tokens.iter().all(|t| is_time_chunk(t)) {
        return Match::NoMatch;
    }
    sum_time_chunks(tokens)
        .map(|seconds| Expression::Timer { seconds })
        .into()
}

fn match_relative_alarm(tokens: &[String], _now: NaiveDateTime) -> Match {
    let Some(first) = tokens.first() else {
        return Match::NoMatch;
    };
    let Some(stripped) = first.strip_prefix('+') else {
        return Match::NoMatch;
    };

    let mut chunks: Vec<&str> = tokens[1..].iter().map(String::as_str).collect();
    if !stripped.is_empty() {
        chunks.insert(0, stripped);
    }

    sum_time_chunks(&chunks)
        .map_err(|e| match e {
            ParseError::InvalidChunk(token) => ParseError::InvalidAlarmParams(token),
            other => other,
        })
        .and_then(|seconds| {
            whole_seconds(seconds).ok_or_else(|| ParseError::InvalidAlarmParams(first.clone()))
        })
        .map(|offset| Expression::RelativeAlarm { offset })
        .into()
}

/// Round to whole seconds, or `None` if the value does not fit a `u64`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn whole_seconds(seconds: f64) -> Option<u64> {
    let rounded = seconds.round();
    (rounded >= 0.0 && rounded < u64::MAX as f64).then(|| rounded as u64)
}

fn match_stopwatch(tokens: &[String], _now: NaiveDateTime) -> Match {
    match tokens.split_first() {
        Some((keyword, rest)) if keyword == "s" => sum_time_chunks(rest)
            .map(|seconds| Expression::Stopwatch { seconds })
            .map_err(|e| match e {
                ParseError::InvalidChunk(token) => ParseError::InvalidStopwatchParams(token),
                other => other,
            })
            .into(),
        _ => Match::NoMatch,
    }
}

fn match_counter(tokens: &[String], _now: NaiveDateTime) -> Match {
    match tokens.split_first() {
        Some((keyword, rest)) if keyword == "c" => {
            parse_counter(rest).map(Expression::Counter).into()
        },
        _ => Match::NoMatch,
    }
}

fn match_absolute_alarm(tokens: &[String], now: NaiveDateTime) -> Match {
    parse_datetime(tokens, now)
        .map(|at| Expression::AbsoluteAlarm { at })
        .map_err(ParseError::InvalidDateTimeSyntax)
        .into()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::core::counter::{Operator, Target};
    use crate::core::{DateTimeError, DateTimeField};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 8, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    fn run(input: &str) -> Result<Expression, ParseError> {
        let tokens: Vec<&str> = input.split_whitespace().collect();
        classify(&tokens, now())
    }

    #[test]
    fn test_timer() {
        assert_eq!(run("5").unwrap(), Expression::Timer { seconds: 5.0 });
        assert_eq!(run("1h 2m 3s").unwrap(), Expression::Timer { seconds: 3_723.0 });
        assert_eq!(run("2m 1d 5s").unwrap(), Expression::Timer { seconds: 86_525.0 });
        assert_eq!(run("").unwrap(), Expression::Timer { seconds: 0.0 });
    }

    #[test]
    fn test_timer_keeps_fractions() {
        let Expression::Timer { seconds } = run("4.2312h").unwrap() else {
            panic!("expected a timer");
        };
        assert!((seconds - 15_232.32).abs() < 1e-6);
    }

    #[test]
    fn test_fraction_without_unit_is_a_date() {
        assert_eq!(
            run("4.5").unwrap().object(),
            ObjectKind::Alarm,
            "4.5 is May 4th, not 4.5 seconds"
        );
        assert_eq!(run("4.5s").unwrap(), Expression::Timer { seconds: 4.5 });
    }

    #[test]
    fn test_relative_alarm() {
        let expr = run("+12m 180s").unwrap();
        assert_eq!(expr, Expression::RelativeAlarm { offset: 900 });
        assert_eq!(expr.payload(), "900");
    }

    #[test]
    fn test_relative_alarm_separate_plus() {
        assert_eq!(run("+ 10m").unwrap(), Expression::RelativeAlarm { offset: 600 });
    }

    #[test]
    fn test_relative_alarm_rounds() {
        let Expression::RelativeAlarm { offset, .. } = run("+4.2312h").unwrap() else {
            panic!("expected a relative alarm");
        };
        assert_eq!(offset, 15_232);
        let Expression::RelativeAlarm { offset, .. } = run("+0.6s").unwrap() else {
            panic!("expected a relative alarm");
        };
        assert_eq!(offset, 1);
    }

    #[test]
    fn test_relative_alarm_invalid() {
        assert_eq!(
            run("+10m later"),
            Err(ParseError::InvalidAlarmParams("later".to_string()))
        );
        assert_eq!(
            run("+5pm"),
            Err(ParseError::InvalidAlarmParams("5pm".to_string()))
        );
    }

    #[test]
    fn test_relative_alarm_far_future() {
        let expr = run("+100000000d").unwrap();
        assert_eq!(expr, Expression::RelativeAlarm { offset: 8_640_000_000_000 });
        assert_eq!(expr.payload(), "8640000000000");

        assert_eq!(
            run("+99999999999999999999999d"),
            Err(ParseError::InvalidAlarmParams("+99999999999999999999999d".to_string()))
        );
    }

    #[test]
    fn test_stopwatch() {
        assert_eq!(run("s").unwrap(), Expression::Stopwatch { seconds: 0.0 });
        assert_eq!(run("s 100").unwrap(), Expression::Stopwatch { seconds: 100.0 });
        assert_eq!(run("s 1h 3m").unwrap(), Expression::Stopwatch { seconds: 3_780.0 });
        assert_eq!(
            run("s 1h x"),
            Err(ParseError::InvalidStopwatchParams("x".to_string()))
        );
    }

    #[test]
    fn test_counter() {
        let Expression::Counter(op) = run("c 2 +1").unwrap() else {
            panic!("expected a counter");
        };
        assert_eq!(op.target, Target::Index("2".to_string()));
        assert_eq!(op.operator, Some(Operator::Add));
        assert_eq!(op.operand.as_str(), "1");

        let Expression::Counter(op) = run("c @abc 0").unwrap() else {
            panic!("expected a counter");
        };
        assert_eq!(op.target, Target::Label("abc".to_string()));
        assert_eq!(op.operator, None);

        assert_eq!(run("c"), Err(ParseError::MissingCounterTarget));
        assert_eq!(
            run("c abc"),
            Err(ParseError::InvalidCounterTarget("abc".to_string()))
        );
        assert_eq!(
            run("c 1 %4.5"),
            Err(ParseError::NonIntegerModulo("4.5".to_string()))
        );
    }

    #[test]
    fn test_absolute_alarm() {
        let expr = run("12/23/2055 7:30:15am").unwrap();
        assert_eq!(expr.object(), ObjectKind::Alarm);
        assert_eq!(expr.payload(), "2055-12-23 7:30:15");

        assert_eq!(run("5pm").unwrap().payload(), "2024-8-15 17:0:0");
    }

    #[test]
    fn test_absolute_alarm_year_is_not_padded() {
        assert_eq!(run("3/1/5").unwrap().payload(), "5-3-1 0:0:0");
        assert_eq!(
            run("1.1.0"),
            Err(ParseError::InvalidDateTimeSyntax(DateTimeError::InvalidCalendarDate {
                field: DateTimeField::Year,
                value: 0,
            }))
        );
    }

    #[test]
    fn test_non_ascii_digits_fall_through_to_dates() {
        assert_eq!(
            run("٥"),
            Err(ParseError::InvalidDateTimeSyntax(DateTimeError::UnrecognizedDateFormat(
                "٥".to_string()
            )))
        );
    }

    #[test]
    fn test_absolute_alarm_failures_keep_category() {
        let err = run("25:00").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidDateTimeSyntax(DateTimeError::InvalidTime {
                field: DateTimeField::Hour,
                value: 25,
            })
        );
        assert!(err.is_semantic());

        let err = run("hello world").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidDateTimeSyntax(DateTimeError::UnrecognizedDateFormat(
                "hello".to_string()
            ))
        );
        assert!(!err.is_semantic());

        assert_eq!(
            run("1.1 10:00 tomorrow"),
            Err(ParseError::InvalidDateTimeSyntax(DateTimeError::TooManyDateTimeArgs(3)))
        );
    }

    #[test]
    fn test_idempotent() {
        for input in ["5", "+1h", "s 3", "c 1 ^2", "25.06 13:15", "5pm"] {
            assert_eq!(run(input), run(input), "{input}");
        }
    }
}
