//! Date and time disambiguation for absolute alarms.
//!
//! Turns one or two tokens such as `5pm`, `25.06 13:15` or `12/23/2055 7:30:15am`
//! into a concrete timestamp. Whatever the user leaves out (date, year,
//! minutes, seconds) is filled in with the nearest value that puts the alarm
//! in the future.

use std::ops::RangeInclusive;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::{DateTimeError, DateTimeField};

/// Leap year used to check month/day before the year is known.
const LEAP_YEAR: i32 = 2016;

/// Upper bound on the number of years tried when the year is omitted.
pub const MAX_YEAR_SEARCH: i32 = 8;

/// Years an alarm may be set in.
const YEAR_RANGE: RangeInclusive<i32> = 1..=9999;

static DMY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<day>[0-9]+)\.(?P<month>[0-9]+)(?:\.(?P<year>[0-9]+))?$")
        .unwrap_or_else(|e| panic!("Invalid dd.mm.yyyy regex: {e}"))
});

static MDY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<month>[0-9]+)/(?P<day>[0-9]+)(?:/(?P<year>[0-9]+))?$")
        .unwrap_or_else(|e| panic!("Invalid mm/dd/yyyy regex: {e}"))
});

static YMD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<year>[0-9]+)-(?P<month>[0-9]+)(?:-(?P<day>[0-9]+))?$")
        .unwrap_or_else(|e| panic!("Invalid yyyy-mm-dd regex: {e}"))
});

static CLOCK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<hour>[0-9]+):(?P<minute>[0-9]+)(?::(?P<second>[0-9]+))?$")
        .unwrap_or_else(|e| panic!("Invalid 24-hour time regex: {e}"))
});

static MERIDIEM_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<hour>[0-9]+)(?::(?P<minute>[0-9]+)(?::(?P<second>[0-9]+))?)?(?P<meridiem>am|pm)$",
    )
    .unwrap_or_else(|e| panic!("Invalid 12-hour time regex: {e}"))
});

static HOUR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<hour>[0-9]+)$").unwrap_or_else(|e| panic!("Invalid hour regex: {e}"))
});

/// AM/PM marker of a 12-hour clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    /// Convert a 12-hour clock hour to a 24-hour clock hour.
    ///
    /// Hours that make no sense on a 12-hour clock (`13pm`) come out of range
    /// and are rejected when the time is built.
    #[must_use]
    pub const fn to_24h(self, hour: u32) -> u32 {
        match (self, hour) {
            (Self::Am, 12) => 0,
            (Self::Pm, h) if h != 12 => h + 12,
            (_, h) => h,
        }
    }
}

/// Fields of a date token, before the year is inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFields {
    pub year: Option<i32>,
    pub month: u32,
    pub day: Option<u32>,
}

/// Fields of a time token, before defaults are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeFields {
    pub hour: u32,
    pub minute: Option<u32>,
    pub second: Option<u32>,
    pub meridiem: Option<Meridiem>,
}

impl TimeFields {
    /// Midnight, used when only a date is given.
    const MIDNIGHT: Self = Self {
        hour: 0,
        minute: None,
        second: None,
        meridiem: None,
    };

    /// Validate the raw fields and convert to a 24-hour time of day.
    fn resolve(self) -> Result<NaiveTime, DateTimeError> {
        let minute = self.minute.unwrap_or(0);
        let second = self.second.unwrap_or(0);

        check_range(DateTimeField::Hour, self.hour, 23)?;
        check_range(DateTimeField::Minute, minute, 59)?;
        check_range(DateTimeField::Second, second, 59)?;

        let hour = self.meridiem.map_or(self.hour, |m| m.to_24h(self.hour));
        NaiveTime::from_hms_opt(hour, minute, second).ok_or(DateTimeError::InvalidTime {
            field: DateTimeField::Hour,
            value: u64::from(hour),
        })
    }
}

fn check_range(field: DateTimeField, value: u32, max: u32) -> Result<(), DateTimeError> {
    if value > max {
        return Err(DateTimeError::InvalidTime {
            field,
            value: u64::from(value),
        });
    }
    Ok(())
}

/// Resolve a date/time expression to a timestamp.
///
/// `tokens` holds one or two tokens. A single token containing a colon or an
/// AM/PM marker is a time, any other single token is a date. With two tokens
/// the first is the date and the second the time.
///
/// Omitted fields are filled in relative to `now`:
/// - no date: today, or tomorrow if that time has already passed
/// - no year: the first year (from the current one) that puts the timestamp
///   in the future
/// - no day: the 1st; no time: midnight; no minute/second: 0
///
/// # Errors
///
/// Returns a [`DateTimeError`] naming the token or field that could not be
/// resolved.
pub fn parse_datetime<S: AsRef<str>>(
    tokens: &[S],
    now: NaiveDateTime,
) -> Result<NaiveDateTime, DateTimeError> {
    let tokens: Vec<String> = tokens.iter().map(|t| t.as_ref().to_lowercase()).collect();

    let (date, time) = match tokens.as_slice() {
        [] => return Err(DateTimeError::MissingDateTime),
        [single] if looks_like_time(single) => (None, Some(single.as_str())),
        [single] => (Some(single.as_str()), None),
        [date, time] => (Some(date.as_str()), Some(time.as_str())),
        _ => return Err(DateTimeError::TooManyDateTimeArgs(tokens.len())),
    };

    let date = date.map(parse_date).transpose()?;
    let time = match time {
        Some(t) => parse_time(t, date.is_some())?,
        None => TimeFields::MIDNIGHT,
    };
    let time = time.resolve()?;

    match date {
        None => Ok(next_occurrence(time, now)),
        Some(DateFields { year: None, month, day }) => {
            nearest_year(month, day.unwrap_or(1), time, now)
        },
        Some(DateFields {
            year: Some(year),
            month,
            day,
        }) => Ok(NaiveDateTime::new(
            calendar_date(year, month, day.unwrap_or(1))?,
            time,
        )),
    }
}

fn looks_like_time(token: &str) -> bool {
    token.contains(':') || token.contains("am") || token.contains("pm")
}

/// Parse a date token.
///
/// Formats are tried in order: `dd.mm[.yyyy]`, `mm/dd[/yyyy]`, `yyyy-mm[-dd]`.
///
/// # Errors
///
/// Returns [`DateTimeError::UnrecognizedDateFormat`] if no format matches, or
/// [`DateTimeError::InvalidCalendarDate`] if a number does not fit its field.
pub fn parse_date(token: &str) -> Result<DateFields, DateTimeError> {
    let caps = DMY_PATTERN
        .captures(token)
        .or_else(|| MDY_PATTERN.captures(token))
        .or_else(|| YMD_PATTERN.captures(token))
        .ok_or_else(|| DateTimeError::UnrecognizedDateFormat(token.to_string()))?;

    let number = |name: &str, field: DateTimeField| -> Result<Option<u32>, DateTimeError> {
        caps.name(name)
            .map(|m| {
                parse_number(m.as_str())
                    .map_err(|value| DateTimeError::InvalidCalendarDate { field, value })
            })
            .transpose()
    };

    let month = number("month", DateTimeField::Month)?.unwrap_or_default();
    let day = number("day", DateTimeField::Day)?;
    let year = number("year", DateTimeField::Year)?
        .map(|y| {
            i32::try_from(y).map_err(|_| DateTimeError::InvalidCalendarDate {
                field: DateTimeField::Year,
                value: u64::from(y),
            })
        })
        .transpose()?;

    Ok(DateFields { year, month, day })
}

/// Parse a time token.
///
/// Formats are tried in order: `HH:MM[:SS]`, `HH[:MM[:SS]]am|pm` and, only
/// when a date token was also given, a bare `HH`.
///
/// # Errors
///
/// Returns [`DateTimeError::UnrecognizedTimeFormat`] if no format matches, or
/// [`DateTimeError::InvalidTime`] if a number is too large for its field.
pub fn parse_time(token: &str, has_date: bool) -> Result<TimeFields, DateTimeError> {
    let caps = CLOCK_PATTERN
        .captures(token)
        .or_else(|| MERIDIEM_PATTERN.captures(token))
        .or_else(|| has_date.then(|| HOUR_PATTERN.captures(token)).flatten())
        .ok_or_else(|| DateTimeError::UnrecognizedTimeFormat(token.to_string()))?;

    let hour = time_field(&caps, "hour", DateTimeField::Hour)?.unwrap_or(0);
    let minute = time_field(&caps, "minute", DateTimeField::Minute)?;
    let second = time_field(&caps, "second", DateTimeField::Second)?;
    let meridiem = caps.name("meridiem").map(|m| match m.as_str() {
        "am" => Meridiem::Am,
        _ => Meridiem::Pm,
    });

    Ok(TimeFields {
        hour,
        minute,
        second,
        meridiem,
    })
}

fn time_field(
    caps: &Captures<'_>,
    name: &str,
    field: DateTimeField,
) -> Result<Option<u32>, DateTimeError> {
    caps.name(name)
        .map(|m| {
            parse_number(m.as_str()).map_err(|value| DateTimeError::InvalidTime { field, value })
        })
        .transpose()
}

/// Parse a run of digits, returning the (saturated) value if it overflows a `u32`.
fn parse_number(digits: &str) -> Result<u32, u64> {
    let value = digits.parse::<u64>().unwrap_or(u64::MAX);
    u32::try_from(value).map_err(|_| value)
}

/// Build a calendar date, naming the field that makes it invalid.
fn calendar_date(year: i32, month: u32, day: u32) -> Result<NaiveDate, DateTimeError> {
    if !(1..=12).contains(&month) {
        return Err(DateTimeError::InvalidCalendarDate {
            field: DateTimeField::Month,
            value: u64::from(month),
        });
    }
    if !YEAR_RANGE.contains(&year) {
        return Err(DateTimeError::InvalidCalendarDate {
            field: DateTimeField::Year,
            value: u64::from(year.unsigned_abs()),
        });
    }
    NaiveDate::from_ymd_opt(year, month, day).ok_or(DateTimeError::InvalidCalendarDate {
        field: DateTimeField::Day,
        value: u64::from(day),
    })
}

/// Today at `time`, or tomorrow if that is not after `now`.
fn next_occurrence(time: NaiveTime, now: NaiveDateTime) -> NaiveDateTime {
    let today = NaiveDateTime::new(now.date(), time);
    if today > now {
        today
    } else {
        today + Duration::days(1)
    }
}

/// The first year, starting from the current one, in which month/day at
/// `time` lies after `now`.
///
/// Years in which the date does not exist (Feb 29 outside leap years) are
/// skipped. The search gives up after [`MAX_YEAR_SEARCH`] years.
fn nearest_year(
    month: u32,
    day: u32,
    time: NaiveTime,
    now: NaiveDateTime,
) -> Result<NaiveDateTime, DateTimeError> {
    calendar_date(LEAP_YEAR, month, day)?;

    (now.year()..now.year() + MAX_YEAR_SEARCH)
        .filter_map(|year| NaiveDate::from_ymd_opt(year, month, day))
        .map(|date| NaiveDateTime::new(date, time))
        .find(|candidate| *candidate > now)
        .ok_or(DateTimeError::InvalidCalendarDate {
            field: DateTimeField::Year,
            value: u64::from(now.year().unsigned_abs()),
        })
}
