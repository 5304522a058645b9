//! Squid date codec: `dd/Mon/yyyy:hh:mm:ss ±hhmm` to Unix epoch and back.
//!
//! The trailing timezone of the input string is ignored; conversion uses
//! the running process's local time zone in both directions, so
//! `unix_timestamp(unix_to_squid_date(e)) == e` holds regardless of where
//! the process runs.

use chrono::offset::LocalResult;
use chrono::{Local, TimeZone};

use crate::error::{ParseError, ParseResult};
use crate::pattern::SQUID_DATE;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Whether `s` is one of the twelve month abbreviations ("Jan".."Dec").
pub fn is_month(s: &str) -> bool {
    MONTHS.contains(&s)
}

/// Month abbreviation to number (1..=12), or `None` for anything else.
pub fn month_to_number(s: &str) -> Option<u32> {
    MONTHS.iter().position(|&m| m == s).map(|i| i as u32 + 1)
}

/// Month number (1..=12) to abbreviation, or `None` out of range.
pub fn number_to_month(m: u32) -> Option<&'static str> {
    if (1..=12).contains(&m) {
        Some(MONTHS[m as usize - 1])
    } else {
        None
    }
}

/// Convert a human-readable Squid date to a Unix timestamp.
///
/// Validates day (1..=31), month abbreviation, year (>= 1970), hour
/// (0..=23), minute and second (0..=59) before conversion; a date that
/// passes the ranges but is calendar-impossible (e.g. `31/Feb`) is still
/// rejected. The timezone suffix, if present, is ignored.
pub fn unix_timestamp(d: &str) -> ParseResult<u32> {
    let caps = SQUID_DATE
        .captures(d)
        .ok_or_else(|| ParseError::InvalidDate(d.to_string()))?;

    // The capture shapes guarantee these are short digit runs.
    let day: u32 = caps[1].parse().unwrap();
    let month = month_to_number(&caps[2]).ok_or_else(|| ParseError::InvalidDate(d.to_string()))?;
    let year: i32 = caps[3].parse().unwrap();
    let hour: u32 = caps[4].parse().unwrap();
    let minute: u32 = caps[5].parse().unwrap();
    let second: u32 = caps[6].parse().unwrap();

    if !(1..=31).contains(&day) || year < 1970 {
        return Err(ParseError::InvalidDate(d.to_string()));
    }
    if hour > 23 || minute > 59 || second > 59 {
        return Err(ParseError::InvalidTime(d.to_string()));
    }

    match Local.with_ymd_and_hms(year, month, day, hour, minute, second) {
        LocalResult::Single(dt) => Ok(dt.timestamp() as u32),
        // DST fold: both instants carry the same wall-clock text; take the
        // earlier one.
        LocalResult::Ambiguous(dt, _) => Ok(dt.timestamp() as u32),
        LocalResult::None => Err(ParseError::InvalidDate(d.to_string())),
    }
}

/// Convert a Unix timestamp to the human-readable Squid date format,
/// rendered in the process's local time zone.
pub fn unix_to_squid_date(uts: u32) -> String {
    match Local.timestamp_opt(i64::from(uts), 0) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
            dt.format("%d/%b/%Y:%H:%M:%S %z").to_string()
        }
        LocalResult::None => String::new(),
    }
}
