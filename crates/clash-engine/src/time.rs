//! Time-of-day and weekday values for weekly recurring timetables.
//!
//! Everything downstream compares plain minutes since midnight. Raw strings
//! from forms or catalogs go through [`parse_time_of_day`] exactly once, at
//! data-entry time.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{ClashError, Result};

const MINUTES_PER_DAY: u16 = 24 * 60;

/// A wall-clock time with minute granularity, stored as minutes since
/// midnight (0..=1439). No date, no timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// Build from a 24-hour clock reading.
    pub fn new(hour: u16, minute: u16) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(ClashError::InvalidTimeFormat(format!(
                "{}:{:02} is out of range",
                hour, minute
            )));
        }
        Ok(TimeOfDay(hour * 60 + minute))
    }

    pub fn from_minutes(minutes: u16) -> Result<Self> {
        if minutes >= MINUTES_PER_DAY {
            return Err(ClashError::InvalidTimeFormat(format!(
                "{} minutes past midnight is out of range",
                minutes
            )));
        }
        Ok(TimeOfDay(minutes))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    pub fn to_naive_time(self) -> NaiveTime {
        // Always in range: the invariant keeps hour < 24 and minute < 60.
        NaiveTime::from_hms_opt(u32::from(self.hour()), u32::from(self.minute()), 0)
            .unwrap_or(NaiveTime::MIN)
    }
}

/// Seconds are dropped.
impl From<NaiveTime> for TimeOfDay {
    fn from(t: NaiveTime) -> Self {
        TimeOfDay((t.hour() * 60 + t.minute()) as u16)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = ClashError;

    fn from_str(s: &str) -> Result<Self> {
        parse_time_of_day(s)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ClashError;

    fn try_from(s: String) -> Result<Self> {
        parse_time_of_day(&s)
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> Self {
        t.to_string()
    }
}

/// Parse a time-of-day string into minutes since midnight.
///
/// Accepted forms:
/// - 24-hour `HH:MM` or `H:MM` (e.g. `"09:30"`, `"9:30"`, `"14:00"`)
/// - 12-hour `H:MM AM/PM` (e.g. `"2:00 PM"`, `"12:15am"`, `"9:30 p.m."`)
/// - 12-hour bare hour `H AM/PM` (e.g. `"9 AM"`)
///
/// The marker is case-insensitive and may follow the digits with or without a
/// space. 12 AM is 00:xx, 12 PM is 12:xx, other PM hours add 12.
///
/// # Errors
/// Returns `ClashError::InvalidTimeFormat` when the string matches none of the
/// forms, or when the hour or minute is out of range for the form used.
pub fn parse_time_of_day(raw: &str) -> Result<TimeOfDay> {
    let invalid = || ClashError::InvalidTimeFormat(raw.to_string());

    let normalized = raw.trim().to_ascii_uppercase();
    let (clock, pm) = match split_marker(&normalized) {
        Some((rest, is_pm)) => (rest, Some(is_pm)),
        None => (normalized.as_str(), None),
    };

    let (hour, minute) = match clock.split_once(':') {
        Some((h, m)) => {
            let hour = parse_digits(h, 2).ok_or_else(invalid)?;
            if m.len() != 2 {
                return Err(invalid());
            }
            let minute = parse_digits(m, 2).ok_or_else(invalid)?;
            (hour, minute)
        }
        // A bare hour is only meaningful with a marker ("9 AM").
        None if pm.is_some() => (parse_digits(clock, 2).ok_or_else(invalid)?, 0),
        None => return Err(invalid()),
    };

    if minute > 59 {
        return Err(invalid());
    }

    let hour = match pm {
        None if hour <= 23 => hour,
        Some(is_pm) if (1..=12).contains(&hour) => match (hour, is_pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, false) => h,
            (h, true) => h + 12,
        },
        _ => return Err(invalid()),
    };

    TimeOfDay::new(hour, minute).map_err(|_| invalid())
}

/// Split a trailing `AM`/`PM` marker (dotted or not) off an uppercased time.
fn split_marker(s: &str) -> Option<(&str, bool)> {
    [("A.M.", false), ("P.M.", true), ("AM", false), ("PM", true)]
        .into_iter()
        .find_map(|(marker, is_pm)| s.strip_suffix(marker).map(|rest| (rest.trim_end(), is_pm)))
}

fn parse_digits(s: &str, max_len: usize) -> Option<u16> {
    if s.is_empty() || s.len() > max_len || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Order two times of day. Equal times compare `Equal`; the overlap predicate
/// relies on this to keep back-to-back slots apart.
pub fn compare_time_of_day(a: TimeOfDay, b: TimeOfDay) -> Ordering {
    a.minutes().cmp(&b.minutes())
}

/// Day of the week, ordered Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WeekDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl WeekDay {
    pub const ALL: [WeekDay; 7] = [
        WeekDay::Monday,
        WeekDay::Tuesday,
        WeekDay::Wednesday,
        WeekDay::Thursday,
        WeekDay::Friday,
        WeekDay::Saturday,
        WeekDay::Sunday,
    ];

    /// The days classes actually meet on.
    pub const TEACHING: [WeekDay; 6] = [
        WeekDay::Monday,
        WeekDay::Tuesday,
        WeekDay::Wednesday,
        WeekDay::Thursday,
        WeekDay::Friday,
        WeekDay::Saturday,
    ];

    /// Zero-based index, Monday = 0.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            WeekDay::Monday => "Monday",
            WeekDay::Tuesday => "Tuesday",
            WeekDay::Wednesday => "Wednesday",
            WeekDay::Thursday => "Thursday",
            WeekDay::Friday => "Friday",
            WeekDay::Saturday => "Saturday",
            WeekDay::Sunday => "Sunday",
        }
    }

    pub fn short_name(self) -> &'static str {
        &self.name()[..3]
    }
}

impl fmt::Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts full names, three-letter abbreviations and two-letter iCalendar
/// codes, case-insensitive.
impl FromStr for WeekDay {
    type Err = ClashError;

    fn from_str(s: &str) -> Result<Self> {
        let day = match s.trim().to_ascii_lowercase().as_str() {
            "monday" | "mon" | "mo" => WeekDay::Monday,
            "tuesday" | "tue" | "tues" | "tu" => WeekDay::Tuesday,
            "wednesday" | "wed" | "we" => WeekDay::Wednesday,
            "thursday" | "thu" | "thur" | "thurs" | "th" => WeekDay::Thursday,
            "friday" | "fri" | "fr" => WeekDay::Friday,
            "saturday" | "sat" | "sa" => WeekDay::Saturday,
            "sunday" | "sun" | "su" => WeekDay::Sunday,
            _ => return Err(ClashError::UnknownWeekDay(s.to_string())),
        };
        Ok(day)
    }
}

impl TryFrom<String> for WeekDay {
    type Error = ClashError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<WeekDay> for String {
    fn from(d: WeekDay) -> Self {
        d.name().to_string()
    }
}

impl From<Weekday> for WeekDay {
    fn from(d: Weekday) -> Self {
        WeekDay::ALL[d.num_days_from_monday() as usize]
    }
}

impl From<WeekDay> for Weekday {
    fn from(d: WeekDay) -> Self {
        match d {
            WeekDay::Monday => Weekday::Mon,
            WeekDay::Tuesday => Weekday::Tue,
            WeekDay::Wednesday => Weekday::Wed,
            WeekDay::Thursday => Weekday::Thu,
            WeekDay::Friday => Weekday::Fri,
            WeekDay::Saturday => Weekday::Sat,
            WeekDay::Sunday => Weekday::Sun,
        }
    }
}
