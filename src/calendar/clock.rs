use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("Unparseable time: '{0}'")]
    Unparseable(String),
    #[error("Hour out of range for a 12-hour clock: {0}")]
    HourOutOfRange(u32),
    #[error("Minute out of range: {0}")]
    MinuteOutOfRange(u32),
}

/// A wall-clock time of day on a 24-hour scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
}

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime { hour: 0, minute: 0 };

    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    /// Parses `"9AM"`, `"9:30 pm"`, `"12:00AM"` and friends.
    ///
    /// The hour and the `:MM` part are both optional; the AM/PM suffix is not.
    /// A missing hour reads as 12, so a bare `"AM"` is midnight.
    pub fn parse_12h(input: &str) -> Result<Self, TimeParseError> {
        static TIME_RE: OnceLock<Regex> = OnceLock::new();
        let regex = TIME_RE.get_or_init(|| {
            Regex::new(r"(?i)^\s*(\d{1,2})?(?::(\d{2}))?\s*(am|pm)\s*$")
                .expect("invalid 12-hour time regex")
        });

        let caps = regex
            .captures(input)
            .ok_or_else(|| TimeParseError::Unparseable(input.to_string()))?;

        let hour = match caps.get(1) {
            Some(m) => m
                .as_str()
                .parse::<u32>()
                .map_err(|_| TimeParseError::Unparseable(input.to_string()))?,
            None => 12,
        };
        let minute = match caps.get(2) {
            Some(m) => m
                .as_str()
                .parse::<u32>()
                .map_err(|_| TimeParseError::Unparseable(input.to_string()))?,
            None => 0,
        };

        if hour > 12 {
            return Err(TimeParseError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(TimeParseError::MinuteOutOfRange(minute));
        }

        let is_pm = caps
            .get(3)
            .is_some_and(|m| m.as_str().eq_ignore_ascii_case("pm"));
        let hour = hour % 12 + if is_pm { 12 } else { 0 };

        Ok(Self { hour, minute })
    }

    pub fn fractional_hour(&self) -> f64 {
        self.hour as f64 + self.minute as f64 / 60.0
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour * 60 + self.minute
    }
}

impl FromStr for ClockTime {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_12h(s)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = if self.hour < 12 { "AM" } else { "PM" };
        let hour = match self.hour % 12 {
            0 => 12,
            h => h,
        };
        write!(f, "{}:{:02} {}", hour, self.minute, suffix)
    }
}
