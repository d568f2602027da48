use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::config::HolidayConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HolidayError {
    #[error("Invalid month-day '{0}', expected MM-DD")]
    InvalidMonthDay(String),
}

/// A month and day without a year, written `MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    /// Accepts any day that exists in at least one year, so `02-29` is valid.
    pub fn new(month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(2000, month, day).map(|_| Self { month, day })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn in_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

impl FromStr for MonthDay {
    type Err = HolidayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || HolidayError::InvalidMonthDay(s.to_string());
        let (month, day) = s.split_once('-').ok_or_else(invalid)?;
        if month.len() != 2 || day.len() != 2 {
            return Err(invalid());
        }
        let month = month.parse().map_err(|_| invalid())?;
        let day = day.parse().map_err(|_| invalid())?;
        Self::new(month, day).ok_or_else(invalid)
    }
}

impl TryFrom<String> for MonthDay {
    type Error = HolidayError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthDay> for String {
    fn from(value: MonthDay) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolidayKind {
    Fixed,
    Movable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Holiday {
    pub month_day: MonthDay,
    pub name: String,
    pub kind: HolidayKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedHoliday {
    pub month_day: MonthDay,
    pub name: String,
}

/// A holiday placed a fixed number of days from Easter Sunday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovableHoliday {
    pub name: String,
    pub days_from_easter: i64,
}

/// Answers "is this date a holiday, and what is it called?".
#[cfg_attr(test, mockall::automock)]
pub trait HolidayLookup {
    fn holiday_name(&self, date: NaiveDate) -> Option<String>;

    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holiday_name(date).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayCalendar {
    fixed: Vec<FixedHoliday>,
    movable: Vec<MovableHoliday>,
}

impl Default for HolidayCalendar {
    fn default() -> Self {
        Self::new(default_fixed_holidays(), default_movable_holidays())
    }
}

pub(crate) fn default_fixed_holidays() -> Vec<FixedHoliday> {
    [(1, 1, "New Year's Day"), (12, 25, "Christmas Day"), (12, 31, "New Year's Eve")]
        .into_iter()
        .filter_map(|(month, day, name)| {
            MonthDay::new(month, day).map(|month_day| FixedHoliday {
                month_day,
                name: name.to_string(),
            })
        })
        .collect()
}

pub(crate) fn default_movable_holidays() -> Vec<MovableHoliday> {
    vec![
        MovableHoliday {
            name: "Maundy Thursday".to_string(),
            days_from_easter: -3,
        },
        MovableHoliday {
            name: "Good Friday".to_string(),
            days_from_easter: -2,
        },
    ]
}

impl HolidayCalendar {
    pub fn new(fixed: Vec<FixedHoliday>, movable: Vec<MovableHoliday>) -> Self {
        Self { fixed, movable }
    }

    pub fn from_config(config: &HolidayConfig) -> Self {
        Self::new(config.fixed.clone(), config.movable.clone())
    }

    /// Fixed holidays first, then the movable ones computed for `year`.
    ///
    /// Movable holidays whose offset pushes them out of `year`, or out of
    /// chrono's date range, are dropped.
    pub fn holidays_for_year(&self, year: i32) -> Vec<Holiday> {
        let mut holidays: Vec<Holiday> = self
            .fixed
            .iter()
            .map(|h| Holiday {
                month_day: h.month_day,
                name: h.name.clone(),
                kind: HolidayKind::Fixed,
            })
            .collect();

        let Some(easter) = easter_sunday(year) else {
            tracing::warn!("No Easter date for year {}, skipping movable holidays", year);
            return holidays;
        };

        holidays.extend(self.movable.iter().filter_map(|h| {
            let date = Duration::try_days(h.days_from_easter)
                .and_then(|offset| easter.checked_add_signed(offset))?;
            (date.year() == year).then(|| Holiday {
                month_day: MonthDay::of(date),
                name: h.name.clone(),
                kind: HolidayKind::Movable,
            })
        }));

        holidays
    }

    /// Holidays of `year` paired with their concrete dates, in date order.
    pub fn dated_holidays(&self, year: i32) -> Vec<(NaiveDate, Holiday)> {
        let mut dated: Vec<_> = self
            .holidays_for_year(year)
            .into_iter()
            .filter_map(|h| h.month_day.in_year(year).map(|date| (date, h)))
            .collect();
        dated.sort_by_key(|(date, _)| *date);
        dated
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holiday_name(date).is_some()
    }

    pub fn holiday_name(&self, date: NaiveDate) -> Option<String> {
        let key = MonthDay::of(date);
        self.holidays_for_year(date.year())
            .into_iter()
            .find(|h| h.month_day == key)
            .map(|h| h.name)
    }
}

impl HolidayLookup for HolidayCalendar {
    fn holiday_name(&self, date: NaiveDate) -> Option<String> {
        HolidayCalendar::holiday_name(self, date)
    }
}

/// Gregorian Easter Sunday by the Meeus/Jones/Butcher algorithm.
///
/// Returns `None` only when `year` is outside chrono's representable range.
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b.div_euclid(4);
    let e = b.rem_euclid(4);
    let f = (b + 8).div_euclid(25);
    let g = (b - f + 1).div_euclid(3);
    let h = (19 * a + b - d - g + 15).rem_euclid(30);
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k).rem_euclid(7);
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}
