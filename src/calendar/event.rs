use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::clock::{ClockTime, TimeParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DayOfWeek {
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl DayOfWeek {
    pub fn of(date: NaiveDate) -> Self {
        date.weekday().into()
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            DayOfWeek::Sun => "Sun",
            DayOfWeek::Mon => "Mon",
            DayOfWeek::Tue => "Tue",
            DayOfWeek::Wed => "Wed",
            DayOfWeek::Thu => "Thu",
            DayOfWeek::Fri => "Fri",
            DayOfWeek::Sat => "Sat",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(value: Weekday) -> Self {
        match value {
            Weekday::Sun => DayOfWeek::Sun,
            Weekday::Mon => DayOfWeek::Mon,
            Weekday::Tue => DayOfWeek::Tue,
            Weekday::Wed => DayOfWeek::Wed,
            Weekday::Thu => DayOfWeek::Thu,
            Weekday::Fri => DayOfWeek::Fri,
            Weekday::Sat => DayOfWeek::Sat,
        }
    }
}

impl From<DayOfWeek> for Weekday {
    fn from(value: DayOfWeek) -> Self {
        match value {
            DayOfWeek::Sun => Weekday::Sun,
            DayOfWeek::Mon => Weekday::Mon,
            DayOfWeek::Tue => Weekday::Tue,
            DayOfWeek::Wed => Weekday::Wed,
            DayOfWeek::Thu => Weekday::Thu,
            DayOfWeek::Fri => Weekday::Fri,
            DayOfWeek::Sat => Weekday::Sat,
        }
    }
}

/// A booking as it arrives from the clinic's data layer.
///
/// `day_of_week` is a display label; `raw_date` is what places the booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedEvent {
    pub title: String,
    pub day_of_week: DayOfWeek,
    pub start_time: String,
    pub end_time: String,
    pub raw_date: NaiveDate,
}

impl TimedEvent {
    pub fn new(
        title: impl Into<String>,
        raw_date: NaiveDate,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            day_of_week: DayOfWeek::of(raw_date),
            start_time: start_time.into(),
            end_time: end_time.into(),
            raw_date,
        }
    }

    pub fn clock_span(&self) -> Result<(ClockTime, ClockTime), TimeParseError> {
        let start = ClockTime::parse_12h(&self.start_time)?;
        let end = ClockTime::parse_12h(&self.end_time)?;
        Ok((start, end))
    }

    pub fn day_label_matches_date(&self) -> bool {
        self.day_of_week == DayOfWeek::of(self.raw_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn new_event_derives_day_label_from_date() {
        let event = TimedEvent::new("Consultation", date(2024, 6, 19), "9:00AM", "10:00AM");
        assert_eq!(event.day_of_week, DayOfWeek::Wed);
        assert!(event.day_label_matches_date());
    }

    #[test]
    fn mismatched_day_label_is_detected() {
        let mut event = TimedEvent::new("Peel", date(2024, 6, 19), "9:00AM", "10:00AM");
        event.day_of_week = DayOfWeek::Fri;
        assert!(!event.day_label_matches_date());
    }

    #[test]
    fn clock_span_parses_both_ends() {
        let event = TimedEvent::new("Laser", date(2024, 6, 19), "9:00AM", "5:30PM");
        let (start, end) = event.clock_span().unwrap();
        assert_eq!(start, ClockTime::new(9, 0).unwrap());
        assert_eq!(end, ClockTime::new(17, 30).unwrap());
    }

    #[test]
    fn clock_span_reports_the_bad_end() {
        let event = TimedEvent::new("Laser", date(2024, 6, 19), "9:00AM", "later");
        assert_eq!(
            event.clock_span(),
            Err(TimeParseError::Unparseable("later".to_string()))
        );
    }

    #[test]
    fn deserializes_from_camel_case_json() {
        let json = r#"{
            "title": "Filler review",
            "dayOfWeek": "MON",
            "startTime": "11:00AM",
            "endTime": "11:30AM",
            "rawDate": "2024-06-17"
        }"#;
        let event: TimedEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.day_of_week, DayOfWeek::Mon);
        assert_eq!(event.raw_date, date(2024, 6, 17));
    }

    #[test]
    fn weekday_conversion_is_symmetric_for_sunday() {
        assert_eq!(Weekday::from(DayOfWeek::Sun), Weekday::Sun);
        assert_eq!(DayOfWeek::from(Weekday::Sat), DayOfWeek::Sat);
    }
}
