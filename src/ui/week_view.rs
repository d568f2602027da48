use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app::ScheduleState;
use crate::calendar::{ClockTime, DayOfWeek, HolidayLookup, TimeParseError, TimedEvent};

const HOURS_PER_DAY: f64 = 24.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("Booking '{title}' has an unreadable time: {source}")]
    Time {
        title: String,
        #[source]
        source: TimeParseError,
    },
    #[error("Booking '{title}' ends before it starts")]
    EndBeforeStart { title: String },
}

/// What to do with a booking whose end time is earlier than its start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OvernightPolicy {
    Reject,
    /// Collapse to zero height at the start time.
    #[default]
    Clamp,
    /// Run to the bottom of the column.
    Wrap,
}

/// What to do with a booking whose times cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedTimePolicy {
    #[default]
    Skip,
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutOptions {
    pub overnight: OvernightPolicy,
    pub malformed_times: MalformedTimePolicy,
}

/// Seven consecutive dates, Sunday first, except where saturated at chrono's date bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekSpan([NaiveDate; 7]);

impl WeekSpan {
    pub fn start(&self) -> NaiveDate {
        self.0[0]
    }

    pub fn end(&self) -> NaiveDate {
        self.0[6]
    }

    pub fn dates(&self) -> &[NaiveDate; 7] {
        &self.0
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start() <= date && date <= self.end()
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.0.iter().copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventPosition {
    pub top_percent: f64,
    pub height_percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionedEvent {
    pub title: String,
    pub start: ClockTime,
    pub end: ClockTime,
    pub position: EventPosition,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnContent {
    Holiday { name: String },
    Schedule { events: Vec<PositionedEvent> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub day_of_week: DayOfWeek,
    pub is_today: bool,
    pub is_selected: bool,
    pub content: ColumnContent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekLayout {
    pub week: WeekSpan,
    pub days: Vec<DayColumn>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourMarker {
    pub hour: u32,
    pub label: String,
    pub top_percent: f64,
}

/// The Sunday-first week containing `reference`.
///
/// At chrono's date bounds the span saturates: the first day stops at
/// `NaiveDate::MIN` and trailing days repeat `NaiveDate::MAX`.
pub fn week_dates_for(reference: NaiveDate) -> WeekSpan {
    let days_from_sunday = reference.weekday().num_days_from_sunday() as u64;
    let sunday = reference
        .checked_sub_days(Days::new(days_from_sunday))
        .unwrap_or(NaiveDate::MIN);
    WeekSpan(std::array::from_fn(|offset| {
        sunday
            .checked_add_days(Days::new(offset as u64))
            .unwrap_or(NaiveDate::MAX)
    }))
}

/// Vertical placement of `event` inside a 24-hour column, in percent.
pub fn position_for(
    event: &TimedEvent,
    options: &LayoutOptions,
) -> Result<EventPosition, LayoutError> {
    let (start, end) = event.clock_span().map_err(|source| LayoutError::Time {
        title: event.title.clone(),
        source,
    })?;
    position_between(&event.title, start, end, options.overnight)
}

fn position_between(
    title: &str,
    start: ClockTime,
    end: ClockTime,
    overnight: OvernightPolicy,
) -> Result<EventPosition, LayoutError> {
    let start_hour = start.fractional_hour();
    let mut end_hour = end.fractional_hour();

    if end_hour < start_hour {
        end_hour = match overnight {
            OvernightPolicy::Reject => {
                return Err(LayoutError::EndBeforeStart {
                    title: title.to_string(),
                });
            }
            OvernightPolicy::Clamp => start_hour,
            OvernightPolicy::Wrap => HOURS_PER_DAY,
        };
    }

    let top_percent = (start_hour / HOURS_PER_DAY * 100.0).clamp(0.0, 100.0);
    let height_percent = ((end_hour - start_hour) / HOURS_PER_DAY * 100.0).clamp(0.0, 100.0);

    Ok(EventPosition {
        top_percent,
        height_percent,
    })
}

/// Bookings that fall on `date`. The day label plays no part in the match.
pub fn events_for_column(events: &[TimedEvent], date: NaiveDate) -> Vec<&TimedEvent> {
    events.iter().filter(|e| e.raw_date == date).collect()
}

pub fn hour_markers() -> Vec<HourMarker> {
    (0..24)
        .map(|hour| {
            let label = match hour {
                0 => "12 AM".to_string(),
                h if h < 12 => format!("{} AM", h),
                12 => "12 PM".to_string(),
                h => format!("{} PM", h - 12),
            };
            HourMarker {
                hour,
                label,
                top_percent: hour as f64 / HOURS_PER_DAY * 100.0,
            }
        })
        .collect()
}

pub fn calculate_layout(
    state: &ScheduleState,
    holidays: &impl HolidayLookup,
    options: &LayoutOptions,
) -> Result<WeekLayout, LayoutError> {
    let week = week_dates_for(state.selected_date);
    let mut days = Vec::with_capacity(7);

    for date in week.iter() {
        let content = match holidays.holiday_name(date) {
            Some(name) => {
                tracing::debug!("{} is a holiday ({}), hiding its bookings", date, name);
                ColumnContent::Holiday { name }
            }
            None => ColumnContent::Schedule {
                events: position_column(&state.events, date, options)?,
            },
        };

        days.push(DayColumn {
            date,
            day_of_week: DayOfWeek::of(date),
            is_today: date == state.today,
            is_selected: date == state.selected_date,
            content,
        });
    }

    Ok(WeekLayout { week, days })
}

fn position_column(
    events: &[TimedEvent],
    date: NaiveDate,
    options: &LayoutOptions,
) -> Result<Vec<PositionedEvent>, LayoutError> {
    let mut positioned = Vec::new();

    for event in events_for_column(events, date) {
        let (start, end) = match event.clock_span() {
            Ok(span) => span,
            Err(source) => match options.malformed_times {
                MalformedTimePolicy::Skip => {
                    tracing::warn!("Skipping booking '{}' on {}: {}", event.title, date, source);
                    continue;
                }
                MalformedTimePolicy::Fail => {
                    return Err(LayoutError::Time {
                        title: event.title.clone(),
                        source,
                    });
                }
            },
        };

        let position = position_between(&event.title, start, end, options.overnight)?;
        positioned.push(PositionedEvent {
            title: event.title.clone(),
            start,
            end,
            position,
        });
    }

    positioned.sort_by_key(|e| e.start);
    Ok(positioned)
}
