use chrono::{Days, NaiveDate};

use crate::calendar::TimedEvent;
use crate::ui::week_view::{self, WeekSpan};

/// View state for the weekly booking calendar, passed explicitly to the layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleState {
    pub selected_date: NaiveDate,
    pub today: NaiveDate,
    pub events: Vec<TimedEvent>,
}

impl ScheduleState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            selected_date: today,
            today,
            events: Vec::new(),
        }
    }

    pub fn with_events(mut self, events: Vec<TimedEvent>) -> Self {
        self.events = events;
        self
    }

    pub fn add_event(&mut self, event: TimedEvent) {
        self.events.push(event);
    }

    pub fn events_for_date(&self, date: NaiveDate) -> Vec<&TimedEvent> {
        week_view::events_for_column(&self.events, date)
    }

    pub fn week(&self) -> WeekSpan {
        week_view::week_dates_for(self.selected_date)
    }

    /// Stays put when a week later is past chrono's last date.
    pub fn next_week(&mut self) {
        if let Some(date) = self.selected_date.checked_add_days(Days::new(7)) {
            self.selected_date = date;
        }
    }

    /// Stays put when a week earlier is before chrono's first date.
    pub fn previous_week(&mut self) {
        if let Some(date) = self.selected_date.checked_sub_days(Days::new(7)) {
            self.selected_date = date;
        }
    }

    pub fn go_to_today(&mut self) {
        self.selected_date = self.today;
    }
}
