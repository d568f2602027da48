pub mod app;
pub mod calendar;
pub mod storage;
pub mod ui;

pub use app::ScheduleState;
pub use calendar::{HolidayCalendar, HolidayLookup, TimedEvent};
pub use ui::week_view::{calculate_layout, LayoutOptions, WeekLayout};
