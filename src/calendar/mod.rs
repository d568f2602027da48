pub mod clock;
pub mod event;
pub mod holiday;
pub mod price;

pub use clock::{ClockTime, TimeParseError};
pub use event::{DayOfWeek, TimedEvent};
pub use holiday::{
    easter_sunday, FixedHoliday, Holiday, HolidayCalendar, HolidayKind, HolidayLookup,
    MonthDay, MovableHoliday,
};
pub use price::{Price, SessionPrice, Treatment};
