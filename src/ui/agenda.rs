use chrono::Datelike;

use crate::calendar::HolidayCalendar;
use crate::ui::week_view::{ColumnContent, WeekLayout};

pub fn render_week(layout: &WeekLayout) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Week {} - {}",
        layout.week.start().format("%b %d"),
        layout.week.end().format("%b %d, %Y")
    ));

    for day in &layout.days {
        lines.push(String::new());

        let mut header = format!(
            "{} {:>2} {}",
            day.day_of_week.short_name(),
            day.date.day(),
            day.date.format("%b")
        );
        if day.is_today {
            header.push_str("  (today)");
        }
        lines.push(header);

        match &day.content {
            ColumnContent::Holiday { name } => lines.push(format!("  Holiday: {}", name)),
            ColumnContent::Schedule { events } if events.is_empty() => {
                lines.push("  No bookings".to_string());
            }
            ColumnContent::Schedule { events } => {
                for event in events {
                    let time_label = format!("{} - {}", event.start, event.end);
                    lines.push(format!(
                        "  {:<19} {}  [top {:.1}%, height {:.1}%]",
                        time_label,
                        event.title,
                        event.position.top_percent,
                        event.position.height_percent
                    ));
                }
            }
        }
    }

    lines.join("\n")
}

pub fn render_holidays(year: i32, calendar: &HolidayCalendar) -> String {
    let mut lines = vec![format!("Holidays {}", year), String::new()];
    for (date, holiday) in calendar.dated_holidays(year) {
        lines.push(format!("{}  {}", date.format("%Y-%m-%d"), holiday.name));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ScheduleState;
    use crate::calendar::TimedEvent;
    use crate::ui::week_view::{calculate_layout, LayoutOptions};
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn easter_week() -> String {
        let state = ScheduleState::new(date(2024, 3, 27)).with_events(vec![
            TimedEvent::new("Hydrafacial", date(2024, 3, 27), "9:00AM", "5:00PM"),
            TimedEvent::new("Botox", date(2024, 3, 29), "10:00AM", "11:00AM"),
        ]);
        let layout = calculate_layout(
            &state,
            &HolidayCalendar::default(),
            &LayoutOptions::default(),
        )
        .unwrap();
        render_week(&layout)
    }

    #[test]
    fn header_shows_week_range() {
        let text = easter_week();
        assert!(text.starts_with("Week Mar 24 - Mar 30, 2024"));
    }

    #[test]
    fn bookings_show_times_and_position() {
        let text = easter_week();
        assert!(text.contains("Wed 27 Mar  (today)"));
        assert!(text.contains("9:00 AM - 5:00 PM"));
        assert!(text.contains("Hydrafacial  [top 37.5%, height 33.3%]"));
    }

    #[test]
    fn holidays_replace_bookings() {
        let text = easter_week();
        assert!(text.contains("Fri 29 Mar\n  Holiday: Good Friday"));
        assert!(!text.contains("Botox"));
    }

    #[test]
    fn empty_days_say_so() {
        let text = easter_week();
        assert!(text.contains("Mon 25 Mar\n  No bookings"));
    }

    #[test]
    fn holiday_listing_is_dated_and_ordered() {
        let text = render_holidays(2024, &HolidayCalendar::default());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Holidays 2024");
        assert_eq!(lines[2], "2024-01-01  New Year's Day");
        assert_eq!(lines[4], "2024-03-29  Good Friday");
        assert_eq!(lines.last().copied(), Some("2024-12-31  New Year's Eve"));
    }
}
