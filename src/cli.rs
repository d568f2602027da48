use std::{
    env,
    io::{self, Write},
    path::PathBuf,
    process::{Command, Stdio},
};

use anyhow::Context;
use chrono::{Local, NaiveDate};

use prism_schedule::{
    app::ScheduleState,
    calendar::HolidayCalendar,
    storage::{bookings::load_bookings, config::Config},
    ui::{agenda, week_view},
};

pub const USAGE: &str =
    "Usage: prism [--week [YYYY/MM/DD]] [--events FILE] [--config FILE] [--holidays YEAR]";

#[derive(Debug, Clone, PartialEq)]
pub enum CliMode {
    Week(NaiveDate),
    Holidays(i32),
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CliOptions {
    pub mode: CliMode,
    pub events: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

pub fn parse_cli_mode() -> Result<CliOptions, String> {
    parse_args(env::args().skip(1), Local::now().date_naive())
}

pub fn parse_args<I>(args: I, today: NaiveDate) -> Result<CliOptions, String>
where
    I: IntoIterator<Item = String>,
{
    let mut mode = CliMode::Week(today);
    let mut events = None;
    let mut config = None;
    let mut args = args.into_iter().peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--week" => {
                let target_date = match args.next_if(|next| !next.starts_with("--")) {
                    Some(date_str) => NaiveDate::parse_from_str(&date_str, "%Y/%m/%d")
                        .map_err(|_| format!("Invalid date '{}'. Use YYYY/MM/DD.", date_str))?,
                    None => today,
                };
                mode = CliMode::Week(target_date);
            }
            "--holidays" => {
                let year = args
                    .next()
                    .ok_or_else(|| "--holidays needs a year".to_string())?;
                let year = year
                    .parse::<i32>()
                    .map_err(|_| format!("Invalid year '{}'.", year))?;
                mode = CliMode::Holidays(year);
            }
            "--events" => {
                let path = args
                    .next()
                    .ok_or_else(|| "--events needs a file path".to_string())?;
                events = Some(PathBuf::from(path));
            }
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| "--config needs a file path".to_string())?;
                config = Some(PathBuf::from(path));
            }
            "--help" => mode = CliMode::Help,
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    Ok(CliOptions {
        mode,
        events,
        config,
    })
}

pub fn run(options: &CliOptions) -> anyhow::Result<()> {
    match options.mode {
        CliMode::Week(date) => {
            let config = load_config(options)?;
            let events = match &options.events {
                Some(path) => load_bookings(path)
                    .with_context(|| format!("Could not load bookings from {}", path.display()))?,
                None => Vec::new(),
            };

            let mut state = ScheduleState::new(Local::now().date_naive()).with_events(events);
            state.selected_date = date;

            let calendar = HolidayCalendar::from_config(&config.holidays);
            let layout = week_view::calculate_layout(&state, &calendar, &config.layout_options())
                .context("Could not lay out the week")?;
            display_with_pager(&agenda::render_week(&layout))?;
        }
        CliMode::Holidays(year) => {
            let config = load_config(options)?;
            let calendar = HolidayCalendar::from_config(&config.holidays);
            display_with_pager(&agenda::render_holidays(year, &calendar))?;
        }
        CliMode::Help => println!("{USAGE}"),
    }

    Ok(())
}

fn load_config(options: &CliOptions) -> anyhow::Result<Config> {
    match &options.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Could not load config from {}", path.display())),
        None => Config::load_or_create().context("Could not load config"),
    }
}

fn display_with_pager(text: &str) -> Result<(), io::Error> {
    let pager_value = env::var("PAGER").unwrap_or_else(|_| "less".to_string());
    let mut parts = pager_value.split_whitespace();
    let cmd = match parts.next() {
        Some(c) => c,
        None => {
            println!("{text}");
            return Ok(());
        }
    };
    let args: Vec<&str> = parts.collect();

    match Command::new(cmd)
        .args(&args)
        .stdin(Stdio::piped())
        .spawn()
    {
        Ok(mut child) => {
            if let Some(stdin) = child.stdin.as_mut() {
                stdin.write_all(text.as_bytes())?;
                stdin.write_all(b"\n")?;
            }
            let _ = child.wait();
        }
        Err(e) => {
            tracing::warn!("Pager '{}' unavailable: {}", cmd, e);
            println!("{text}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 19).unwrap()
    }

    fn parse(args: &[&str]) -> Result<CliOptions, String> {
        parse_args(args.iter().map(|a| a.to_string()), today())
    }

    #[test]
    fn no_arguments_shows_current_week() {
        let options = parse(&[]).unwrap();
        assert_eq!(options.mode, CliMode::Week(today()));
        assert_eq!(options.events, None);
    }

    #[test]
    fn week_accepts_a_date() {
        let options = parse(&["--week", "2024/03/27"]).unwrap();
        assert_eq!(
            options.mode,
            CliMode::Week(NaiveDate::from_ymd_opt(2024, 3, 27).unwrap())
        );
    }

    #[test]
    fn week_without_date_uses_today() {
        let options = parse(&["--week", "--events", "bookings.json"]).unwrap();
        assert_eq!(options.mode, CliMode::Week(today()));
        assert_eq!(options.events, Some(PathBuf::from("bookings.json")));
    }

    #[test]
    fn invalid_week_date_is_rejected() {
        let err = parse(&["--week", "19-06-2024"]).unwrap_err();
        assert!(err.contains("YYYY/MM/DD"));
    }

    #[test]
    fn holidays_mode_needs_a_year() {
        assert_eq!(parse(&["--holidays", "2025"]).unwrap().mode, CliMode::Holidays(2025));
        assert!(parse(&["--holidays"]).is_err());
        assert!(parse(&["--holidays", "soon"]).is_err());
    }

    #[test]
    fn config_path_is_captured() {
        let options = parse(&["--config", "/tmp/prism.toml"]).unwrap();
        assert_eq!(options.config, Some(PathBuf::from("/tmp/prism.toml")));
    }

    #[test]
    fn help_runs_without_touching_a_broken_config() {
        let options = CliOptions {
            mode: CliMode::Help,
            events: None,
            config: Some(PathBuf::from("/nonexistent/prism/config.toml")),
        };
        assert!(run(&options).is_ok());
    }

    #[test]
    fn holidays_mode_reports_an_unreadable_config() {
        let options = CliOptions {
            mode: CliMode::Holidays(2024),
            events: None,
            config: Some(PathBuf::from("/nonexistent/prism/config.toml")),
        };
        assert!(run(&options).is_err());
    }

    #[test]
    fn unknown_argument_is_an_error() {
        assert_eq!(parse(&["--sample"]).unwrap_err(), "Unknown argument: --sample");
    }
}
