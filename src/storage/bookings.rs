use std::path::Path;

use thiserror::Error;

use crate::calendar::TimedEvent;

#[derive(Debug, Error)]
pub enum BookingsError {
    #[error("Failed to read bookings file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse bookings: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Reads a JSON array of bookings.
pub fn parse_bookings(content: &str) -> Result<Vec<TimedEvent>, BookingsError> {
    let events: Vec<TimedEvent> = serde_json::from_str(content)?;

    for event in events.iter().filter(|e| !e.day_label_matches_date()) {
        tracing::debug!(
            "Booking '{}' is labelled {:?} but falls on {}",
            event.title,
            event.day_of_week,
            event.raw_date
        );
    }

    Ok(events)
}

pub fn load_bookings(path: &Path) -> Result<Vec<TimedEvent>, BookingsError> {
    let content = std::fs::read_to_string(path)?;
    let events = parse_bookings(&content)?;
    tracing::info!("Loaded {} bookings from {}", events.len(), path.display());
    Ok(events)
}
