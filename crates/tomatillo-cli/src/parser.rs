use anyhow::{anyhow, Result};
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_english::{parse_date_string, Dialect};
use tomatillo_core::slot::Slot;

/// Parses an ISO date or a relative phrase ("yesterday", "last friday")
/// against `today`.
pub fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }

    // Anchor relative phrases at midday so the result is a whole day.
    let noon = today
        .and_hms_opt(12, 0, 0)
        .ok_or_else(|| anyhow!("Invalid reference date {}", today))?;
    parse_date_string(input, Utc.from_utc_datetime(&noon), Dialect::Uk)
        .map(|parsed| parsed.date_naive())
        .map_err(|e| anyhow!("Failed to parse date '{}': {}", input, e))
}

/// Parses a 24-hour `HH:MM` wall-clock time and returns the slot containing it.
pub fn parse_at(input: &str) -> Result<Slot> {
    let time = NaiveTime::parse_from_str(input.trim(), "%H:%M")
        .map_err(|_| anyhow!("Invalid time '{}': expected HH:MM, e.g. 09:45", input))?;
    Ok(Slot::from_time(time))
}

/// Picks the slot from either an explicit index or a wall-clock time.
pub fn resolve_slot(slot: Option<u32>, at: Option<&str>) -> Result<Slot> {
    match (slot, at) {
        (Some(index), _) => Ok(Slot::new(index)?),
        (None, Some(at)) => parse_at(at),
        (None, None) => Err(anyhow!("Either --slot or --at is required")),
    }
}
