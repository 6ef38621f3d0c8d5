use chrono::{DateTime, Datelike, Local, TimeDelta};

/// Placeholder shown when the start time of a process is unknown
pub const UNKNOWN_START_TIME: &str = "--";

/// Format a process start time relative to the current time.
///
/// - started less than 24 hours ago: `HH:MM`
/// - started earlier this calendar year: `MonDD`, e.g. `Jul10`
/// - started in a previous year: `YYYY`
pub fn format_start_time(start_time: Option<&DateTime<Local>>) -> String {
    format_start_time_at(start_time, &Local::now())
}

pub fn format_start_time_at(start_time: Option<&DateTime<Local>>, now: &DateTime<Local>) -> String {
    let Some(start_time) = start_time else {
        return UNKNOWN_START_TIME.to_string();
    };

    if now.signed_duration_since(start_time) < TimeDelta::hours(24) {
        start_time.format("%H:%M").to_string()
    } else if start_time.year() == now.year() {
        start_time.format("%b%d").to_string()
    } else {
        start_time.format("%Y").to_string()
    }
}
