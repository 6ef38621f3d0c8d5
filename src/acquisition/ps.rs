use crate::prelude::*;
use crate::process::{Pid, ProcessRecord};
use crate::tree::LISTING_PROGRAM;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use std::process::Command;

/// `lstart` as printed in the C locale, e.g. `Thu Jul 10 15:37:36 2025`
const LSTART_FORMAT: &str = "%a %b %d %H:%M:%S %Y";
/// Number of whitespace separated words in an `lstart` value
pub(super) const LSTART_WORDS: usize = 5;

/// Run the listing program with `args` and return its standard output
pub(super) fn run_ps(args: &[&str]) -> Result<String> {
    debug!("Listing processes with: {LISTING_PROGRAM} {}", args.join(" "));
    let output = Command::new(LISTING_PROGRAM)
        .args(args)
        .env("LC_ALL", "C")
        .output()
        .with_context(|| format!("Failed to run {LISTING_PROGRAM}"))?;

    if !output.status.success() {
        bail!(
            "{LISTING_PROGRAM} exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parse every line after the header with `parse_fields`, dropping lines it rejects
pub(super) fn parse_output(
    output: &str,
    parse_fields: impl Fn(&[&str]) -> Option<ProcessRecord>,
) -> Vec<ProcessRecord> {
    let records = output
        .lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let fields = line.split_whitespace().collect_vec();
            let record = parse_fields(&fields);
            if record.is_none() {
                trace!("Dropping malformed {LISTING_PROGRAM} line: {line}");
            }
            record
        })
        .collect_vec();
    debug!("Parsed {} process records", records.len());
    records
}

pub(super) fn parse_pid(field: &str) -> Option<Pid> {
    field.parse().ok()
}

/// Parse the words of an `lstart` column as a local time
pub(super) fn parse_lstart(words: &[&str]) -> Option<DateTime<Local>> {
    let naive = NaiveDateTime::parse_from_str(&words.join(" "), LSTART_FORMAT).ok()?;
    Local.from_local_datetime(&naive).earliest()
}

/// Parse a load metric, an unreadable value counts as 0
pub(super) fn parse_metric(field: &str) -> f64 {
    field.parse().unwrap_or(0.0)
}
