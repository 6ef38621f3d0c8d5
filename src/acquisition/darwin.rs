use super::ps::{LSTART_WORDS, parse_lstart, parse_metric, parse_output, parse_pid, run_ps};
use super::{PlatformDetector, ProcessSource};
use crate::prelude::*;
use crate::process::ProcessRecord;
use lazy_static::lazy_static;
use std::time::Duration;

const PS_ARGS: [&str; 2] = ["-axo", "pid,ppid,user,pcpu,pmem,rss,lstart,time,command"];
const MIN_FIELDS: usize = 9;
const LSTART_START: usize = 6;
const TIME_FIELD: usize = LSTART_START + LSTART_WORDS;
/// pid through time plus at least one word of command
const FULL_FIELDS: usize = TIME_FIELD + 2;

lazy_static! {
    static ref CPU_TIME_REGEX: regex::Regex =
        regex::Regex::new(r"^(?P<minutes>\d+):(?P<seconds>\d+(?:\.\d+)?)$").unwrap();
}

/// BSD `ps` as shipped with macOS
pub struct DarwinPs;

impl PlatformDetector for DarwinPs {
    fn detect() -> bool {
        std::env::consts::OS == "macos"
    }
}

impl ProcessSource for DarwinPs {
    fn name(&self) -> &'static str {
        "macOS ps"
    }

    fn processes(&self) -> Result<Vec<ProcessRecord>> {
        let output = run_ps(&PS_ARGS)?;
        Ok(parse_darwin_output(&output))
    }
}

pub(crate) fn parse_darwin_output(output: &str) -> Vec<ProcessRecord> {
    parse_output(output, parse_fields)
}

fn parse_fields(fields: &[&str]) -> Option<ProcessRecord> {
    if fields.len() < MIN_FIELDS {
        return None;
    }

    let (start_time, cpu_time, command) = if fields.len() >= FULL_FIELDS {
        (
            parse_lstart(&fields[LSTART_START..TIME_FIELD]),
            parse_cpu_time(fields[TIME_FIELD]),
            fields[TIME_FIELD + 1..].join(" "),
        )
    } else {
        (None, Duration::ZERO, fields[8..].join(" "))
    };

    Some(ProcessRecord {
        pid: parse_pid(fields[0])?,
        ppid: parse_pid(fields[1])?,
        user: fields[2].to_string(),
        cpu_percent: parse_metric(fields[3]),
        mem_percent: parse_metric(fields[4]),
        rss_kb: parse_metric(fields[5]),
        start_time,
        cpu_time,
        command,
    })
}

/// Parse `M:SS.ss`, minutes are not wrapped into hours
fn parse_cpu_time(time: &str) -> Duration {
    let Some(captures) = CPU_TIME_REGEX.captures(time) else {
        return Duration::ZERO;
    };
    let minutes: u64 = captures["minutes"].parse().unwrap_or(0);
    let seconds: f64 = captures["seconds"].parse().unwrap_or(0.0);
    Duration::from_secs(minutes * 60) + Duration::from_secs_f64(seconds)
}
