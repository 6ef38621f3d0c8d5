use super::ps::{LSTART_WORDS, parse_lstart, parse_metric, parse_output, parse_pid, run_ps};
use super::{PlatformDetector, ProcessSource};
use crate::prelude::*;
use crate::process::ProcessRecord;
use lazy_static::lazy_static;
use std::time::Duration;

const PS_ARGS: [&str; 2] = ["-eo", "pid,ppid,user,pcpu,pmem,rss,lstart,time,cmd"];
const LSTART_START: usize = 6;
const TIME_FIELD: usize = LSTART_START + LSTART_WORDS;
/// pid, ppid, user, pcpu, pmem, rss, the five `lstart` words, time and a command
const MIN_FIELDS: usize = TIME_FIELD + 2;

lazy_static! {
    static ref CPU_TIME_REGEX: regex::Regex = regex::Regex::new(
        r"^(?:(?P<days>\d+)-)?(?P<hours>\d+):(?P<minutes>\d+):(?P<seconds>\d+)$"
    )
    .unwrap();
}

/// Procps `ps`
pub struct LinuxPs;

impl PlatformDetector for LinuxPs {
    fn detect() -> bool {
        std::env::consts::OS == "linux"
    }
}

impl ProcessSource for LinuxPs {
    fn name(&self) -> &'static str {
        "Linux ps"
    }

    fn processes(&self) -> Result<Vec<ProcessRecord>> {
        let output = run_ps(&PS_ARGS)?;
        Ok(parse_linux_output(&output))
    }
}

pub(crate) fn parse_linux_output(output: &str) -> Vec<ProcessRecord> {
    parse_output(output, parse_fields)
}

fn parse_fields(fields: &[&str]) -> Option<ProcessRecord> {
    if fields.len() < MIN_FIELDS {
        return None;
    }

    Some(ProcessRecord {
        pid: parse_pid(fields[0])?,
        ppid: parse_pid(fields[1])?,
        user: fields[2].to_string(),
        cpu_percent: parse_metric(fields[3]),
        mem_percent: parse_metric(fields[4]),
        rss_kb: parse_metric(fields[5]),
        start_time: parse_lstart(&fields[LSTART_START..TIME_FIELD]),
        cpu_time: parse_cpu_time(fields[TIME_FIELD]),
        command: fields[TIME_FIELD + 1..].join(" "),
    })
}

/// Parse `[DD-]HH:MM:SS`, anything else counts as no CPU time
fn parse_cpu_time(time: &str) -> Duration {
    let Some(captures) = CPU_TIME_REGEX.captures(time) else {
        return Duration::ZERO;
    };
    let number = |name: &str| {
        captures
            .name(name)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0)
    };

    let hours = number("days") * 24 + number("hours");
    Duration::from_secs(hours * 3600 + number("minutes") * 60 + number("seconds"))
}
