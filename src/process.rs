use chrono::{DateTime, Local};
use std::time::Duration;

pub type Pid = i32;

/// A single process as captured from the process listing
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRecord {
    pub pid: Pid,
    /// 0 when the process has no tracked parent
    pub ppid: Pid,
    pub user: String,
    pub cpu_percent: f64,
    pub mem_percent: f64,
    pub rss_kb: f64,
    /// `None` when the listing did not provide a parsable start time
    pub start_time: Option<DateTime<Local>>,
    /// Cumulative CPU time, zero when unavailable
    pub cpu_time: Duration,
    /// Full command line including arguments
    pub command: String,
}

impl ProcessRecord {
    /// Create a record with zeroed load metrics and an unknown start time
    pub fn new(pid: Pid, ppid: Pid, user: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            pid,
            ppid,
            user: user.into(),
            cpu_percent: 0.0,
            mem_percent: 0.0,
            rss_kb: 0.0,
            start_time: None,
            cpu_time: Duration::ZERO,
            command: command.into(),
        }
    }
}
