use std::time::Duration;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;

/// Placeholder shown when a process has not accumulated any CPU time
pub const NO_CPU_TIME: &str = "      --";

/// Format cumulative CPU time as `HH:MM:SS`, switching to `NNNNNhrs` past a day.
///
/// Every output is 8 characters wide for durations below 100000 hours.
pub fn format_cpu_time(cpu_time: Duration) -> String {
    if cpu_time.is_zero() {
        return NO_CPU_TIME.to_string();
    }

    let total_seconds = cpu_time.as_secs();
    let hours = total_seconds / SECONDS_PER_HOUR;
    let minutes = (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = total_seconds % SECONDS_PER_MINUTE;

    if hours >= 24 {
        format!("{hours:>5}hrs")
    } else {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    }
}
