use crate::config::DisplayConfig;
use crate::helpers::{
    MAX_USER_LEN, format_cpu_time, format_rss, format_start_time_at, truncate_user,
};
use crate::process::ProcessRecord;
use chrono::{DateTime, Local};

pub const MIN_START_WIDTH: usize = 5;
pub const MIN_TIME_WIDTH: usize = 8;

/// Display strings of the columns of a single process that need formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedRow {
    pub user: String,
    pub rss: String,
    pub start: String,
    pub cpu_time: String,
}

impl FormattedRow {
    pub fn new(record: &ProcessRecord, config: &DisplayConfig, now: &DateTime<Local>) -> Self {
        Self {
            user: truncate_user(&record.user, config.full_users),
            rss: format_rss(record.rss_kb),
            start: format_start_time_at(record.start_time.as_ref(), now),
            cpu_time: format_cpu_time(record.cpu_time),
        }
    }
}

/// Widths of the variable-width columns, shared by the header and every row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub user_width: usize,
    pub start_width: usize,
    pub time_width: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            user_width: MAX_USER_LEN,
            start_width: MIN_START_WIDTH,
            time_width: MIN_TIME_WIDTH,
        }
    }
}

impl ColumnLayout {
    /// Widen the minimum layout to fit every row
    pub fn measure<'a>(rows: impl IntoIterator<Item = &'a FormattedRow>) -> Self {
        rows.into_iter()
            .fold(Self::default(), |layout, row| Self {
                user_width: layout.user_width.max(row.user.chars().count()),
                start_width: layout.start_width.max(row.start.chars().count()),
                time_width: layout.time_width.max(row.cpu_time.trim().chars().count()),
            })
    }
}
