mod center_text;
mod current_user;
mod format_cpu_time;
mod format_rss;
mod format_start_time;
mod terminal_width;
mod truncate_user;

pub use center_text::center_text;
pub use current_user::current_username;
pub use format_cpu_time::{NO_CPU_TIME, format_cpu_time};
pub use format_rss::format_rss;
pub use format_start_time::{UNKNOWN_START_TIME, format_start_time, format_start_time_at};
pub use terminal_width::{COLUMNS_ENV, detect_terminal_width};
pub use truncate_user::{MAX_USER_LEN, truncate_user};
