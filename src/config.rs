/// Default number of columns each tree level is indented by
pub const DEFAULT_INDENT_WIDTH: usize = 2;

/// Options controlling how the process tree is laid out.
///
/// Built once from the command line and passed to the components that need it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Show usernames without truncation, widening the USER column as needed
    pub full_users: bool,
    /// Never truncate lines to the terminal width
    pub full_commands: bool,
    /// Columns per tree level, at least 1
    pub indent_width: usize,
    /// Width lines are truncated to, 0 when unknown
    pub terminal_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            full_users: false,
            full_commands: false,
            indent_width: DEFAULT_INDENT_WIDTH,
            terminal_width: 0,
        }
    }
}

impl DisplayConfig {
    /// Width lines should be truncated to, if any
    pub fn truncation_width(&self) -> Option<usize> {
        (!self.full_commands && self.terminal_width > 0).then_some(self.terminal_width)
    }
}
