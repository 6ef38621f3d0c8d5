use crate::prelude::*;
use console::Term;
use std::env;
use std::io::IsTerminal;

/// Environment variable overriding the detected terminal width
pub const COLUMNS_ENV: &str = "COLUMNS";

/// Width assumed when a stream is a terminal but its size cannot be queried
const FALLBACK_WIDTH: usize = 80;

/// Return the width to truncate output lines to, or 0 when output is not a terminal.
///
/// `COLUMNS` takes precedence, then the size of stdout, then the terminal stdin is attached to.
pub fn detect_terminal_width() -> usize {
    if let Some(width) = columns_override() {
        debug!("Terminal width {width} taken from {COLUMNS_ENV}");
        return width;
    }

    let stdout_is_tty = std::io::stdout().is_terminal();
    let stdin_is_tty = std::io::stdin().is_terminal();

    if stdout_is_tty {
        if let Some(width) = stdout_columns() {
            debug!("Terminal width {width} taken from stdout");
            return width;
        }
    }
    if stdin_is_tty {
        if let Some(width) = controlling_terminal_columns() {
            debug!("Terminal width {width} taken from the controlling terminal");
            return width;
        }
    }

    if stdout_is_tty || stdin_is_tty {
        debug!("Could not query terminal size, assuming {FALLBACK_WIDTH} columns");
        FALLBACK_WIDTH
    } else {
        debug!("Not attached to a terminal, line truncation disabled");
        0
    }
}

fn columns_override() -> Option<usize> {
    env::var(COLUMNS_ENV)
        .ok()
        .and_then(|columns| columns.trim().parse::<usize>().ok())
        .filter(|width| *width > 0)
}

fn stdout_columns() -> Option<usize> {
    Term::stdout()
        .size_checked()
        .map(|(_rows, columns)| usize::from(columns))
        .filter(|width| *width > 0)
}

/// Width of the terminal stdin is attached to, used when stdout is redirected
fn controlling_terminal_columns() -> Option<usize> {
    crossterm::terminal::size()
        .ok()
        .map(|(columns, _rows)| usize::from(columns))
        .filter(|width| *width > 0)
}
