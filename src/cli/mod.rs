use std::io;

use crate::{
    acquisition::get_source,
    config::{DEFAULT_INDENT_WIDTH, DisplayConfig},
    helpers::{current_username, detect_terminal_width},
    local_logger::{PROKTREE_U8_COLOR_CODE, init_local_logger},
    prelude::*,
    tree::{Filters, ProcessGraph, SkipAnchor, TreeRenderer, select},
};
use clap::{
    Parser,
    builder::{Styles, styling},
};

fn create_styles() -> Styles {
    styling::Styles::styled()
        .header(styling::AnsiColor::Green.on_default() | styling::Effects::BOLD)
        .usage(styling::AnsiColor::Green.on_default() | styling::Effects::BOLD)
        .literal(
            styling::Ansi256Color(PROKTREE_U8_COLOR_CODE).on_default() | styling::Effects::BOLD,
        )
        .placeholder(styling::AnsiColor::Cyan.on_default())
}

#[derive(Parser, Debug)]
#[command(
    name = "proktree",
    version,
    about = "Print your processes as a tree, nicely displayed",
    styles = create_styles()
)]
pub struct Cli {
    /// Show only the processes with this PID, along with their parents and children
    #[arg(short, long = "pid", value_name = "PID")]
    pub pids: Vec<String>,

    /// Show only the processes of this user, along with their parents and children.
    /// Without a value, the current user is used
    #[arg(
        short,
        long = "user",
        value_name = "USER",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub users: Vec<String>,

    /// Show only the processes whose command contains this string, along with their parents
    /// and children
    #[arg(short = 's', long = "string", value_name = "STRING")]
    pub substrings: Vec<String>,

    /// Same as --string, ignoring case
    #[arg(short = 'i', long = "string-insensitive", value_name = "STRING")]
    pub substrings_insensitive: Vec<String>,

    /// Do not truncate usernames
    #[arg(long)]
    pub long_users: bool,

    /// Do not truncate lines to the terminal width
    #[arg(long)]
    pub long_commands: bool,

    /// Number of columns each tree level is indented by
    #[arg(
        long,
        value_name = "WIDTH",
        default_value_t = DEFAULT_INDENT_WIDTH as u16,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub indent: u16,
}

impl Cli {
    /// Build the filters, resolving bare `--user` flags with `current_user`
    pub fn filters(&self, current_user: impl Fn() -> Option<String>) -> Filters {
        Filters {
            pids: self.pids.clone(),
            users: resolve_users(&self.users, current_user),
            substrings: self.substrings.clone(),
            substrings_insensitive: self.substrings_insensitive.clone(),
        }
    }

    pub fn display_config(&self, terminal_width: usize) -> DisplayConfig {
        DisplayConfig {
            full_users: self.long_users,
            full_commands: self.long_commands,
            indent_width: usize::from(self.indent),
            terminal_width,
        }
    }
}

fn resolve_users(users: &[String], current_user: impl Fn() -> Option<String>) -> Vec<String> {
    users
        .iter()
        .filter_map(|user| {
            if !user.is_empty() {
                return Some(user.clone());
            }
            let resolved = current_user();
            if resolved.is_none() {
                warn!("Could not determine the current user, ignoring --user without a value");
            }
            resolved
        })
        .unique()
        .collect()
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_local_logger()?;

    let filters = cli.filters(current_username);
    let config = cli.display_config(detect_terminal_width());
    debug!("Filters: {filters:?}");
    debug!("Display: {config:?}");

    let source = get_source()?;
    debug!("Listing processes with {}", source.name());
    let records = source
        .processes()
        .context("Failed to list the running processes")?;

    let graph = ProcessGraph::from_records(records, Some(SkipAnchor::current_process()));
    let selection = select(&graph, &filters);
    let renderer = TreeRenderer::new(&graph, selection.display.as_ref(), &config);

    match renderer.write_report(&selection.roots, &mut io::stdout().lock()) {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
            debug!("Output closed early, stopping");
            Ok(())
        }
        result => result.context("Failed to write the process tree"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_debug_snapshot;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("proktree").chain(args.iter().copied())).unwrap()
    }

    fn alice() -> Option<String> {
        Some("alice".to_string())
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert!(cli.filters(alice).is_empty());
        assert_eq!(cli.display_config(0), DisplayConfig::default());
    }

    #[test]
    fn test_repeated_filters() {
        let cli = parse(&[
            "-p", "1", "--pid", "42", "-s", "vim", "-i", "SSH", "--string", "bash",
        ]);
        assert_debug_snapshot!(cli.filters(alice), @r#"
        Filters {
            pids: [
                "1",
                "42",
            ],
            users: [],
            substrings: [
                "vim",
                "bash",
            ],
            substrings_insensitive: [
                "SSH",
            ],
        }
        "#);
    }

    #[test]
    fn test_bare_user_resolves_to_current_user() {
        let cli = parse(&["-u", "--pid", "7"]);
        assert_eq!(cli.users, vec![String::new()]);
        assert_eq!(cli.pids, vec!["7".to_string()]);

        let filters = cli.filters(alice);
        assert_eq!(filters.users, vec!["alice".to_string()]);
    }

    #[test]
    fn test_explicit_and_bare_users() {
        let cli = parse(&["-u", "root", "--user", "-u", "alice"]);
        assert_eq!(
            cli.filters(alice).users,
            vec!["root".to_string(), "alice".to_string()]
        );
    }

    #[test]
    fn test_unknown_current_user_is_ignored() {
        let cli = parse(&["--user", "-u", "root"]);
        assert_eq!(cli.filters(|| None).users, vec!["root".to_string()]);
    }

    #[test]
    fn test_display_flags() {
        let cli = parse(&["--long-users", "--long-commands", "--indent", "4"]);
        assert_eq!(
            cli.display_config(120),
            DisplayConfig {
                full_users: true,
                full_commands: true,
                indent_width: 4,
                terminal_width: 120,
            }
        );
    }

    #[test]
    fn test_indent_must_be_positive() {
        let result = Cli::try_parse_from(["proktree", "--indent", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_pid_requires_a_value() {
        let result = Cli::try_parse_from(["proktree", "--pid"]);
        assert!(result.is_err());
    }
}
