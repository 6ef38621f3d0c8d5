use crate::config::DisplayConfig;
use crate::helpers::center_text;
use crate::prelude::*;
use crate::process::Pid;
use crate::tree::columns::{ColumnLayout, FormattedRow};
use crate::tree::graph::ProcessGraph;
use chrono::{DateTime, Local};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::io::{self, Write};

/// Separator width used when lines are not truncated to the terminal
const DEFAULT_SEPARATOR_WIDTH: usize = 80;
const ELLIPSIS: &str = "...";

/// A printed process together with the printed part of its subtree
#[derive(Debug)]
struct VisibleNode {
    pid: Pid,
    children: Vec<VisibleNode>,
}

/// Placement of one printed process in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    pub pid: Pid,
    /// 0 for roots
    pub depth: usize,
    /// Last printed process among its printed siblings
    pub is_last: bool,
    /// At least one printed process hangs below this one
    pub has_children: bool,
    /// Connectors inherited from the ancestors, drawn before the branch
    pub prefix: String,
}

impl TreeLine {
    /// Connector joining this process to its parent and children
    pub fn branch(&self, indent_width: usize) -> String {
        let lead = "─".repeat(indent_width.saturating_sub(1));
        match (self.depth, self.is_last, self.has_children) {
            (0, _, true) => "─┬─".to_string(),
            (0, _, false) => "───".to_string(),
            (_, true, true) => format!("└{lead}┬─"),
            (_, true, false) => format!("└{lead}──"),
            (_, false, true) => format!("├{lead}┬─"),
            (_, false, false) => format!("├{lead}──"),
        }
    }
}

/// Lays out and prints a [`ProcessGraph`] as a tree.
///
/// Rendering happens in two passes: [`TreeRenderer::collect`] decides which processes are
/// printed and where, then [`TreeRenderer::render_line`] turns each decision into text. The
/// first pass needs the whole subtree of a process to know whether anything will be printed
/// below it.
pub struct TreeRenderer<'a> {
    graph: &'a ProcessGraph,
    display: Option<&'a BTreeSet<Pid>>,
    config: &'a DisplayConfig,
    rows: HashMap<Pid, FormattedRow>,
    layout: ColumnLayout,
}

impl<'a> TreeRenderer<'a> {
    /// `display` restricts the printed processes, `None` prints every reachable one
    pub fn new(
        graph: &'a ProcessGraph,
        display: Option<&'a BTreeSet<Pid>>,
        config: &'a DisplayConfig,
    ) -> Self {
        Self::at_time(graph, display, config, &Local::now())
    }

    /// Same as [`TreeRenderer::new`], formatting start times relative to `now`
    pub fn at_time(
        graph: &'a ProcessGraph,
        display: Option<&'a BTreeSet<Pid>>,
        config: &'a DisplayConfig,
        now: &DateTime<Local>,
    ) -> Self {
        let rows: HashMap<Pid, FormattedRow> = graph
            .processes()
            .map(|record| (record.pid, FormattedRow::new(record, config, now)))
            .collect();
        let layout = ColumnLayout::measure(rows.values());

        Self {
            graph,
            display,
            config,
            rows,
            layout,
        }
    }

    pub fn layout(&self) -> ColumnLayout {
        self.layout
    }

    fn is_displayed(&self, pid: Pid) -> bool {
        !self.graph.is_skipped(pid) && self.display.is_none_or(|display| display.contains(&pid))
    }

    /// Printed processes of the subtree rooted at `pid`.
    ///
    /// A hidden process yields its printed descendants in its place.
    fn visible_nodes(&self, pid: Pid, visited: &mut HashSet<Pid>) -> Vec<VisibleNode> {
        if !self.graph.contains(pid) {
            return Vec::new();
        }
        if !visited.insert(pid) {
            warn!("Process {pid} is its own ancestor, not descending into it again");
            return Vec::new();
        }

        let children = self
            .graph
            .children(pid)
            .flat_map(|child| self.visible_nodes(child, visited))
            .collect_vec();

        if self.is_displayed(pid) {
            vec![VisibleNode { pid, children }]
        } else {
            children
        }
    }

    /// Decide which processes are printed, in order, and how they connect
    pub fn collect(&self, roots: &[Pid]) -> Vec<TreeLine> {
        let mut visited = HashSet::new();
        let forest = roots
            .iter()
            .flat_map(|root| self.visible_nodes(*root, &mut visited))
            .collect_vec();

        let mut lines = Vec::new();
        self.flatten(&forest, 0, &mut Vec::new(), &mut lines);
        lines
    }

    fn flatten(
        &self,
        nodes: &[VisibleNode],
        depth: usize,
        ancestors_last: &mut Vec<bool>,
        lines: &mut Vec<TreeLine>,
    ) {
        for (index, node) in nodes.iter().enumerate() {
            let is_last = index + 1 == nodes.len();
            lines.push(TreeLine {
                pid: node.pid,
                depth,
                is_last,
                has_children: !node.children.is_empty(),
                prefix: self.prefix(depth, ancestors_last),
            });

            // Roots draw no connector of their own for their descendants to continue
            if depth > 0 {
                ancestors_last.push(is_last);
            }
            self.flatten(&node.children, depth + 1, ancestors_last, lines);
            if depth > 0 {
                ancestors_last.pop();
            }
        }
    }

    fn prefix(&self, depth: usize, ancestors_last: &[bool]) -> String {
        if depth == 0 {
            return String::new();
        }

        let width = self.config.indent_width.max(1);
        let mut prefix = String::from(" ");
        for &last in ancestors_last {
            if !last {
                prefix.push('│');
                prefix.push_str(&" ".repeat(width - 1));
            } else {
                prefix.push_str(&" ".repeat(width));
            }
        }
        prefix
    }

    pub fn header(&self) -> String {
        let ColumnLayout {
            user_width,
            start_width,
            time_width,
        } = self.layout;
        format!(
            "  {pid:>5} {user:<user_width$} {cpu:>5} {mem:>5} {rss:>5}   {start:<start_width$}  {time:<time_width$}  COMMAND",
            pid = center_text("PID", 5),
            user = center_text("USER", user_width),
            cpu = "%CPU",
            mem = "%MEM",
            rss = "RSS",
            start = "START",
            time = center_text("TIME", time_width),
        )
    }

    pub fn separator(&self) -> String {
        let width = self
            .config
            .truncation_width()
            .unwrap_or(DEFAULT_SEPARATOR_WIDTH);
        "-".repeat(width)
    }

    /// Text of a collected line, truncated to the terminal width if needed
    pub fn render_line(&self, line: &TreeLine) -> Option<String> {
        let record = self.graph.get(line.pid)?;
        let row = self.rows.get(&line.pid)?;
        let ColumnLayout {
            user_width,
            start_width,
            time_width,
        } = self.layout;

        let text = format!(
            "{pid:>7} {user:<user_width$} {cpu:>5.1} {mem:>5.1} {rss:>6}  {start:<start_width$}  {time:<time_width$}  {prefix}{branch} {command}",
            pid = record.pid,
            user = row.user,
            cpu = record.cpu_percent,
            mem = record.mem_percent,
            rss = row.rss,
            start = row.start,
            time = row.cpu_time,
            prefix = line.prefix,
            branch = line.branch(self.config.indent_width),
            command = record.command,
        );
        Some(self.truncate(text))
    }

    fn truncate(&self, text: String) -> String {
        match self.config.truncation_width() {
            Some(width) if width > ELLIPSIS.len() && text.chars().count() > width => {
                let mut truncated: String = text.chars().take(width - ELLIPSIS.len()).collect();
                truncated.push_str(ELLIPSIS);
                truncated
            }
            _ => text,
        }
    }

    /// Lines of the trees starting at `roots`, without header
    pub fn render(&self, roots: &[Pid]) -> Vec<String> {
        self.collect(roots)
            .iter()
            .filter_map(|line| self.render_line(line))
            .collect()
    }

    /// Write the header, separator and the trees starting at `roots`
    pub fn write_report(&self, roots: &[Pid], out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{}", self.header())?;
        writeln!(out, "{}", self.separator())?;
        for line in self.collect(roots) {
            if let Some(text) = self.render_line(&line) {
                writeln!(out, "{text}")?;
            }
        }
        out.flush()
    }
}
