use crate::prelude::*;
use crate::process::{Pid, ProcessRecord};
use crate::tree::graph::ProcessGraph;
use std::collections::{BTreeSet, HashSet, VecDeque};

/// Predicates selecting which processes to show.
///
/// A process matches when it satisfies any entry of any list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    /// Exact PIDs, compared as strings
    pub pids: Vec<String>,
    /// Exact usernames
    pub users: Vec<String>,
    /// Case-sensitive substrings of the command line
    pub substrings: Vec<String>,
    /// Case-insensitive substrings of the command line
    pub substrings_insensitive: Vec<String>,
}

impl Filters {
    pub fn is_empty(&self) -> bool {
        self.pids.is_empty()
            && self.users.is_empty()
            && self.substrings.is_empty()
            && self.substrings_insensitive.is_empty()
    }

    pub fn matches(&self, record: &ProcessRecord) -> bool {
        let pid = record.pid.to_string();
        if self.pids.iter().any(|p| *p == pid) {
            return true;
        }
        if self.users.iter().any(|u| *u == record.user) {
            return true;
        }
        if self
            .substrings
            .iter()
            .any(|s| record.command.contains(s.as_str()))
        {
            return true;
        }
        if self.substrings_insensitive.is_empty() {
            return false;
        }
        let command = record.command.to_lowercase();
        self.substrings_insensitive
            .iter()
            .any(|s| command.contains(&s.to_lowercase()))
    }
}

/// Where to start rendering and which processes may be printed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Root PIDs in ascending order
    pub roots: Vec<Pid>,
    /// PIDs allowed to be printed, `None` when every process is
    pub display: Option<BTreeSet<Pid>>,
}

/// Non-skipped processes matching `filters`
pub fn matching_pids(graph: &ProcessGraph, filters: &Filters) -> BTreeSet<Pid> {
    graph
        .processes()
        .filter(|record| !graph.is_skipped(record.pid) && filters.matches(record))
        .map(|record| record.pid)
        .collect()
}

/// `matches` together with all of their ancestors and descendants
pub fn lineage_closure(graph: &ProcessGraph, matches: &BTreeSet<Pid>) -> BTreeSet<Pid> {
    let mut closure = BTreeSet::new();

    for &pid in matches {
        closure.insert(pid);

        let mut seen = HashSet::from([pid]);
        let mut current = pid;
        while let Some(parent) = graph.parent(current) {
            if !seen.insert(parent) {
                warn!("Parent chain of process {pid} loops back to {parent}");
                break;
            }
            closure.insert(parent);
            current = parent;
        }

        let mut visited = HashSet::from([pid]);
        let mut queue = VecDeque::from([pid]);
        while let Some(current) = queue.pop_front() {
            for child in graph.children(current) {
                if visited.insert(child) {
                    closure.insert(child);
                    queue.push_back(child);
                }
            }
        }
    }

    closure
}

/// Resolve `filters` against `graph` into the roots and the set of processes to display
pub fn select(graph: &ProcessGraph, filters: &Filters) -> Selection {
    if filters.is_empty() {
        return Selection {
            roots: graph.roots(),
            display: None,
        };
    }

    let matches = matching_pids(graph, filters);
    let display = lineage_closure(graph, &matches);
    let roots = display
        .iter()
        .copied()
        .filter(|pid| graph.is_root(*pid))
        .collect_vec();
    debug!(
        "{} processes match the filters, {} shown with their lineage under {} roots",
        matches.len(),
        display.len(),
        roots.len()
    );

    Selection {
        roots,
        display: Some(display),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn record(pid: Pid, ppid: Pid, user: &str, command: &str) -> ProcessRecord {
        ProcessRecord::new(pid, ppid, user, command)
    }

    #[fixture]
    fn graph() -> ProcessGraph {
        ProcessGraph::from_records(
            vec![
                record(1, 0, "root", "init"),
                record(2, 1, "root", "kernel_task"),
                record(3, 1, "daemon", "systemd"),
                record(4, 3, "daemon", "cron"),
                record(5, 3, "user1", "bash"),
                record(6, 5, "user1", "vim test.txt"),
            ],
            None,
        )
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[rstest]
    #[case::by_pid(Filters { pids: strings(&["5"]), ..Default::default() }, vec![1, 3, 5, 6])]
    #[case::by_user(Filters { users: strings(&["daemon"]), ..Default::default() }, vec![1, 3, 4, 5, 6])]
    #[case::by_string(Filters { substrings: strings(&["vim"]), ..Default::default() }, vec![1, 3, 5, 6])]
    #[case::by_string_insensitive(
        Filters { substrings_insensitive: strings(&["VIM"]), ..Default::default() },
        vec![1, 3, 5, 6]
    )]
    #[case::case_sensitive_miss(Filters { substrings: strings(&["VIM"]), ..Default::default() }, vec![])]
    #[case::multiple_filters(
        Filters { users: strings(&["user1"]), substrings: strings(&["bash"]), ..Default::default() },
        vec![1, 3, 5, 6]
    )]
    #[case::no_match(Filters { pids: strings(&["42"]), ..Default::default() }, vec![])]
    fn test_lineage_closure(
        graph: ProcessGraph,
        #[case] filters: Filters,
        #[case] expected: Vec<Pid>,
    ) {
        let selection = select(&graph, &filters);
        let display = selection.display.unwrap();
        assert_eq!(display.into_iter().collect_vec(), expected);
    }

    #[rstest]
    fn test_filters_are_or_combined(graph: ProcessGraph) {
        let filters = Filters {
            users: strings(&["root"]),
            substrings: strings(&["cron"]),
            ..Default::default()
        };
        let matches = matching_pids(&graph, &filters);
        insta::assert_debug_snapshot!(matches, @r###"
        {
            1,
            2,
            4,
        }
        "###);
    }

    #[rstest]
    fn test_pid_filter_is_exact(graph: ProcessGraph) {
        let filters = Filters {
            pids: strings(&["05", " 5", "1"]),
            ..Default::default()
        };
        assert_eq!(matching_pids(&graph, &filters).into_iter().collect_vec(), vec![1]);
    }

    #[rstest]
    fn test_no_filters_selects_all_roots(graph: ProcessGraph) {
        let selection = select(&graph, &Filters::default());
        assert_eq!(
            selection,
            Selection {
                roots: vec![1],
                display: None,
            }
        );
    }

    #[test]
    fn test_chain_filtered_by_pid() {
        let graph = ProcessGraph::from_records(
            vec![
                record(1, 0, "root", "init"),
                record(100, 1, "root", "sshd"),
                record(200, 100, "alice", "zsh"),
                record(201, 200, "alice", "top"),
                record(300, 1, "root", "cron"),
            ],
            None,
        );
        let filters = Filters {
            pids: strings(&["200"]),
            ..Default::default()
        };
        let selection = select(&graph, &filters);
        assert_eq!(selection.roots, vec![1]);
        assert_eq!(
            selection.display.unwrap().into_iter().collect_vec(),
            vec![1, 100, 200, 201]
        );
    }

    #[test]
    fn test_skipped_processes_never_match() {
        let graph = ProcessGraph::from_records(
            vec![
                record(1, 0, "root", "init"),
                record(10, 1, "alice", "proktree -s ps"),
                record(11, 10, "alice", "ps -eo pid"),
            ],
            Some(crate::tree::graph::SkipAnchor::new(10, "ps ")),
        );
        let filters = Filters {
            substrings: strings(&["ps"]),
            ..Default::default()
        };
        assert!(matching_pids(&graph, &filters).is_empty());
    }

    #[test]
    fn test_orphaned_match_is_rooted_at_top_surviving_ancestor() {
        let graph = ProcessGraph::from_records(
            vec![
                record(1, 0, "root", "init"),
                record(20, 7, "alice", "tmux"),
                record(21, 20, "alice", "vim"),
            ],
            None,
        );
        let filters = Filters {
            substrings: strings(&["vim"]),
            ..Default::default()
        };
        let selection = select(&graph, &filters);
        assert_eq!(selection.roots, vec![20]);
        assert_eq!(
            selection.display.unwrap().into_iter().collect_vec(),
            vec![20, 21]
        );
    }

    #[test]
    fn test_cycles_terminate() {
        let graph = ProcessGraph::from_records(
            vec![
                record(1, 0, "root", "init"),
                record(10, 11, "root", "a"),
                record(11, 10, "root", "b"),
            ],
            None,
        );
        let filters = Filters {
            substrings: strings(&["a"]),
            ..Default::default()
        };
        let selection = select(&graph, &filters);
        assert!(selection.roots.is_empty());
        assert_eq!(
            selection.display.unwrap().into_iter().collect_vec(),
            vec![10, 11]
        );
    }
}
