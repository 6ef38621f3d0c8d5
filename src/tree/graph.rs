use crate::prelude::*;
use crate::process::{Pid, ProcessRecord};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Program invoked to list processes
pub const LISTING_PROGRAM: &str = "ps";

/// Process hidden from the tree along with the listing helpers it spawned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipAnchor {
    pub pid: Pid,
    /// Direct children whose command starts with this prefix are hidden too
    pub helper_prefix: String,
}

impl SkipAnchor {
    pub fn new(pid: Pid, helper_prefix: impl Into<String>) -> Self {
        Self {
            pid,
            helper_prefix: helper_prefix.into(),
        }
    }

    /// Anchor on this very process and the `ps` invocations it spawns
    pub fn current_process() -> Self {
        Self::new(std::process::id() as Pid, format!("{LISTING_PROGRAM} "))
    }
}

/// Parent/child relationships of a process snapshot
#[derive(Debug, Default)]
pub struct ProcessGraph {
    /// Map of PID to its process record
    processes: HashMap<Pid, ProcessRecord>,
    /// Map of parent PID to its child PIDs, in ascending order
    children: HashMap<Pid, BTreeSet<Pid>>,
    /// PIDs never printed as a line of their own
    skip: HashSet<Pid>,
}

impl ProcessGraph {
    pub fn from_records(
        records: impl IntoIterator<Item = ProcessRecord>,
        anchor: Option<SkipAnchor>,
    ) -> Self {
        let mut builder = GraphBuilder::new(anchor);
        for record in records {
            builder.add_record(record);
        }
        builder.build()
    }

    pub fn get(&self, pid: Pid) -> Option<&ProcessRecord> {
        self.processes.get(&pid)
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.processes.contains_key(&pid)
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// All records, in no particular order
    pub fn processes(&self) -> impl Iterator<Item = &ProcessRecord> {
        self.processes.values()
    }

    /// Children of `pid` in ascending order
    pub fn children(&self, pid: Pid) -> impl Iterator<Item = Pid> + '_ {
        self.children.get(&pid).into_iter().flatten().copied()
    }

    /// Parent of `pid`, if it has one and the parent is part of the snapshot
    pub fn parent(&self, pid: Pid) -> Option<Pid> {
        let ppid = self.get(pid)?.ppid;
        (ppid > 0 && self.contains(ppid)).then_some(ppid)
    }

    /// Whether `pid` starts a tree: it has no parent, or its parent is not in the snapshot
    pub fn is_root(&self, pid: Pid) -> bool {
        self.contains(pid) && self.parent(pid).is_none()
    }

    /// Root PIDs in ascending order
    pub fn roots(&self) -> Vec<Pid> {
        self.processes
            .keys()
            .copied()
            .filter(|pid| self.is_root(*pid))
            .sorted()
            .collect()
    }

    pub fn is_skipped(&self, pid: Pid) -> bool {
        self.skip.contains(&pid)
    }

    pub fn skipped(&self) -> &HashSet<Pid> {
        &self.skip
    }
}

/// Builds a [`ProcessGraph`] from process records
pub struct GraphBuilder {
    processes: HashMap<Pid, ProcessRecord>,
    anchor: Option<SkipAnchor>,
}

impl GraphBuilder {
    pub fn new(anchor: Option<SkipAnchor>) -> Self {
        Self {
            processes: HashMap::new(),
            anchor,
        }
    }

    /// Add a record, replacing any earlier record with the same PID
    pub fn add_record(&mut self, record: ProcessRecord) {
        let pid = record.pid;
        if self.processes.insert(pid, record).is_some() {
            trace!("Duplicate record for pid {pid}, keeping the last one");
        }
    }

    pub fn build(self) -> ProcessGraph {
        let mut children: HashMap<Pid, BTreeSet<Pid>> = HashMap::new();
        for record in self.processes.values() {
            if record.ppid > 0 {
                children.entry(record.ppid).or_default().insert(record.pid);
            }
        }

        let skip = match &self.anchor {
            Some(anchor) => Self::skip_set(&self.processes, &children, anchor),
            None => HashSet::new(),
        };
        if !skip.is_empty() {
            debug!("Hiding own processes: {:?}", skip.iter().sorted().collect_vec());
        }

        ProcessGraph {
            processes: self.processes,
            children,
            skip,
        }
    }

    fn skip_set(
        processes: &HashMap<Pid, ProcessRecord>,
        children: &HashMap<Pid, BTreeSet<Pid>>,
        anchor: &SkipAnchor,
    ) -> HashSet<Pid> {
        let mut skip = HashSet::new();
        if !processes.contains_key(&anchor.pid) {
            return skip;
        }

        skip.insert(anchor.pid);
        let helpers = children
            .get(&anchor.pid)
            .into_iter()
            .flatten()
            .filter(|child| {
                processes
                    .get(*child)
                    .is_some_and(|p| p.command.starts_with(&anchor.helper_prefix))
            });
        skip.extend(helpers);
        skip
    }
}
