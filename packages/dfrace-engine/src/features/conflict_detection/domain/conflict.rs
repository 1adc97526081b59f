/// Conflict, report and conflict table models
use super::ConflictKind;
use crate::shared::models::{Action, Address};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A single flagged co-occurrence on one address
///
/// Ordered by address, then by the two actions (task id first), so
/// duplicates collapse inside a `BTreeSet`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Conflict {
    pub address: Address,
    /// Action of the first task of the report's pair
    pub action1: Action,
    /// Action of the second task of the report's pair
    pub action2: Action,
    pub kind: ConflictKind,
}

impl Conflict {
    pub fn new(action1: Action, action2: Action, kind: ConflictKind) -> Self {
        Self {
            address: action1.address,
            action1,
            action2,
            kind,
        }
    }

    /// `(line1, line2)` key used for line-pair deduplication
    pub fn line_pair(&self) -> (u32, u32) {
        (self.action1.line_no, self.action2.line_no)
    }
}

/// Task-name pair keying the conflict table
pub type TaskPair = (String, String);

/// All conflicts between two task names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub task1_name: String,
    pub task2_name: String,
    pub conflicts: BTreeSet<Conflict>,
}

impl Report {
    pub fn new(task1_name: impl Into<String>, task2_name: impl Into<String>) -> Self {
        Self {
            task1_name: task1_name.into(),
            task2_name: task2_name.into(),
            conflicts: BTreeSet::new(),
        }
    }

    /// Distinct addresses, ascending
    pub fn addresses(&self) -> BTreeSet<Address> {
        self.conflicts.iter().map(|c| c.address).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// `(task1 name, task2 name) → Report`
///
/// Every report holds at least one conflict; `prune_empty` restores this
/// after conflicts have been removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConflictTable {
    reports: BTreeMap<TaskPair, Report>,
}

impl ConflictTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a conflict, creating the report on first occurrence.
    /// Returns false if the conflict was already present.
    pub fn insert(&mut self, task1_name: String, task2_name: String, conflict: Conflict) -> bool {
        self.reports
            .entry((task1_name.clone(), task2_name.clone()))
            .or_insert_with(|| Report::new(task1_name, task2_name))
            .conflicts
            .insert(conflict)
    }

    pub fn get(&self, task1_name: &str, task2_name: &str) -> Option<&Report> {
        self.reports
            .get(&(task1_name.to_string(), task2_name.to_string()))
    }

    pub fn reports(&self) -> impl Iterator<Item = &Report> {
        self.reports.values()
    }

    pub fn reports_mut(&mut self) -> impl Iterator<Item = &mut Report> {
        self.reports.values_mut()
    }

    /// Drop reports whose conflict set became empty
    pub fn prune_empty(&mut self) {
        self.reports.retain(|_, report| !report.is_empty());
    }

    /// Number of conflicting task-name pairs
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Total conflicts across all reports
    pub fn conflict_count(&self) -> usize {
        self.reports.values().map(|r| r.conflicts.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conflict(addr: Address, line1: u32, line2: u32) -> Conflict {
        Conflict::new(
            Action::new(1, addr, "1", line1, 0, true),
            Action::new(2, addr, "2", line2, 0, true),
            ConflictKind::WriteWrite,
        )
    }

    #[test]
    fn test_insert_creates_report_and_dedups() {
        let mut table = ConflictTable::new();
        assert!(table.insert("a".into(), "b".into(), conflict(0x10, 3, 4)));
        assert!(!table.insert("a".into(), "b".into(), conflict(0x10, 3, 4)));
        assert!(table.insert("a".into(), "b".into(), conflict(0x20, 3, 4)));

        assert_eq!(table.len(), 1);
        assert_eq!(table.conflict_count(), 2);
        let report = table.get("a", "b").unwrap();
        assert_eq!(report.addresses().into_iter().collect::<Vec<_>>(), vec![0x10, 0x20]);
    }

    #[test]
    fn test_conflicts_ordered_by_address() {
        let mut table = ConflictTable::new();
        table.insert("a".into(), "b".into(), conflict(0x30, 1, 1));
        table.insert("a".into(), "b".into(), conflict(0x10, 9, 9));

        let report = table.get("a", "b").unwrap();
        let addrs: Vec<_> = report.conflicts.iter().map(|c| c.address).collect();
        assert_eq!(addrs, vec![0x10, 0x30]);
    }

    #[test]
    fn test_prune_empty() {
        let mut table = ConflictTable::new();
        table.insert("a".into(), "b".into(), conflict(0x10, 3, 4));
        table.insert("c".into(), "d".into(), conflict(0x10, 3, 4));

        for report in table.reports_mut() {
            if report.task1_name == "a" {
                report.conflicts.clear();
            }
        }
        table.prune_empty();

        assert_eq!(table.len(), 1);
        assert!(table.get("a", "b").is_none());
    }
}
