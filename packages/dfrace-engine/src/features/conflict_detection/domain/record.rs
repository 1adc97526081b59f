/// Per-(task, address) memory record
use crate::shared::models::{Action, Address, TaskId};
use serde::{Deserialize, Serialize};

/// Why two records conflict
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConflictKind {
    /// Both tasks write, with different values
    WriteWrite,
    /// The new record only reads, the older one writes
    ReadWrite,
    /// The new record writes, the older one only reads
    WriteRead,
}

impl ConflictKind {
    /// Classify a new record against one already in the history
    ///
    /// Equal-valued writes and read/read pairs never conflict.
    pub fn classify(record: &MemoryActionRecord, other: &MemoryActionRecord) -> Option<Self> {
        match (record.write_action(), other.write_action()) {
            (Some(mine), Some(theirs)) => {
                (mine.value != theirs.value).then_some(ConflictKind::WriteWrite)
            }
            (None, Some(_)) => Some(ConflictKind::ReadWrite),
            (Some(_), None) => Some(ConflictKind::WriteRead),
            (None, None) => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictKind::WriteWrite => "write-write",
            ConflictKind::ReadWrite => "read-write",
            ConflictKind::WriteRead => "write-read",
        }
    }
}

/// A task's interaction with one address: its first action and, optionally,
/// the last write that followed it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryActionRecord {
    pub task_id: TaskId,
    pub address: Address,
    pub first_action: Action,
    pub last_write: Option<Action>,
}

impl MemoryActionRecord {
    pub fn new(first_action: Action, last_write: Option<Action>) -> Self {
        Self {
            task_id: first_action.task_id,
            address: first_action.address,
            first_action,
            last_write,
        }
    }

    /// The write that determines this task's final value, if it wrote at all
    pub fn write_action(&self) -> Option<&Action> {
        self.last_write
            .as_ref()
            .or_else(|| self.first_action.is_write().then_some(&self.first_action))
    }

    /// The action reported when this record takes part in a conflict
    pub fn reported_action(&self) -> &Action {
        self.write_action().unwrap_or(&self.first_action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(task: TaskId, value: &str, line: u32) -> MemoryActionRecord {
        MemoryActionRecord::new(Action::new(task, 0x40, value, line, 0, true), None)
    }

    fn read(task: TaskId, line: u32) -> MemoryActionRecord {
        MemoryActionRecord::new(Action::new(task, 0x40, "0", line, 0, false), None)
    }

    #[test]
    fn test_write_write_divergence() {
        assert_eq!(
            ConflictKind::classify(&write(1, "100", 3), &write(2, "200", 7)),
            Some(ConflictKind::WriteWrite)
        );
    }

    #[test]
    fn test_equal_writes_do_not_conflict() {
        assert_eq!(
            ConflictKind::classify(&write(1, "100", 3), &write(2, "100", 7)),
            None
        );
    }

    #[test]
    fn test_read_write_both_directions() {
        assert_eq!(
            ConflictKind::classify(&read(1, 3), &write(2, "5", 7)),
            Some(ConflictKind::ReadWrite)
        );
        assert_eq!(
            ConflictKind::classify(&write(2, "5", 7), &read(1, 3)),
            Some(ConflictKind::WriteRead)
        );
    }

    #[test]
    fn test_reads_never_conflict() {
        assert_eq!(ConflictKind::classify(&read(1, 3), &read(2, 4)), None);
    }

    #[test]
    fn test_last_write_overrides_first_read() {
        let record = MemoryActionRecord::new(
            Action::new(1, 0x40, "0", 3, 0, false),
            Some(Action::new(1, 0x40, "9", 5, 0, true)),
        );
        assert!(record.write_action().is_some());
        assert_eq!(record.reported_action().line_no, 5);
        assert_eq!(record.write_action().unwrap().value, "9");
    }
}
