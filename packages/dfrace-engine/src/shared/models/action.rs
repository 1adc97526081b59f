/// Memory action model
use super::{Address, FuncId, TaskId};
use serde::{Deserialize, Serialize};

/// Kind of memory access
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AccessKind {
    /// Read access (`R` tag)
    Read,
    /// Write access (`W` tag)
    Write,
}

impl AccessKind {
    /// Trace-log tag for this access kind
    pub fn tag(&self) -> &'static str {
        match self {
            AccessKind::Read => "R",
            AccessKind::Write => "W",
        }
    }

    pub fn is_write(&self) -> bool {
        matches!(self, AccessKind::Write)
    }
}

/// A single memory operation observed in the trace
///
/// Immutable once constructed. `value` keeps the raw token from the trace so
/// that equality of written values never depends on a numeric interpretation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Action {
    pub task_id: TaskId,
    pub address: Address,
    pub value: String,
    pub line_no: u32,
    pub func_id: FuncId,
    pub kind: AccessKind,
}

impl Action {
    pub fn new(
        task_id: TaskId,
        address: Address,
        value: impl Into<String>,
        line_no: u32,
        func_id: FuncId,
        is_write: bool,
    ) -> Self {
        Self {
            task_id,
            address,
            value: value.into(),
            line_no,
            func_id,
            kind: if is_write {
                AccessKind::Write
            } else {
                AccessKind::Read
            },
        }
    }

    pub fn is_write(&self) -> bool {
        self.kind.is_write()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_kind_from_flag() {
        let w = Action::new(1, 0x10, "5", 3, 0, true);
        let r = Action::new(1, 0x10, "5", 3, 0, false);
        assert!(w.is_write());
        assert!(!r.is_write());
        assert_eq!(w.kind.tag(), "W");
        assert_eq!(r.kind.tag(), "R");
    }
}
