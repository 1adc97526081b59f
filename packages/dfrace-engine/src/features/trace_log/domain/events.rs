/// Parsed log events
use crate::shared::models::{Action, FuncId, TaskId};
use serde::{Deserialize, Serialize};

/// One happens-before edge from the HB log (`parent → child`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HbEdge {
    pub child: TaskId,
    pub parent: TaskId,
}

/// One line of the trace log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraceEvent {
    /// `<funcId> F <funcName>`
    FunctionRegistration { func_id: FuncId, name: String },

    /// `<taskId> B <taskName>`
    TaskBegin { task_id: TaskId, name: String },

    /// `<taskId> W|R ... [:: <taskId2> W|R ...]`
    ///
    /// `first` is the task's first action on the address, `last_write` the
    /// optional trailing write on the same address.
    MemoryAccess {
        first: Action,
        last_write: Option<Action>,
    },

    /// Task end, token send/receive and any other tag
    Other { id: TaskId, tag: String },
}

impl TraceEvent {
    /// Task or function id in the first column
    pub fn id(&self) -> u64 {
        match self {
            TraceEvent::FunctionRegistration { func_id, .. } => *func_id,
            TraceEvent::TaskBegin { task_id, .. } => *task_id,
            TraceEvent::MemoryAccess { first, .. } => first.task_id,
            TraceEvent::Other { id, .. } => *id,
        }
    }
}
