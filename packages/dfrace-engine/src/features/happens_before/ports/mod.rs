/// Causal order port trait
use crate::shared::models::TaskId;

/// Answers ordering and naming questions about tasks
///
/// Implemented by the happens-before reconstructor; conflict detection only
/// depends on this trait.
pub trait CausalOrder {
    /// True if one of the two tasks is known to happen before the other
    fn is_ordered(&self, a: TaskId, b: TaskId) -> bool;

    /// Display name of a task (falls back to the numeric id)
    fn task_name(&self, task: TaskId) -> String;
}
