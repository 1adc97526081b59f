/// Commutativity use cases
pub mod eliminate_false_conflicts;

pub use eliminate_false_conflicts::*;
