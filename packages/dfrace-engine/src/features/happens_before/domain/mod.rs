/// Happens-before domain models
pub mod serial_bag;
pub mod task_graph;

pub use serial_bag::*;
pub use task_graph::*;
