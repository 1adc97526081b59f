/// Commutativity domain models
pub mod operation_set;

pub use operation_set::*;
