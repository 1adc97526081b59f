/// Report domain models
pub mod graph_export;
pub mod stats;

pub use graph_export::*;
pub use stats::*;
