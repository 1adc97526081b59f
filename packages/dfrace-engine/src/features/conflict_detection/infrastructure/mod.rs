/// Conflict detection infrastructure
pub mod conflict_detector;

pub use conflict_detector::*;
