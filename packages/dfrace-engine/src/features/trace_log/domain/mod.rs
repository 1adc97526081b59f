/// Trace log domain models
pub mod events;

pub use events::*;
