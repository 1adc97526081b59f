/// Conflict detection domain models
pub mod conflict;
pub mod record;

pub use conflict::*;
pub use record::*;
