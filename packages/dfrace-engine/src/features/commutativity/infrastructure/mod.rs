/// Commutativity infrastructure
pub mod analyzer;

pub use analyzer::*;
