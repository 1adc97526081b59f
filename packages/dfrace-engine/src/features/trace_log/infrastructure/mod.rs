/// Trace log infrastructure
pub mod error;
pub mod parser;

pub use error::*;
pub use parser::*;
