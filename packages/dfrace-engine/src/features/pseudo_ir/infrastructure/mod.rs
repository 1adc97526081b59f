/// Pseudo-IR parsing
pub mod parser;

pub use parser::*;
