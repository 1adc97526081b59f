/// Pseudo-IR domain models
pub mod instruction;

pub use instruction::*;
