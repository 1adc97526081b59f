/// Happens-before infrastructure
pub mod reconstructor;

pub use reconstructor::*;
