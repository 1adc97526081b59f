//! Shared data models
pub mod action;

pub use action::*;

/// Task identity as emitted by the instrumented runtime
pub type TaskId = u64;

/// Function identity registered through `F` trace lines
pub type FuncId = u64;

/// Memory address of an access (parsed from hex)
pub type Address = u64;
