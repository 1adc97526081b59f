/// Pseudo-IR Feature
///
/// Per-task reduced instruction listings, produced alongside the trace log
/// and consumed only by the commutativity validator.
///
/// ## Format
/// ```text
/// worker
/// 12: %3 = alloca i32, align 4
/// 14: %6 = add nsw i32 %5, 1
/// 14: store i32 %6, i32* %3, align 4
/// ```
/// A bare name line opens a task's listing; it runs until the next name
/// line or EOF. Parsing is purely textual and never fails.
pub mod domain;
pub mod infrastructure;

pub use domain::*;
pub use infrastructure::*;
