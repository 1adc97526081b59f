/// Trace & HB Log Parsing Feature
///
/// Turns raw log lines into structured events.
///
/// ## Formats
/// - HB log: `<childTaskId> <parentTaskId>`
/// - Trace log: `<id> <tag> ...` with tags `F` (function registration),
///   `B` (task begin), `W`/`R` (memory action, optionally followed by
///   `:: <second action>`); every other tag is accepted and ignored
///
/// Malformed lines surface as `LogParseError`; the caller decides whether
/// to skip them.
pub mod domain;
pub mod infrastructure;

pub use domain::*;
pub use infrastructure::*;
