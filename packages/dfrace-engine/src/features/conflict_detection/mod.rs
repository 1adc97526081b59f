/// Conflict Detection Feature
///
/// Flags pairs of memory actions that run on logically concurrent tasks,
/// touch the same address and are not provably order-independent.
///
/// ## Architecture
/// - **Domain**: MemoryActionRecord, ConflictKind, Conflict, Report, ConflictTable
/// - **Infrastructure**: ConflictDetector (bounded per-address history)
///
/// ## Performance
/// - Each record is compared against at most `history_capacity` others
/// - Races against records evicted from the window are missed on purpose
pub mod domain;
pub mod infrastructure;

pub use domain::*;
pub use infrastructure::*;
