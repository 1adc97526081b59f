/// Happens-Before Reconstruction Feature
///
/// Rebuilds the partial order over tasks from the HB edge log alone.
///
/// ## Architecture
/// - **Domain**: TaskNode, TaskGraph, SerialBag
/// - **Infrastructure**: HappensBeforeReconstructor (incremental serial bags)
/// - **Ports**: CausalOrder trait consumed by conflict detection
///
/// ## Algorithm
/// Every task owns a serial bag: the set of its transitive predecessors plus
/// the number of children that still have to fold it in. Chains reuse the
/// parent's bag (moved out of the table), joins union the parents' sets.
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::*;
pub use infrastructure::*;
pub use ports::*;
