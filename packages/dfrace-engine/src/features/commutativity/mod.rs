/// Commutativity Analysis Feature
///
/// Discharges flagged conflicts whose conflicting stores provably commute.
///
/// ## Architecture
/// - **Domain**: CommutingClass, OperationSet
/// - **Infrastructure**: CommutativityAnalyzer (backward safety walk)
/// - **Application**: eliminate_false_conflicts over a ConflictTable
/// - **Ports**: SafetyOracle trait
///
/// ## Algorithm
/// Starting at the conflicting STORE, walk the task's listing backwards
/// following the stored value's definition chain. ALLOCA or the start of
/// the listing end a chain safely; a CALL mentioning the operand or an
/// arithmetic op outside the walk's commuting class makes it unsafe.
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::*;
pub use domain::*;
pub use infrastructure::*;
pub use ports::*;
