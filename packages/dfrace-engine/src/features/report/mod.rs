/// Report Feature
///
/// Renders the final outputs of an analysis run.
///
/// ## Architecture
/// - **Domain**: AnalysisStats, GraphExport (node/edge view of the task graph)
/// - **Infrastructure**: SummaryReporter (console text), GraphWriter (edge
///   list, JSON and optional DOT dumps)
///
/// Output formats carry no analysis semantics; only the task graph's nodes
/// and `parent → child` edges must be preserved.
pub mod domain;
pub mod infrastructure;

pub use domain::*;
pub use infrastructure::*;
