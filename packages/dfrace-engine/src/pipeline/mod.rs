//! Analysis pipeline
//!
//! `Analyzer` owns every piece of analysis state (task graph, serial bags,
//! address histories, conflict table, function table, IR listings) and
//! runs the batch phases in order.

pub mod analyzer;

pub use crate::features::report::domain::AnalysisStats;
pub use analyzer::Analyzer;
