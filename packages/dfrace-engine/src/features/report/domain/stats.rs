/// Analysis run statistics
use serde::{Deserialize, Serialize};

/// Counters collected across the three analysis phases
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisStats {
    /// Tasks mentioned by the HB log or begun in the trace
    pub tasks: usize,
    /// Distinct HB edges
    pub hb_edges: usize,
    /// Tasks with a processed begin event
    pub begun_tasks: usize,
    /// Non-empty trace log lines read
    pub trace_lines: usize,
    /// HB and trace lines that could not be parsed
    pub skipped_lines: usize,
    /// Memory action records fed to the conflict detector
    pub memory_records: usize,
    /// Memory actions naming a function id with no registration
    pub unregistered_functions: usize,
    /// Distinct conflicts flagged before validation
    pub raw_conflicts: usize,
    /// Conflicts dropped as duplicate line pairs during validation
    pub duplicate_line_pairs: usize,
    /// Conflicts proven commutative and removed
    pub eliminated_conflicts: usize,
    /// Conflicts left in the final table
    pub remaining_conflicts: usize,
    /// Tasks with a pseudo-IR listing
    pub ir_listings: usize,
}

impl AnalysisStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Multi-line human readable rendering
    pub fn summary(&self) -> String {
        format!(
            "Tasks: {} ({} begun), HB edges: {}\n\
             Trace lines: {} ({} skipped), memory records: {}\n\
             Unregistered function references: {}\n\
             IR listings: {}\n\
             Conflicts: {} raw, {} duplicate line pairs, {} eliminated, {} remaining",
            self.tasks,
            self.begun_tasks,
            self.hb_edges,
            self.trace_lines,
            self.skipped_lines,
            self.memory_records,
            self.unregistered_functions,
            self.ir_listings,
            self.raw_conflicts,
            self.duplicate_line_pairs,
            self.eliminated_conflicts,
            self.remaining_conflicts,
        )
    }
}
