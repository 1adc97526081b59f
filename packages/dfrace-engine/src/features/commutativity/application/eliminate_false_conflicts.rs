/// Eliminate False Conflicts Use Case
///
/// Walks every report of a conflict table, deduplicates conflicts by
/// `(line1, line2)` and drops those whose two stores both commute.
use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::features::commutativity::ports::SafetyOracle;
use crate::features::conflict_detection::domain::ConflictTable;

/// Outcome counters of one elimination pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EliminationSummary {
    /// Distinct line pairs handed to the oracle
    pub line_pairs_checked: usize,
    /// Conflicts dropped because their line pair was already seen
    pub duplicates_dropped: usize,
    /// Conflicts proven safe on both sides
    pub eliminated: usize,
    /// Reports removed because they ran empty
    pub reports_removed: usize,
}

/// Remove conflicts the oracle proves harmless; returns what was done
///
/// Running it again on its own output changes nothing.
pub fn eliminate_false_conflicts<S: SafetyOracle + ?Sized>(
    table: &mut ConflictTable,
    oracle: &S,
) -> EliminationSummary {
    let mut summary = EliminationSummary::default();
    let reports_before = table.len();

    for report in table.reports_mut() {
        let mut seen_pairs: BTreeSet<(u32, u32)> = BTreeSet::new();
        let task1 = report.task1_name.clone();
        let task2 = report.task2_name.clone();

        report.conflicts.retain(|conflict| {
            let (line1, line2) = conflict.line_pair();
            if !seen_pairs.insert((line1, line2)) {
                summary.duplicates_dropped += 1;
                return false;
            }

            summary.line_pairs_checked += 1;
            let safe = oracle.is_commutatively_safe(&task1, line1)
                && oracle.is_commutatively_safe(&task2, line2);
            if safe {
                debug!(
                    "Eliminated {}:{} vs {}:{} (commutative)",
                    task1, line1, task2, line2
                );
                summary.eliminated += 1;
            }
            !safe
        });
    }

    table.prune_empty();
    summary.reports_removed = reports_before - table.len();

    info!(
        "Validation: {} line pairs checked, {} eliminated, {} reports removed",
        summary.line_pairs_checked, summary.eliminated, summary.reports_removed
    );
    summary
}
