//! Console summary of the conflict table

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;

use crate::features::conflict_detection::domain::{Conflict, ConflictTable, Report};
use crate::features::report::domain::AnalysisStats;
use crate::shared::models::{Action, Address, FuncId};

const UNKNOWN_FUNCTION: &str = "<unknown>";

/// Renders the textual report printed to stdout
pub struct SummaryReporter<'a> {
    function_names: &'a HashMap<FuncId, String>,
    address_limit: usize,
}

impl<'a> SummaryReporter<'a> {
    pub fn new(function_names: &'a HashMap<FuncId, String>, address_limit: usize) -> Self {
        Self {
            function_names,
            address_limit: address_limit.max(1),
        }
    }

    /// Full summary: header, one block per conflicting task pair, statistics
    pub fn render(&self, table: &ConflictTable, stats: &AnalysisStats) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Tasks: {}", stats.tasks);
        let _ = writeln!(out, "Conflicting task pairs: {}", table.len());

        if table.is_empty() {
            let _ = writeln!(out, "No non-deterministic accesses found.");
        }
        for report in table.reports() {
            out.push_str(&self.render_report(report));
        }

        let _ = writeln!(out, "\n{}", stats.summary());
        out
    }

    /// One task pair, listing at most `address_limit` addresses
    pub fn render_report(&self, report: &Report) -> String {
        let mut by_address: BTreeMap<Address, Vec<&Conflict>> = BTreeMap::new();
        for conflict in &report.conflicts {
            by_address.entry(conflict.address).or_default().push(conflict);
        }

        let mut out = String::new();
        let _ = writeln!(
            out,
            "\n== {} <-> {} ({} address{})",
            report.task1_name,
            report.task2_name,
            by_address.len(),
            if by_address.len() == 1 { "" } else { "es" }
        );

        for (address, conflicts) in by_address.iter().take(self.address_limit) {
            let _ = writeln!(out, "  {:#x}", address);
            for conflict in conflicts {
                let _ = writeln!(
                    out,
                    "    {} vs {} [{}]",
                    self.describe(&conflict.action1),
                    self.describe(&conflict.action2),
                    conflict.kind.as_str()
                );
            }
        }

        let hidden = by_address.len().saturating_sub(self.address_limit);
        if hidden > 0 {
            let _ = writeln!(out, "  ... and {} more", hidden);
        }
        out
    }

    fn describe(&self, action: &Action) -> String {
        let function = self
            .function_names
            .get(&action.func_id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_FUNCTION);
        format!(
            "{} line {} in {} ({}={})",
            action.kind.tag(),
            action.line_no,
            function,
            if action.is_write() { "wrote" } else { "read" },
            action.value
        )
    }
}
