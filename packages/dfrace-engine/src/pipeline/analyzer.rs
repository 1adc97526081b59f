//! Analyzer - owns all analysis state and drives the batch phases
//!
//! ## Phases
//! 1. HB log → task graph (every edge before any task begins)
//! 2. Trace log → function table, serial bags, conflict table
//! 3. IR log → per-task listings
//! 4. Validation → false conflicts eliminated
//! 5. Outputs → summary text, dependency graph dumps
//!
//! Identical logs always give identical reports: every map that reaches
//! the output is ordered.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, info, trace, warn};

use crate::config::{DetectorConfig, UnregisteredFunctionPolicy};
use crate::errors::{DetectorError, Result};
use crate::features::commutativity::{
    eliminate_false_conflicts, CommutativityAnalyzer, EliminationSummary,
};
use crate::features::conflict_detection::{ConflictDetector, ConflictTable};
use crate::features::happens_before::HappensBeforeReconstructor;
use crate::features::pseudo_ir::{IrLogParser, TaskListings};
use crate::features::report::{AnalysisStats, GraphWriter, SummaryReporter};
use crate::features::trace_log::{parse_hb_line, parse_trace_line, TraceEvent};
use crate::shared::models::{Action, FuncId};

/// Offline non-determinism analyzer
#[derive(Debug)]
pub struct Analyzer {
    config: DetectorConfig,
    happens_before: HappensBeforeReconstructor,
    detector: ConflictDetector,
    function_names: HashMap<FuncId, String>,
    warned_functions: HashSet<FuncId>,
    commutativity: CommutativityAnalyzer,
    stats: AnalysisStats,
}

impl Analyzer {
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            detector: ConflictDetector::with_capacity(config.history_capacity),
            commutativity: CommutativityAnalyzer::with_policy(
                TaskListings::new(),
                config.arithmetic,
            ),
            happens_before: HappensBeforeReconstructor::new(),
            function_names: HashMap::new(),
            warned_functions: HashSet::new(),
            stats: AnalysisStats::new(),
            config,
        }
    }

    /// Run every phase over the three logs
    ///
    /// All three files are opened before the first phase, so an unreadable
    /// input fails the run before any analysis.
    pub fn run(
        &mut self,
        trace_log: impl AsRef<Path>,
        hb_log: impl AsRef<Path>,
        ir_log: impl AsRef<Path>,
    ) -> Result<AnalysisStats> {
        let (trace_log, hb_log, ir_log) = (trace_log.as_ref(), hb_log.as_ref(), ir_log.as_ref());
        let trace_reader = open(trace_log)?;
        let hb_reader = open(hb_log)?;
        let ir_reader = open(ir_log)?;

        self.ingest_hb_reader(hb_reader, hb_log)?;
        self.ingest_trace_reader(trace_reader, trace_log)?;
        self.load_ir_reader(ir_reader, ir_log)?;
        if self.config.validate {
            self.validate();
        }
        self.write_graph()?;
        Ok(self.stats())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Phase 1: HB log
    // ═══════════════════════════════════════════════════════════════════

    pub fn ingest_hb_log(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let reader = open(path)?;
        self.ingest_hb_reader(reader, path)
    }

    /// Read HB edges; `source` names the input in errors and logs
    pub fn ingest_hb_reader<R: BufRead>(&mut self, reader: R, source: &Path) -> Result<()> {
        if self.happens_before.begun_tasks() > 0 {
            warn!("HB edges ingested after tasks began; serial bags may be incomplete");
        }

        let mut edges = 0usize;
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| DetectorError::io(source, e))?;
            match parse_hb_line(&line) {
                Ok(Some(edge)) => {
                    self.happens_before.add_edge(edge.child, edge.parent);
                    edges += 1;
                }
                Ok(None) => {}
                Err(e) => {
                    warn!("{}:{}: skipping HB line: {}", source.display(), index + 1, e);
                    self.stats.skipped_lines += 1;
                }
            }
        }

        let graph = self.happens_before.graph();
        info!(
            "HB log: {} edge lines, {} tasks, {} distinct edges",
            edges,
            graph.node_count(),
            graph.edge_count()
        );
        if graph.has_cycle() {
            warn!("HB graph contains a cycle; happens-before sets may be incomplete");
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Phase 2: trace log
    // ═══════════════════════════════════════════════════════════════════

    pub fn ingest_trace_log(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let reader = open(path)?;
        self.ingest_trace_reader(reader, path)
    }

    /// Read trace events; fails only on IO errors or a fatal unregistered function
    pub fn ingest_trace_reader<R: BufRead>(&mut self, reader: R, source: &Path) -> Result<()> {
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| DetectorError::io(source, e))?;
            let event = match parse_trace_line(&line) {
                Ok(Some(event)) => event,
                Ok(None) => continue,
                Err(e) => {
                    warn!("{}:{}: skipping trace line: {}", source.display(), index + 1, e);
                    self.stats.trace_lines += 1;
                    self.stats.skipped_lines += 1;
                    continue;
                }
            };
            self.stats.trace_lines += 1;
            self.apply_event(event)?;
        }

        info!(
            "Trace log: {} lines, {} tasks begun, {} memory records, {} conflicts flagged",
            self.stats.trace_lines,
            self.happens_before.begun_tasks(),
            self.detector.records_seen(),
            self.detector.conflicts_flagged()
        );
        Ok(())
    }

    /// Apply one parsed trace event
    pub fn apply_event(&mut self, event: TraceEvent) -> Result<()> {
        match event {
            TraceEvent::FunctionRegistration { func_id, name } => {
                self.function_names.insert(func_id, name);
            }
            TraceEvent::TaskBegin { task_id, name } => {
                self.happens_before.begin_task(task_id, &name);
            }
            TraceEvent::MemoryAccess { first, last_write } => {
                for action in std::iter::once(&first).chain(last_write.as_ref()) {
                    if action.is_write() {
                        self.check_function(action)?;
                    }
                }
                self.detector
                    .record_access(&self.happens_before, first, last_write);
            }
            TraceEvent::Other { id, tag } => {
                trace!("Ignoring trace event {} {}", id, tag);
            }
        }
        Ok(())
    }

    fn check_function(&mut self, action: &Action) -> Result<()> {
        if self.function_names.contains_key(&action.func_id) {
            return Ok(());
        }
        self.stats.unregistered_functions += 1;

        match self.config.unregistered_function {
            UnregisteredFunctionPolicy::Fatal => Err(DetectorError::UnregisteredFunction {
                func_id: action.func_id,
                task_id: action.task_id,
                line_no: action.line_no,
            }),
            UnregisteredFunctionPolicy::Warn => {
                if self.warned_functions.insert(action.func_id) {
                    warn!(
                        "Function id {} (task {}, line {}) was never registered",
                        action.func_id, action.task_id, action.line_no
                    );
                }
                Ok(())
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Phase 3: IR log
    // ═══════════════════════════════════════════════════════════════════

    pub fn load_ir_log(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let reader = open(path)?;
        self.load_ir_reader(reader, path)
    }

    pub fn load_ir_reader<R: BufRead>(&mut self, reader: R, source: &Path) -> Result<()> {
        let parser = IrLogParser::with_debug_marker(self.config.debug_intrinsic_marker.as_str());
        let listings = parser
            .parse_reader(reader)
            .map_err(|e| DetectorError::io(source, e))?;

        info!("IR log: {} task listings", listings.len());
        self.stats.ir_listings = listings.len();
        self.commutativity = CommutativityAnalyzer::with_policy(listings, self.config.arithmetic);
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Phase 4: validation
    // ═══════════════════════════════════════════════════════════════════

    /// Eliminate conflicts whose stores commute
    pub fn validate(&mut self) -> EliminationSummary {
        let summary = eliminate_false_conflicts(self.detector.table_mut(), &self.commutativity);
        self.stats.duplicate_line_pairs += summary.duplicates_dropped;
        self.stats.eliminated_conflicts += summary.eliminated;
        debug!("Validation summary: {:?}", summary);
        summary
    }

    // ═══════════════════════════════════════════════════════════════════
    // Phase 5: outputs
    // ═══════════════════════════════════════════════════════════════════

    /// Console summary of the current conflict table
    pub fn render_report(&self) -> String {
        SummaryReporter::new(&self.function_names, self.config.report_address_limit)
            .render(self.detector.table(), &self.stats())
    }

    /// Dump the task graph as configured; returns the written paths
    pub fn write_graph(&self) -> Result<Vec<PathBuf>> {
        GraphWriter::save_all(self.happens_before.graph(), &self.config.graph_output)
    }

    /// Snapshot of the run counters
    pub fn stats(&self) -> AnalysisStats {
        let graph = self.happens_before.graph();
        AnalysisStats {
            tasks: graph.node_count(),
            hb_edges: graph.edge_count(),
            begun_tasks: self.happens_before.begun_tasks(),
            memory_records: self.detector.records_seen(),
            raw_conflicts: self.detector.conflicts_flagged(),
            remaining_conflicts: self.detector.table().conflict_count(),
            ..self.stats.clone()
        }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn happens_before(&self) -> &HappensBeforeReconstructor {
        &self.happens_before
    }

    pub fn detector(&self) -> &ConflictDetector {
        &self.detector
    }

    pub fn conflict_table(&self) -> &ConflictTable {
        self.detector.table()
    }

    pub fn function_names(&self) -> &HashMap<FuncId, String> {
        &self.function_names
    }

    pub fn listings(&self) -> &TaskListings {
        self.commutativity.listings()
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| DetectorError::io(path, e))
}
