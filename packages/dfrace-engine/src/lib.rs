/*
 * dfrace - Offline Non-Determinism Detector for Dataflow Task Programs
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (TaskId, Action, AccessKind)
 * - features/    : Vertical slices (trace log → happens-before → conflicts → pseudo-IR → commutativity → report)
 * - pipeline/    : Analyzer (owns all analysis state, drives the batch phases)
 * - config/      : YAML-loadable detector configuration
 *
 * Inputs are the HB edge log, the trace log and the per-task pseudo-IR log.
 * The engine is single-threaded and deterministic: identical logs give identical reports.
 */

#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::module_inception)] // Module naming intentional

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models
pub mod shared;

/// Feature modules
pub mod features;

/// Analysis pipeline (Analyzer)
pub mod pipeline;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::DetectorConfig;
pub use errors::{DetectorError, Result};
pub use pipeline::{AnalysisStats, Analyzer};
