//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains:
//! - domain/     - Pure business logic (no external dependencies)
//! - ports/      - Interface definitions (traits)
//! - application/ - Use cases
//! - infrastructure/ - Implementations
//!
//! Data flows leaves first: trace_log feeds happens_before and
//! conflict_detection; pseudo_ir feeds commutativity; report renders both.

pub mod commutativity;
pub mod conflict_detection;
pub mod happens_before;
pub mod pseudo_ir;
pub mod report;
pub mod trace_log;
