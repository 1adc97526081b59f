//! Shared module - Common types used by every feature

pub mod models;

pub use models::*;
