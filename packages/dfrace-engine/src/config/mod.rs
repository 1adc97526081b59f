//! Detector Configuration
//!
//! Every knob has a default, so an empty configuration runs the standard
//! analysis. Overrides come from a versioned YAML file:
//!
//! ```yaml
//! version: 1
//! history_capacity: 8
//! unregistered_function: fatal
//! arithmetic: reject_multiplicative
//! graph_output:
//!   directory: out
//!   dot_file: dependency_graph.dot
//! ```

pub mod detector_config;
pub mod error;
pub mod validation;

// Re-exports
pub use detector_config::{
    ArithmeticPolicy, ConfigFileV1, DetectorConfig, GraphOutputConfig,
    UnregisteredFunctionPolicy,
};
pub use error::{ConfigError, ConfigResult};
pub use validation::Validatable;
