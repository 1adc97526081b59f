//! Error types for dfrace-engine
//!
//! Provides unified error handling across the crate. Only fatal conditions
//! live here; malformed log lines are recovered where they are parsed.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::shared::models::{FuncId, TaskId};

/// Main error type for dfrace operations
#[derive(Debug, Error)]
pub enum DetectorError {
    /// Input or output file could not be opened, read or written
    #[error("cannot access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A memory action references a function id with no `F` registration
    #[error("function id {func_id} used by task {task_id} at line {line_no} was never registered")]
    UnregisteredFunction {
        func_id: FuncId,
        task_id: TaskId,
        line_no: u32,
    },

    /// Graph dump serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DetectorError {
    /// Wrap an IO error with the path it concerns
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DetectorError::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach the config file path to a load failure; parse and validation
    /// errors stay configuration errors
    pub fn config_file(path: impl Into<PathBuf>, error: ConfigError) -> Self {
        match error {
            ConfigError::Io(source) => DetectorError::io(path, source),
            other => DetectorError::Config(other),
        }
    }
}

/// Result type alias for dfrace operations
pub type Result<T> = std::result::Result<T, DetectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_file() {
        let err = DetectorError::io(
            "trace.log",
            std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
        );
        let msg = err.to_string();
        assert!(msg.contains("trace.log"));
        assert!(msg.contains("No such file"));
    }

    #[test]
    fn test_config_file_errors() {
        let missing = DetectorError::config_file(
            "dfrace.yaml",
            ConfigError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "No such file")),
        );
        assert!(matches!(&missing, DetectorError::Io { path, .. } if path.ends_with("dfrace.yaml")));

        let invalid = DetectorError::config_file(
            "dfrace.yaml",
            ConfigError::UnsupportedVersion { found: 2, supported: vec![1] },
        );
        assert!(matches!(invalid, DetectorError::Config(ConfigError::UnsupportedVersion { .. })));
    }

    #[test]
    fn test_unregistered_function_message() {
        let err = DetectorError::UnregisteredFunction {
            func_id: 7,
            task_id: 3,
            line_no: 42,
        };
        assert_eq!(
            err.to_string(),
            "function id 7 used by task 3 at line 42 was never registered"
        );
    }
}
