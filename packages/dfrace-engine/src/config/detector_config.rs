//! Detector configuration types

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::validation::Validatable;

/// Supported YAML schema versions
const SUPPORTED_VERSIONS: &[u32] = &[1];

/// What to do with a write whose function id was never registered by an `F` line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnregisteredFunctionPolicy {
    /// Log a warning and keep analyzing the action
    #[default]
    Warn,
    /// Abort the analysis
    Fatal,
}

/// Which arithmetic definitions the commutativity walk accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArithmeticPolicy {
    /// ADD/SUB and MUL/DIV are two commuting classes; a walk may use only one
    #[default]
    CommutingClasses,
    /// Only ADD/SUB are accepted; any MUL/DIV definition is unsafe
    RejectMultiplicative,
}

/// Dependency graph dump settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphOutputConfig {
    /// Write graph files at all
    pub enabled: bool,

    /// Directory the files are written into
    pub directory: PathBuf,

    /// Edge-list dump (`parent child` per line)
    pub edge_list_file: String,

    /// Node/edge JSON dump
    pub json_file: String,

    /// Optional Graphviz DOT dump
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dot_file: Option<String>,
}

impl Default for GraphOutputConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: PathBuf::from("."),
            edge_list_file: "dependency_graph.txt".to_string(),
            json_file: "dependency_graph.json".to_string(),
            dot_file: None,
        }
    }
}

impl GraphOutputConfig {
    pub fn edge_list_path(&self) -> PathBuf {
        self.directory.join(&self.edge_list_file)
    }

    pub fn json_path(&self) -> PathBuf {
        self.directory.join(&self.json_file)
    }

    pub fn dot_path(&self) -> Option<PathBuf> {
        self.dot_file.as_ref().map(|f| self.directory.join(f))
    }
}

/// Detector configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Records kept per address (1..=1024)
    pub history_capacity: usize,

    /// Addresses listed per task pair in the summary (1..=10000)
    pub report_address_limit: usize,

    /// Handling of unregistered function ids
    pub unregistered_function: UnregisteredFunctionPolicy,

    /// Arithmetic acceptance rule for the commutativity walk
    pub arithmetic: ArithmeticPolicy,

    /// IR log lines containing this marker are skipped
    pub debug_intrinsic_marker: String,

    /// Run the commutativity validator over the conflict table
    pub validate: bool,

    pub graph_output: GraphOutputConfig,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            history_capacity: 5,
            report_address_limit: 10,
            unregistered_function: UnregisteredFunctionPolicy::default(),
            arithmetic: ArithmeticPolicy::default(),
            debug_intrinsic_marker: "llvm.dbg".to_string(),
            validate: true,
            graph_output: GraphOutputConfig::default(),
        }
    }
}

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1)
    pub version: u32,

    #[serde(flatten)]
    pub detector: DetectorConfig,
}

impl DetectorConfig {
    /// Load and validate a configuration file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate YAML configuration text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;

        if !SUPPORTED_VERSIONS.contains(&file.version) {
            return Err(ConfigError::UnsupportedVersion {
                found: file.version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        file.detector.validate()?;
        Ok(file.detector)
    }

    /// Export as YAML v1
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: 1,
            detector: self.clone(),
        };
        serde_yaml::to_string(&file).map_err(ConfigError::Yaml)
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    pub fn with_arithmetic(mut self, policy: ArithmeticPolicy) -> Self {
        self.arithmetic = policy;
        self
    }

    pub fn with_unregistered_function(mut self, policy: UnregisteredFunctionPolicy) -> Self {
        self.unregistered_function = policy;
        self
    }
}

impl Validatable for DetectorConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.history_capacity == 0 || self.history_capacity > 1024 {
            return Err(ConfigError::range_with_hint(
                "history_capacity",
                self.history_capacity,
                1,
                1024,
                "The address history must hold at least one record",
            ));
        }

        if self.report_address_limit == 0 || self.report_address_limit > 10_000 {
            return Err(ConfigError::range_with_hint(
                "report_address_limit",
                self.report_address_limit,
                1,
                10_000,
                "Show at least one address per task pair",
            ));
        }

        if self.debug_intrinsic_marker.trim().is_empty() {
            return Err(ConfigError::Custom(
                "debug_intrinsic_marker must not be empty (it would skip every IR line)"
                    .to_string(),
            ));
        }

        let out = &self.graph_output;
        if out.enabled && (out.edge_list_file.is_empty() || out.json_file.is_empty()) {
            return Err(ConfigError::Custom(
                "graph_output file names must not be empty when graph output is enabled"
                    .to_string(),
            ));
        }

        Ok(())
    }
}
