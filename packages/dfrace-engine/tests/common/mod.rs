//! Shared fixtures for integration tests

use std::path::PathBuf;

use dfrace_engine::DetectorConfig;
use tempfile::TempDir;

/// The three input logs written into a temporary directory
pub struct LogFixture {
    pub dir: TempDir,
    pub trace_log: PathBuf,
    pub hb_log: PathBuf,
    pub ir_log: PathBuf,
}

impl LogFixture {
    pub fn new(trace: &str, hb: &str, ir: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let trace_log = dir.path().join("trace.log");
        let hb_log = dir.path().join("hb.log");
        let ir_log = dir.path().join("ir.log");
        std::fs::write(&trace_log, trace).unwrap();
        std::fs::write(&hb_log, hb).unwrap();
        std::fs::write(&ir_log, ir).unwrap();
        Self {
            dir,
            trace_log,
            hb_log,
            ir_log,
        }
    }

    /// Default configuration with graph dumps redirected into the fixture
    pub fn config(&self) -> DetectorConfig {
        let mut config = DetectorConfig::default();
        config.graph_output.directory = self.dir.path().to_path_buf();
        config
    }
}

/// Two unordered tasks writing 100 and 200 to one address (lines 5 and 7)
pub const RACING_TRACE: &str = "\
1 F update
10 B producer
20 B consumer
10 W 0x7ffd1000 100 5 1
20 W 0x7ffd1000 200 7 1
";

/// IR where both stores commute (`alloca; add; store`)
pub const COMMUTING_IR: &str = "\
producer
5: %x = alloca i32, align 4
5: %y = add nsw i32 %x, 1
5: store i32 %y, i32* %x, align 4
consumer
7: %x = alloca i32, align 4
7: %y = add nsw i32 %x, 1
7: store i32 %y, i32* %x, align 4
";
