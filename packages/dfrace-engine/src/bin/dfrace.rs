//! dfrace CLI
//!
//! Offline non-determinism detection for dataflow task programs.
//!
//! # Usage
//!
//! ```bash
//! dfrace trace.log hb.log ir.log
//! dfrace trace.log hb.log ir.log --config dfrace.yaml --verbose
//! ```
//!
//! The report goes to stdout, diagnostics to stderr. Usage and IO errors
//! exit with status -1.

use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::Parser;
use dfrace_engine::{Analyzer, DetectorConfig, DetectorError};
use tracing_subscriber::EnvFilter;

const FAILURE: i32 = -1;

#[derive(Parser)]
#[command(name = "dfrace")]
#[command(about = "Detect non-deterministic memory accesses in dataflow task traces", long_about = None)]
struct Cli {
    /// Trace log (function registrations, task begins, memory actions)
    trace_log: PathBuf,

    /// Happens-before edge log (`<child> <parent>` per line)
    hb_log: PathBuf,

    /// Per-task pseudo-IR log
    ir_log: PathBuf,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log analysis phases to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Skip the commutativity validator
    #[arg(long)]
    no_validate: bool,

    /// Do not write dependency graph files
    #[arg(long)]
    no_graph: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            process::exit(FAILURE);
        }
    };

    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(FAILURE);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), DetectorError> {
    let start = Instant::now();

    let mut config = match &cli.config {
        Some(path) => {
            DetectorConfig::from_yaml(path).map_err(|e| DetectorError::config_file(path, e))?
        }
        None => DetectorConfig::default(),
    };
    if cli.no_validate {
        config.validate = false;
    }
    if cli.no_graph {
        config.graph_output.enabled = false;
    }

    let mut analyzer = Analyzer::new(config);
    analyzer.run(&cli.trace_log, &cli.hb_log, &cli.ir_log)?;

    print!("{}", analyzer.render_report());
    println!("Execution time: {:.3}s", start.elapsed().as_secs_f64());
    Ok(())
}
