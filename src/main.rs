//! CLI entry point for the pRRTC benchmark analyzer.
//!
//! Provides subcommands for analyzing a single benchmark CSV, sweeping a
//! whole test-output directory, and exporting solved joint paths for the
//! external trajectory player.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use prrtc_analyzer::analyzers::aggregate::aggregate;
use prrtc_analyzer::analyzers::types::FieldSchema;
use prrtc_analyzer::error::FileAccessError;
use prrtc_analyzer::loader::load_records;
use prrtc_analyzer::report::{render_json, render_text};
use prrtc_analyzer::trajectory::{load_waypoints, write_waypoints_csv};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "prrtc_analyzer")]
#[command(about = "A tool to analyze pRRTC benchmark output", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a single benchmark CSV file
    Analyze {
        /// Path to the benchmark CSV
        #[arg(value_name = "CSV_FILE")]
        input: PathBuf,

        /// Emit the summary as pretty JSON instead of the text report
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Analyze every CSV file in a test-output directory
    AnalyzeAll {
        /// Directory containing benchmark CSVs
        /// (falls back to $TEST_OUTPUT_DIR, then "test_output")
        #[arg(short = 'd', long)]
        output_dir: Option<PathBuf>,
    },
    /// Export joint-space waypoints from planner console output
    ExportPath {
        /// Path to the planner console output
        #[arg(value_name = "CONSOLE_OUTPUT")]
        input: PathBuf,

        /// CSV file to write the waypoints to
        #[arg(short, long, default_value = "path_waypoints.csv")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/prrtc_analyzer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("prrtc_analyzer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { input, json } => {
            analyze_file(&input, json)?;
        }
        Commands::AnalyzeAll { output_dir } => {
            let dir = output_dir
                .or_else(|| std::env::var("TEST_OUTPUT_DIR").ok().map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from("test_output"));
            analyze_all(&dir)?;
        }
        Commands::ExportPath { input, output } => {
            let joint_path = load_waypoints(&input)?;
            info!(
                robot = ?joint_path.robot,
                dof = joint_path.dof(),
                waypoints = joint_path.waypoints.len(),
                "Joint path loaded"
            );

            write_waypoints_csv(&output, &joint_path)?;
            info!(output = %output.display(), "Waypoints written for the path player");
        }
    }

    Ok(())
}

/// Runs the full load → aggregate → render pipeline for one CSV file.
#[tracing::instrument(skip(input), fields(path = %input.display()))]
fn analyze_file(input: &Path, json: bool) -> Result<()> {
    let records = load_records(input)?;
    let schema = FieldSchema::default();
    let summary = aggregate(&records, &schema);

    let source = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());

    if json {
        println!("{}", render_json(&source, &summary, &schema)?);
    } else {
        print!("{}", render_text(&source, &summary, &schema));
    }

    info!(
        records = records.len(),
        problems = summary.groups.len(),
        skipped = summary.skipped.len(),
        "Analysis complete"
    );
    Ok(())
}

/// Analyzes every CSV in `dir` in sorted order, one report per file.
#[tracing::instrument(skip(dir), fields(path = %dir.display()))]
fn analyze_all(dir: &Path) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| FileAccessError::new(dir, e))?;

    let mut csv_files = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("csv") {
            csv_files.push(path);
        }
    }
    csv_files.sort();

    if csv_files.is_empty() {
        warn!("No CSV files found");
        println!("No CSV files found in {}", dir.display());
        return Ok(());
    }

    info!(count = csv_files.len(), "Analyzing CSV files");

    for path in &csv_files {
        println!("Analyzing: {}", path.display());
        analyze_file(path, false)?;
        println!();
    }

    Ok(())
}
