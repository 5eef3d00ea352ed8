//! CLI entry point for the exam roster analyzer.
//!
//! Provides subcommands for analyzing a roster spreadsheet and for
//! exporting the formatted exam report.

use std::ffi::OsStr;
use std::path::Path;
use std::time::UNIX_EPOCH;

use anyhow::Result;
use clap::{Parser, Subcommand};
use exam_roster_analyzer::{
    analysis::FileIdentity,
    cache::DirCache,
    export::write_report,
    extract::{analyze_bytes, analyze_with_cache},
    notify::LogNotifier,
    output::{append_record, print_json, write_json},
};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "exam_roster_analyzer")]
#[command(about = "A tool to analyze exam roster spreadsheets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a roster spreadsheet file
    Analyze {
        /// Path to the xlsx file
        #[arg(value_name = "FILE")]
        source: String,

        /// CSV file to append the summary row to
        #[arg(short, long, default_value = "data.csv")]
        output: String,

        /// Optional path to write the full analysis record as JSON
        #[arg(short, long)]
        json: Option<String>,

        /// Optional directory used as the analysis cache
        #[arg(short, long)]
        cache_dir: Option<String>,
    },
    /// Analyze a roster spreadsheet and write the formatted exam report
    Export {
        /// Path to the xlsx file
        #[arg(value_name = "FILE")]
        source: String,

        /// Exam date override for the report (the record keeps its own)
        #[arg(long)]
        exam_date: Option<String>,

        /// Correction date override for the report
        #[arg(long)]
        correction_date: Option<String>,

        /// Directory to write the report into
        #[arg(short, long, default_value = ".")]
        output_dir: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/exam_roster_analyzer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("exam_roster_analyzer.log"));

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
        Commands::Analyze {
            source,
            output,
            json,
            cache_dir,
        } => {
            let bytes = std::fs::read(&source)?;
            let identity = file_identity(&source)?;

            let analysis = match cache_dir {
                Some(dir) => {
                    let cache = DirCache::new(dir);
                    analyze_with_cache(&cache, &LogNotifier, &bytes, identity).await?
                }
                None => analyze_bytes(&bytes, identity)?,
            };

            append_record(&output, &analysis)?;
            if let Some(json_path) = json {
                write_json(&json_path, &analysis)?;
            }

            info!(
                students = analysis.student_count,
                pass = analysis.final_score_stats.pass_count,
                fail = analysis.final_score_stats.fail_count,
                average = analysis.final_score_stats.average_score,
                "Roster analyzed"
            );
            print_json(&analysis)?;
        }
        Commands::Export {
            source,
            exam_date,
            correction_date,
            output_dir,
        } => {
            let bytes = std::fs::read(&source)?;
            let identity = file_identity(&source)?;
            let analysis = analyze_bytes(&bytes, identity)?;

            let path = write_report(
                &analysis,
                exam_date.as_deref(),
                correction_date.as_deref(),
                Path::new(&output_dir),
            )?;

            info!(report = %path.display(), "Export complete");
        }
    }

    Ok(())
}

/// Builds the file identity from the path's file name and its
/// modification time in milliseconds.
fn file_identity(source: &str) -> Result<FileIdentity> {
    let path = Path::new(source);
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(source)
        .to_string();

    let last_modified = std::fs::metadata(path)?
        .modified()?
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0);

    Ok(FileIdentity::new(name, last_modified))
}
