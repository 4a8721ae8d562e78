//! vulnreport command-line entry point
//!
//! One-shot flow: load configuration, discover scan result files under
//! the given path, ingest them through the report pipeline, write the
//! Markdown report and JSON export, then print a run summary.

mod cli;
mod discover;
mod error;
mod output;

use std::path::Path;

use clap::Parser;
use tracing::info;

use vulnreport_core::Severity;
use vulnreport_report_pipeline::{ReportConfig, ReportPipeline};

use crate::cli::Cli;
use crate::error::CliError;
use crate::output::{OutputWriter, RunSummary};

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(&cli.log_level)
        .with_writer(std::io::stderr)
        .init();

    let writer = OutputWriter::new(cli.output);

    if let Err(error) = run(&cli, &writer) {
        use colored::Colorize;
        eprintln!("{} {}", "error:".red().bold(), error);
        std::process::exit(error.exit_code());
    }
}

fn run(cli: &Cli, writer: &OutputWriter) -> Result<(), CliError> {
    let config = load_config(cli)?;

    let files = discover::discover_scan_files(&cli.path, &config.scan_filenames);
    info!(path = %cli.path.display(), files = files.len(), "scan file discovery complete");

    let mut pipeline = ReportPipeline::new(config);
    let summary = pipeline.ingest_all(&files);

    let output_dir = Path::new(&pipeline.config().output_dir);
    std::fs::create_dir_all(output_dir)?;

    let report_path = output_dir.join(&pipeline.config().report_filename);
    std::fs::write(&report_path, pipeline.render_markdown())?;

    let export_path = output_dir.join(&pipeline.config().export_filename);
    std::fs::write(&export_path, pipeline.render_export()?)?;

    info!(
        report = %report_path.display(),
        export = %export_path.display(),
        "report artifacts written"
    );

    let count = |severity: Severity| {
        pipeline
            .records()
            .iter()
            .filter(|r| r.severity == severity)
            .count()
    };

    writer.render(&RunSummary {
        scanned_path: cli.path.display().to_string(),
        files_found: files.len(),
        files_processed: summary.files_processed,
        files_failed: summary.files_failed,
        total_vulnerabilities: pipeline.records().len(),
        critical: count(Severity::Critical),
        high: count(Severity::High),
        medium: count(Severity::Medium),
        low: count(Severity::Low),
        unknown: count(Severity::Unknown),
        report_path: report_path.display().to_string(),
        export_path: export_path.display().to_string(),
    })?;

    Ok(())
}

/// Load configuration from the given file (or defaults) and apply CLI overrides.
fn load_config(cli: &Cli) -> Result<ReportConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };

    if let Some(output_dir) = &cli.output_dir {
        config.output_dir = output_dir.clone();
    }
    if let Some(service) = &cli.service {
        config.service_name = service.clone();
    }

    config.validate()?;
    Ok(config)
}
