//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Vulnreport -- vulnerability scan report generator.
///
/// Scans a directory tree for recognized scanner result files,
/// normalizes them into canonical records, and writes a Markdown
/// report plus a JSON export.
#[derive(Parser, Debug)]
#[command(name = "vulnreport", version, about, long_about = None)]
pub struct Cli {
    /// Directory to search for scan result files (default: current directory).
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Path to a vulnreport.toml configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the output directory from the configuration.
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Service label shown in the report header.
    #[arg(short, long)]
    pub service: Option<String>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Output format for the run summary.
    #[arg(long, default_value = "text")]
    pub output: OutputFormat,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_defaults() {
        let args = Cli::try_parse_from(["vulnreport"]);
        assert!(args.is_ok(), "should parse with no arguments");
        let cli = args.expect("parse succeeded");
        assert_eq!(cli.path, PathBuf::from("."));
        assert!(cli.config.is_none(), "config should default to None");
        assert!(cli.output_dir.is_none(), "output_dir should default to None");
        assert!(cli.service.is_none(), "service should default to None");
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn test_cli_parse_custom_path() {
        let args = Cli::try_parse_from(["vulnreport", "/srv/scans"]);
        assert!(args.is_ok(), "should parse with custom path");
        let cli = args.expect("parse succeeded");
        assert_eq!(cli.path, PathBuf::from("/srv/scans"));
    }

    #[test]
    fn test_cli_parse_config_path() {
        let args = Cli::try_parse_from(["vulnreport", "-c", "/etc/vulnreport.toml"]);
        assert!(args.is_ok(), "should parse with config path");
        let cli = args.expect("parse succeeded");
        assert_eq!(cli.config, Some(PathBuf::from("/etc/vulnreport.toml")));
    }

    #[test]
    fn test_cli_parse_output_dir_override() {
        let args = Cli::try_parse_from(["vulnreport", "--output-dir", "out"]);
        assert!(args.is_ok(), "should parse with output-dir override");
        let cli = args.expect("parse succeeded");
        assert_eq!(cli.output_dir, Some("out".to_owned()));
    }

    #[test]
    fn test_cli_parse_service_label() {
        let args = Cli::try_parse_from(["vulnreport", "--service", "payments"]);
        assert!(args.is_ok(), "should parse with service label");
        let cli = args.expect("parse succeeded");
        assert_eq!(cli.service, Some("payments".to_owned()));
    }

    #[test]
    fn test_cli_parse_log_level() {
        let args = Cli::try_parse_from(["vulnreport", "--log-level", "debug"]);
        assert!(args.is_ok(), "should parse with custom log level");
        let cli = args.expect("parse succeeded");
        assert_eq!(cli.log_level, "debug");
    }

    #[test]
    fn test_cli_parse_output_format_json() {
        let args = Cli::try_parse_from(["vulnreport", "--output", "json"]);
        assert!(args.is_ok(), "should parse with json output format");
        let cli = args.expect("parse succeeded");
        match cli.output {
            OutputFormat::Json => {}
            _ => panic!("expected Json output format"),
        }
    }

    #[test]
    fn test_cli_parse_invalid_output_format_fails() {
        let args = Cli::try_parse_from(["vulnreport", "--output", "yaml"]);
        assert!(args.is_err(), "should fail on unsupported output format");
    }

    #[test]
    fn test_cli_verify_command_structure() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "vulnreport");
        assert_eq!(
            cmd.get_subcommands().count(),
            0,
            "vulnreport is a single-purpose command"
        );
    }
}
