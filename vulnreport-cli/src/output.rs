//! Output formatting abstraction for text vs JSON rendering
//!
//! The run summary flows through [`OutputWriter`] which handles format
//! switching. This keeps format-specific logic out of the main flow.

use std::io::Write;

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Abstraction for writing CLI output in different formats.
///
/// Payloads implement both `Serialize` (for JSON) and `Render` (for text).
pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    /// Create a new output writer with the specified format.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render a payload to stdout.
    ///
    /// For `Text` format, delegates to `Render::render_text()`.
    /// For `Json` format, serialises via `serde_json`.
    pub fn render<T: Render + Serialize>(&self, payload: &T) -> Result<(), CliError> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        match self.format {
            OutputFormat::Text => {
                payload.render_text(&mut handle)?;
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut handle, payload)?;
                writeln!(handle)?;
            }
        }
        Ok(())
    }
}

/// Trait for human-readable text rendering.
///
/// Implemented by every CLI output payload alongside `serde::Serialize`.
pub trait Render {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()>;
}

/// Summary of a report generation run.
#[derive(Serialize)]
pub struct RunSummary {
    pub scanned_path: String,
    pub files_found: usize,
    pub files_processed: usize,
    pub files_failed: usize,
    pub total_vulnerabilities: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub unknown: usize,
    pub report_path: String,
    pub export_path: String,
}

impl Render for RunSummary {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Scanned: {}", self.scanned_path.bold())?;
        writeln!(
            w,
            "Files: {} found, {} processed, {} failed",
            self.files_found, self.files_processed, self.files_failed
        )?;
        writeln!(w)?;

        let vuln_str = format!(
            "{} total (C:{} H:{} M:{} L:{} U:{})",
            self.total_vulnerabilities, self.critical, self.high, self.medium, self.low, self.unknown
        );
        if self.critical + self.high > 0 {
            writeln!(w, "Vulnerabilities: {}", vuln_str.red().bold())?;
        } else if self.total_vulnerabilities > 0 {
            writeln!(w, "Vulnerabilities: {}", vuln_str.yellow().bold())?;
        } else {
            writeln!(w, "Vulnerabilities: {}", vuln_str.green().bold())?;
        }

        writeln!(w)?;
        writeln!(w, "Report:  {}", self.report_path)?;
        writeln!(w, "Export:  {}", self.export_path)?;

        Ok(())
    }
}
