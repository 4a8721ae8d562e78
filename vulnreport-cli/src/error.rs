//! CLI-specific error types and exit code mapping

use vulnreport_report_pipeline::ReportPipelineError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to standard Unix exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// Report generation failed.
    #[error("{0}")]
    Report(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning              |
    /// |------|----------------------|
    /// | 0    | Success              |
    /// | 1    | Report error         |
    /// | 2    | Configuration error  |
    /// | 10   | IO error             |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Io(_) => 10,
            Self::JsonSerialize(_) | Self::Report(_) => 1,
        }
    }
}

impl From<ReportPipelineError> for CliError {
    fn from(e: ReportPipelineError) -> Self {
        match e {
            ReportPipelineError::Config { .. } => Self::Config(e.to_string()),
            ReportPipelineError::Io { source, path } => Self::Io(std::io::Error::new(
                source.kind(),
                format!("{path}: {source}"),
            )),
            other => Self::Report(other.to_string()),
        }
    }
}
