//! Vulnreport core -- shared types for the report pipeline and CLI.
//!
//! # Module Structure
//!
//! - [`severity`]: Severity classification (`Severity`, glyph/weight/color table, CVSS bucketing)
//! - [`error`]: Top-level error taxonomy (`VulnreportError`, `ConfigError`, `IngestError`)

pub mod error;
pub mod severity;

// --- Public API Re-exports ---

pub use error::{ConfigError, IngestError, VulnreportError};
pub use severity::{REPORTABLE_SEVERITIES, Severity};
