//! Vulnreport report pipeline -- scan result normalization, aggregation and rendering.
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`ReportPipelineError`)
//! - [`config`]: Pipeline configuration (`ReportConfig`, builder, TOML loading)
//! - [`types`]: Canonical records (`VulnerabilityRecord`, `CvssMetrics`, `ScanMetadata`)
//! - [`schema`]: Vendor schema adapter (`ScanDocument`, `adapt`)
//! - [`normalize`]: Vendor entry normalization (`normalize_entry`)
//! - [`aggregate`]: Derived statistics (`severity_counts`, `RiskTier`, `CvssStats`, fixable grouping)
//! - [`render`]: Markdown report renderer
//! - [`export`]: JSON export serializer
//! - [`pipeline`]: Orchestrator (`ReportPipeline`, `IngestSummary`)
//!
//! # Architecture
//!
//! ```text
//! scan files --> ScanDocument --> adapt --> normalize_entry --> Vec<VulnerabilityRecord>
//!                     |                                               |
//!               ScanMetadata                         +----------------+----------------+
//!                                                    |                                 |
//!                                              aggregate (counts,              insertion-order
//!                                              risk tier, CVSS stats)              records
//!                                                    |                                 |
//!                                           render_markdown                     render_export
//!                                                    |                                 |
//!                                           security-report.md          vulnerability-export.json
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod export;
pub mod normalize;
pub mod pipeline;
pub mod render;
pub mod schema;
pub mod types;

// --- Public API Re-exports ---

// Orchestrator
pub use pipeline::{IngestSummary, ReportPipeline};

// Configuration
pub use config::{ReportConfig, ReportConfigBuilder};

// Error
pub use error::ReportPipelineError;

// Types
pub use types::{CvssMetrics, ScanMetadata, VulnerabilityRecord};

// Aggregation
pub use aggregate::{CvssStats, RiskTier};
