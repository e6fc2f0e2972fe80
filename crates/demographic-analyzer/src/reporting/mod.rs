//! Report output.
//!
//! - [`render_text`] produces the labeled lines printed when text emission
//!   is enabled.
//! - [`AnalysisReport`] wraps the statistics with run metadata for JSON
//!   output (`--json`) and report files (`--emit-report`).
//!
//! # Example
//!
//! ```rust,ignore
//! use demographic_analyzer::reporting::{AnalysisReport, ReportGenerator};
//!
//! let report = AnalysisReport::new("adult.data.csv", &table, config.rounding, stats);
//! println!("{}", serde_json::to_string_pretty(&report)?);
//!
//! let generator = ReportGenerator::new(PathBuf::from("outputs"));
//! generator.write_report_to_file(&report, "adult.data")?;
//! ```

mod generator;
mod text;

pub use generator::{AnalysisReport, ReportGenerator};
pub use text::{render_text, write_text};
