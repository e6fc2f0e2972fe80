//! Demographic Statistics Library
//!
//! Descriptive statistics over the UCI "adult" census extract, built with
//! Rust and Polars.
//!
//! # Overview
//!
//! A run loads the dataset, checks its schema, coerces the numeric columns
//! and answers ten independent questions:
//!
//! - **race_count**: rows per race, most frequent first
//! - **average_age_men**: mean age of men
//! - **percentage_bachelors**: share of people holding a bachelors degree
//! - **higher_education_rich / lower_education_rich**: share earning `>50K`
//!   with and without advanced education
//! - **min_work_hours / rich_percentage**: minimum weekly hours and the share
//!   earning `>50K` among those who work them
//! - **highest_earning_country(_percentage)**: country with the highest
//!   share earning `>50K`
//! - **top_IN_occupation**: most common occupation of high earners in India
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use demographic_analyzer::compute_statistics;
//! use std::path::PathBuf;
//!
//! let stats = compute_statistics(PathBuf::from("adult.data.csv"), true)?;
//! println!("{}", stats.highest_earning_country);
//! ```
//!
//! # Configuration
//!
//! ```rust,ignore
//! use demographic_analyzer::{AnalyzerConfig, DemographicAnalyzer, RoundingMode};
//!
//! let config = AnalyzerConfig::builder()
//!     .emit_text(false)
//!     .rounding(RoundingMode::HalfAwayFromZero)
//!     .build()?;
//!
//! let stats = DemographicAnalyzer::new(config)?.analyze(PathBuf::from("adult.data.csv"))?;
//! ```
//!
//! # Missing values
//!
//! Numeric cells that do not parse (for example `"?"`) become missing. They
//! are left out of numeric aggregates but their rows stay in the table, so
//! categorical counts still see them.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod loader;
pub mod numeric;
pub mod reporting;
pub mod statistics;
pub mod table;
pub mod types;

// Re-exports for convenient access
pub use analyzer::{DemographicAnalyzer, TableSource, compute_statistics};
pub use config::{AnalyzerConfig, AnalyzerConfigBuilder, ConfigValidationError, RoundingMode};
pub use error::{AnalyzerError, Result as AnalyzerResult, ResultExt};
pub use reporting::{AnalysisReport, ReportGenerator, render_text, write_text};
pub use table::{CensusTable, CoercionSummary};
pub use types::{CountryRate, DemographicStatistics, ValueCounts};
