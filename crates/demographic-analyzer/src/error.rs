//! Error types for the demographic analyzer.
//!
//! Every failure surfaces to the caller immediately; there is no partial
//! result mode. Numeric coercion problems are not errors at all, they turn
//! into missing cells (see [`crate::table`]).
//!
//! Errors are serializable as `{ "code", "message" }` so they can be emitted
//! in the same JSON stream as a successful report.

use serde::Serialize;
use serde::ser::SerializeStruct;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the analyzer.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// A required column is absent from the loaded table.
    #[error("Required column '{0}' not found in dataset")]
    MissingColumn(String),

    /// The denominator group of a percentage is empty.
    #[error("Cannot compute {statistic}: group '{group}' is empty")]
    DivisionUndefined { statistic: String, group: String },

    /// A column has no non-missing values for a min/max computation.
    #[error("Cannot compute {statistic}: column '{column}' has no valid values")]
    EmptyColumn { statistic: String, column: String },

    /// A group has no values for a mean/mode computation.
    #[error("Cannot compute {statistic}: no values in group '{group}'")]
    EmptyGroup { statistic: String, group: String },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Dataset file does not exist.
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<AnalyzerError>,
    },
}

impl AnalyzerError {
    pub(crate) fn division_undefined(statistic: &str, group: impl Into<String>) -> Self {
        Self::DivisionUndefined {
            statistic: statistic.to_string(),
            group: group.into(),
        }
    }

    pub(crate) fn empty_column(statistic: &str, column: &str) -> Self {
        Self::EmptyColumn {
            statistic: statistic.to_string(),
            column: column.to_string(),
        }
    }

    pub(crate) fn empty_group(statistic: &str, group: impl Into<String>) -> Self {
        Self::EmptyGroup {
            statistic: statistic.to_string(),
            group: group.into(),
        }
    }

    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        AnalyzerError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code for machine consumers.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingColumn(_) => "MISSING_COLUMN",
            Self::DivisionUndefined { .. } => "DIVISION_UNDEFINED",
            Self::EmptyColumn { .. } => "EMPTY_COLUMN",
            Self::EmptyGroup { .. } => "EMPTY_GROUP",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::InputNotFound(_) => "INPUT_NOT_FOUND",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Unwrap any context layers and return the underlying error.
    pub fn root(&self) -> &AnalyzerError {
        match self {
            Self::WithContext { source, .. } => source.root(),
            other => other,
        }
    }

    /// Check if this error comes from the statistics themselves rather than
    /// from loading the table.
    pub fn is_statistic_failure(&self) -> bool {
        matches!(
            self.root(),
            Self::DivisionUndefined { .. } | Self::EmptyColumn { .. } | Self::EmptyGroup { .. }
        )
    }
}

impl Serialize for AnalyzerError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("AnalyzerError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for analyzer operations.
pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| AnalyzerError::Polars(e).with_context(context))
    }
}
