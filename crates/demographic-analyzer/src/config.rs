//! Configuration types for the demographic analyzer.
//!
//! The defaults reproduce the classic adult-census questions; the builder
//! exists so the labels and rounding rule can be changed without touching
//! the statistics themselves.

use serde::{Deserialize, Serialize};

/// Rounding rule applied to every statistic reported with fixed decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Ties go to the even neighbour (35.25 -> 35.2).
    #[default]
    HalfEven,
    /// Ties go away from zero (35.25 -> 35.3).
    HalfAwayFromZero,
}

impl RoundingMode {
    /// Round `value` to `decimals` places using this rule.
    pub fn round(self, value: f64, decimals: u32) -> f64 {
        match self {
            RoundingMode::HalfEven => crate::numeric::round_half_even(value, decimals),
            RoundingMode::HalfAwayFromZero => {
                crate::numeric::round_half_away_from_zero(value, decimals)
            }
        }
    }
}

/// Configuration for a statistics run.
///
/// Use [`AnalyzerConfig::builder()`] for a validated configuration.
///
/// # Example
///
/// ```rust,ignore
/// use demographic_analyzer::config::{AnalyzerConfig, RoundingMode};
///
/// let config = AnalyzerConfig::builder()
///     .emit_text(false)
///     .rounding(RoundingMode::HalfAwayFromZero)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Whether to print the text rendering after computing.
    /// Default: true
    pub emit_text: bool,

    /// Rounding rule for percentages and means.
    /// Default: HalfEven
    pub rounding: RoundingMode,

    /// Decimal places kept by rounded statistics.
    /// Default: 1
    pub decimals: u32,

    /// Education values that count as advanced education.
    /// Default: Bachelors, Masters, Doctorate
    pub advanced_education: Vec<String>,

    /// Salary value counted as high income.
    /// Default: ">50K"
    pub high_income_label: String,

    /// Education value for the bachelors percentage.
    /// Default: "Bachelors"
    pub bachelors_label: String,

    /// Sex value used for the average age.
    /// Default: "Male"
    pub male_label: String,

    /// Country whose top high-income occupation is reported.
    /// Default: "India"
    pub focus_country: String,
}

/// Largest accepted value for [`AnalyzerConfig::decimals`].
pub const MAX_DECIMALS: u32 = 6;

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            emit_text: true,
            rounding: RoundingMode::default(),
            decimals: 1,
            advanced_education: vec![
                "Bachelors".to_string(),
                "Masters".to_string(),
                "Doctorate".to_string(),
            ],
            high_income_label: ">50K".to_string(),
            bachelors_label: "Bachelors".to_string(),
            male_label: "Male".to_string(),
            focus_country: "India".to_string(),
        }
    }
}

impl AnalyzerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.decimals > MAX_DECIMALS {
            return Err(ConfigValidationError::InvalidDecimals(self.decimals));
        }

        if self.advanced_education.is_empty() {
            return Err(ConfigValidationError::EmptyAdvancedEducation);
        }

        let labels = [
            ("high_income_label", &self.high_income_label),
            ("bachelors_label", &self.bachelors_label),
            ("male_label", &self.male_label),
            ("focus_country", &self.focus_country),
        ];
        for (field, value) in labels {
            if value.trim().is_empty() {
                return Err(ConfigValidationError::EmptyLabel(field.to_string()));
            }
        }
        if self.advanced_education.iter().any(|e| e.trim().is_empty()) {
            return Err(ConfigValidationError::EmptyLabel(
                "advanced_education".to_string(),
            ));
        }

        Ok(())
    }

    /// Check whether an education value belongs to the advanced group.
    pub fn is_advanced_education(&self, education: &str) -> bool {
        self.advanced_education.iter().any(|e| e == education)
    }

    /// Round a value with the configured rule and precision.
    pub fn round(&self, value: f64) -> f64 {
        self.rounding.round(value, self.decimals)
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid decimals: {0} (must be at most {MAX_DECIMALS})")]
    InvalidDecimals(u32),

    #[error("Advanced education set must not be empty")]
    EmptyAdvancedEducation,

    #[error("Label '{0}' must not be empty")]
    EmptyLabel(String),
}

impl From<ConfigValidationError> for crate::error::AnalyzerError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::AnalyzerError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`AnalyzerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalyzerConfigBuilder {
    emit_text: Option<bool>,
    rounding: Option<RoundingMode>,
    decimals: Option<u32>,
    advanced_education: Option<Vec<String>>,
    high_income_label: Option<String>,
    bachelors_label: Option<String>,
    male_label: Option<String>,
    focus_country: Option<String>,
}

impl AnalyzerConfigBuilder {
    /// Enable or disable the text rendering.
    pub fn emit_text(mut self, emit: bool) -> Self {
        self.emit_text = Some(emit);
        self
    }

    /// Set the rounding rule.
    pub fn rounding(mut self, mode: RoundingMode) -> Self {
        self.rounding = Some(mode);
        self
    }

    /// Set the number of decimals kept by rounded statistics.
    pub fn decimals(mut self, decimals: u32) -> Self {
        self.decimals = Some(decimals);
        self
    }

    /// Replace the set of advanced education values.
    pub fn advanced_education<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.advanced_education = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Set the salary value counted as high income.
    pub fn high_income_label(mut self, label: impl Into<String>) -> Self {
        self.high_income_label = Some(label.into());
        self
    }

    /// Set the education value used for the bachelors percentage.
    pub fn bachelors_label(mut self, label: impl Into<String>) -> Self {
        self.bachelors_label = Some(label.into());
        self
    }

    /// Set the sex value used for the average age.
    pub fn male_label(mut self, label: impl Into<String>) -> Self {
        self.male_label = Some(label.into());
        self
    }

    /// Set the country whose top occupation is reported.
    pub fn focus_country(mut self, country: impl Into<String>) -> Self {
        self.focus_country = Some(country.into());
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalyzerConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalyzerConfig, ConfigValidationError> {
        let defaults = AnalyzerConfig::default();
        let config = AnalyzerConfig {
            emit_text: self.emit_text.unwrap_or(defaults.emit_text),
            rounding: self.rounding.unwrap_or_default(),
            decimals: self.decimals.unwrap_or(defaults.decimals),
            advanced_education: self
                .advanced_education
                .unwrap_or(defaults.advanced_education),
            high_income_label: self
                .high_income_label
                .unwrap_or(defaults.high_income_label),
            bachelors_label: self.bachelors_label.unwrap_or(defaults.bachelors_label),
            male_label: self.male_label.unwrap_or(defaults.male_label),
            focus_country: self.focus_country.unwrap_or(defaults.focus_country),
        };

        config.validate()?;
        Ok(config)
    }
}
