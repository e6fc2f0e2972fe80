//! Entry point tying loading, coercion and the statistics together.

use crate::config::AnalyzerConfig;
use crate::error::{Result, ResultExt};
use crate::loader::{load_csv, load_csv_str};
use crate::reporting::write_text;
use crate::statistics;
use crate::table::CensusTable;
use crate::types::DemographicStatistics;
use polars::prelude::DataFrame;
use std::path::PathBuf;
use tracing::{debug, info};

/// Where the census table comes from.
#[derive(Debug, Clone)]
pub enum TableSource {
    /// CSV file on disk.
    File(PathBuf),
    /// CSV text already in memory.
    Csv(String),
    /// A loaded frame; columns may be of any dtype.
    Frame(DataFrame),
}

impl TableSource {
    /// Resolve the source into a validated, coerced table.
    pub fn load(&self) -> Result<CensusTable> {
        match self {
            TableSource::File(path) => {
                let df = load_csv(path)?;
                CensusTable::from_dataframe(&df)
                    .context(format!("Invalid dataset '{}'", path.display()))
            }
            TableSource::Csv(content) => CensusTable::from_dataframe(&load_csv_str(content)?),
            TableSource::Frame(df) => CensusTable::from_dataframe(df),
        }
    }
}

impl From<PathBuf> for TableSource {
    fn from(path: PathBuf) -> Self {
        TableSource::File(path)
    }
}

impl From<&std::path::Path> for TableSource {
    fn from(path: &std::path::Path) -> Self {
        TableSource::File(path.to_path_buf())
    }
}

impl From<DataFrame> for TableSource {
    fn from(df: DataFrame) -> Self {
        TableSource::Frame(df)
    }
}

/// Computes the ten statistics with a given configuration.
#[derive(Debug, Clone, Default)]
pub struct DemographicAnalyzer {
    config: AnalyzerConfig,
}

impl DemographicAnalyzer {
    /// Create an analyzer, rejecting an invalid configuration.
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Compute all statistics. The first failing statistic aborts the run.
    pub fn compute(&self, table: &CensusTable) -> Result<DemographicStatistics> {
        let config = &self.config;
        debug!("Computing statistics over {} rows", table.len());

        let race_count = statistics::race_count(table);
        let average_age_men = statistics::average_age_men(table, config)?;
        let percentage_bachelors = statistics::percentage_bachelors(table, config)?;
        let higher_education_rich = statistics::higher_education_rich(table, config)?;
        let lower_education_rich = statistics::lower_education_rich(table, config)?;
        let min_work_hours = statistics::min_work_hours(table)?;
        let rich_percentage = statistics::rich_percentage(table, config)?;
        let best_country = statistics::highest_earning_country(table, config)?;
        let top_in_occupation = statistics::top_occupation(table, config)?;

        debug!(
            "Highest earning country: {} ({:.3}%)",
            best_country.country, best_country.rate
        );

        Ok(DemographicStatistics {
            race_count,
            average_age_men,
            percentage_bachelors,
            higher_education_rich,
            lower_education_rich,
            min_work_hours,
            rich_percentage,
            highest_earning_country_percentage: config.round(best_country.rate),
            highest_earning_country: best_country.country,
            top_in_occupation,
        })
    }

    /// Compute, then print the text rendering to stdout if enabled.
    pub fn run(&self, table: &CensusTable) -> Result<DemographicStatistics> {
        let stats = self.compute(table)?;
        if self.config.emit_text {
            write_text(&stats, &self.config, &mut std::io::stdout().lock())?;
        }
        info!("Computed statistics for {} rows", table.len());
        Ok(stats)
    }

    /// Load `source` and run.
    pub fn analyze(&self, source: impl Into<TableSource>) -> Result<DemographicStatistics> {
        let table = source.into().load()?;
        self.run(&table)
    }
}

/// Load `source`, compute the ten statistics and optionally print them.
///
/// `emit_text` only controls printing; the returned values are the same
/// either way.
pub fn compute_statistics(
    source: impl Into<TableSource>,
    emit_text: bool,
) -> Result<DemographicStatistics> {
    let config = AnalyzerConfig {
        emit_text,
        ..AnalyzerConfig::default()
    };
    DemographicAnalyzer::new(config)?.analyze(source)
}
