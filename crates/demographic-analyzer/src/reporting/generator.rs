use crate::config::RoundingMode;
use crate::error::Result;
use crate::table::{CensusTable, CoercionSummary};
use crate::types::DemographicStatistics;
use chrono::Local;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

// ============================================================================
// Report Types
// ============================================================================

/// Statistics plus the metadata of the run that produced them.
///
/// Used for both JSON output (`--json`) and file writing (`--emit-report`).
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path to the input dataset
    pub input_file: String,
    /// Number of rows in the dataset
    pub row_count: usize,
    /// Cells per numeric column that could not be parsed
    pub missing_values: CoercionSummary,
    /// Rounding rule used for the rounded statistics
    pub rounding: RoundingMode,
    /// The ten statistics
    pub statistics: DemographicStatistics,
}

impl AnalysisReport {
    pub fn new(
        input_file: impl Into<String>,
        table: &CensusTable,
        rounding: RoundingMode,
        statistics: DemographicStatistics,
    ) -> Self {
        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.into(),
            row_count: table.len(),
            missing_values: table.coercion_summary().clone(),
            rounding,
            statistics,
        }
    }
}

// ============================================================================
// Report Generator
// ============================================================================

/// Writes [`AnalysisReport`]s to an output directory.
pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./outputs"),
        }
    }
}

impl ReportGenerator {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// Write `report` as `<report_base_name>_report.json`, creating the
    /// output directory if needed.
    pub fn write_report_to_file(
        &self,
        report: &AnalysisReport,
        report_base_name: &str,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let report_path = self
            .output_dir
            .join(format!("{}_report.json", report_base_name));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::DemographicAnalyzer;
    use crate::config::AnalyzerConfig;
    use crate::table::test_support::{row, table};

    fn sample_table() -> CensusTable {
        table(&[
            row("40", "Bachelors", "White", "Male", "40", "India", "Exec-managerial", ">50K"),
            row("?", "HS-grad", "Black", "Female", "20", "Cuba", "Sales", "<=50K"),
        ])
    }

    #[test]
    fn test_report_carries_metadata() {
        let t = sample_table();
        let stats = DemographicAnalyzer::new(AnalyzerConfig::default())
            .unwrap()
            .compute(&t)
            .unwrap();
        let report = AnalysisReport::new("adult.data.csv", &t, RoundingMode::HalfEven, stats);

        assert_eq!(report.row_count, 2);
        assert_eq!(report.missing_values.total_missing(), 1);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["input_file"], "adult.data.csv");
        assert_eq!(json["rounding"], "half_even");
        assert_eq!(json["statistics"]["top_IN_occupation"], "Exec-managerial");
        assert_eq!(json["missing_values"]["missing"]["age"], 1);
    }

    #[test]
    fn test_write_report_to_file() {
        let t = sample_table();
        let stats = DemographicAnalyzer::new(AnalyzerConfig::default())
            .unwrap()
            .compute(&t)
            .unwrap();
        let report = AnalysisReport::new("sample.csv", &t, RoundingMode::HalfEven, stats);

        let dir = std::env::temp_dir().join(format!(
            "demographic-analyzer-report-{}",
            std::process::id()
        ));
        let path = ReportGenerator::new(dir.clone())
            .write_report_to_file(&report, "sample")
            .unwrap();

        assert!(path.ends_with("sample_report.json"));
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["row_count"], 2);
        assert_eq!(written["statistics"]["min_work_hours"], 20);

        fs::remove_dir_all(dir).ok();
    }
}
