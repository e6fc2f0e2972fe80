//! Integration tests for the demographic analyzer.
//!
//! These tests run the full load -> coerce -> compute path on CSV fixtures.

use demographic_analyzer::{
    AnalysisReport, AnalyzerConfig, AnalyzerError, CensusTable, DemographicAnalyzer,
    RoundingMode, TableSource, compute_statistics, render_text,
};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture(filename: &str) -> PathBuf {
    fixtures_path().join(filename)
}

fn quiet() -> DemographicAnalyzer {
    DemographicAnalyzer::new(AnalyzerConfig::builder().emit_text(false).build().unwrap()).unwrap()
}

// ============================================================================
// Full Run on the Sample Extract
// ============================================================================

#[test]
fn test_sample_extract_all_statistics() {
    let stats = compute_statistics(fixture("adult_sample.csv"), false).unwrap();

    let races: Vec<_> = stats.race_count.iter().collect();
    assert_eq!(
        races,
        vec![
            ("White", 12),
            ("Black", 5),
            ("Asian-Pac-Islander", 2),
            ("Amer-Indian-Eskimo", 1),
        ]
    );
    assert_eq!(stats.average_age_men, 38.7);
    assert_eq!(stats.percentage_bachelors, 30.0);
    assert_eq!(stats.higher_education_rich, 44.4);
    assert_eq!(stats.lower_education_rich, 27.3);
    assert_eq!(stats.min_work_hours, 13);
    assert_eq!(stats.rich_percentage, 0.0);
    // India and "?" both reach 100%; India appears first.
    assert_eq!(stats.highest_earning_country, "India");
    assert_eq!(stats.highest_earning_country_percentage, 100.0);
    assert_eq!(stats.top_in_occupation, "Prof-specialty");
}

#[test]
fn test_race_counts_cover_every_row() {
    let table = TableSource::from(fixture("adult_sample.csv")).load().unwrap();
    let stats = quiet().compute(&table).unwrap();
    assert_eq!(stats.race_count.total(), table.len());
}

#[test]
fn test_percentages_within_bounds() {
    let stats = compute_statistics(fixture("adult_sample.csv"), false).unwrap();
    for value in [
        stats.percentage_bachelors,
        stats.higher_education_rich,
        stats.lower_education_rich,
        stats.rich_percentage,
        stats.highest_earning_country_percentage,
    ] {
        assert!((0.0..=100.0).contains(&value), "out of range: {value}");
    }
}

#[test]
fn test_repeated_runs_are_identical() {
    let first = compute_statistics(fixture("adult_sample.csv"), false).unwrap();
    let second = compute_statistics(fixture("adult_sample.csv"), false).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_loaded_frame_with_inferred_dtypes() {
    // Numeric columns arrive as Int64 here instead of text.
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(fixture("adult_sample.csv")))
        .expect("Failed to create CSV reader")
        .finish()
        .expect("Failed to read CSV file");
    assert_eq!(df.column("age").unwrap().dtype(), &DataType::Int64);

    let from_frame = quiet().analyze(df).unwrap();
    let from_file = quiet().analyze(fixture("adult_sample.csv")).unwrap();
    assert_eq!(from_frame, from_file);
}

// ============================================================================
// Dirty Data
// ============================================================================

#[test]
fn test_dirty_values_become_missing() {
    let table = TableSource::from(fixture("adult_dirty.csv")).load().unwrap();

    assert_eq!(table.len(), 5);
    assert_eq!(table.age, vec![Some(45), None, Some(35), None, Some(55)]);
    assert_eq!(
        table.hours_per_week,
        vec![Some(60), Some(40), None, Some(10), Some(10)]
    );

    let summary = table.coercion_summary();
    assert_eq!(summary.missing.get("age"), Some(&2));
    assert_eq!(summary.missing.get("hours-per-week"), Some(&1));
    assert_eq!(summary.total_missing(), 3);
}

#[test]
fn test_dirty_extract_statistics() {
    let stats = compute_statistics(fixture("adult_dirty.csv"), false).unwrap();

    let races: Vec<_> = stats.race_count.iter().collect();
    assert_eq!(races, vec![("White", 4), ("Black", 1)]);
    assert_eq!(stats.average_age_men, 45.0);
    assert_eq!(stats.percentage_bachelors, 20.0);
    assert_eq!(stats.higher_education_rich, 100.0);
    assert_eq!(stats.lower_education_rich, 50.0);
    assert_eq!(stats.min_work_hours, 10);
    assert_eq!(stats.rich_percentage, 50.0);
    assert_eq!(stats.highest_earning_country, "India");
    assert_eq!(stats.top_in_occupation, "Prof-specialty");
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_required_column() {
    let csv = "age,education,education-num,race,sex,capital-gain,capital-loss,hours-per-week,native-country,occupation\n\
               39,Bachelors,13,White,Male,0,0,40,India,Sales\n";
    let err = compute_statistics(TableSource::Csv(csv.to_string()), false).unwrap_err();
    assert!(matches!(err, AnalyzerError::MissingColumn(ref c) if c == "salary"));
}

#[test]
fn test_no_advanced_education_is_an_error_not_zero() {
    let csv = "age,education,education-num,race,sex,capital-gain,capital-loss,hours-per-week,native-country,occupation,salary\n\
               39,HS-grad,9,White,Male,0,0,40,India,Sales,>50K\n\
               41,11th,7,White,Male,0,0,40,India,Sales,<=50K\n";
    let table = TableSource::Csv(csv.to_string()).load().unwrap();

    let err = demographic_analyzer::statistics::higher_education_rich(
        &table,
        &AnalyzerConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, AnalyzerError::DivisionUndefined { .. }));

    let err = quiet().compute(&table).unwrap_err();
    assert_eq!(err.error_code(), "DIVISION_UNDEFINED");
}

#[test]
fn test_missing_input_file() {
    let err = compute_statistics(fixture("does_not_exist.csv"), false).unwrap_err();
    assert!(matches!(err, AnalyzerError::InputNotFound(_)));
}

// ============================================================================
// Configuration and Output
// ============================================================================

#[test]
fn test_rounding_mode_changes_boundary_values() {
    let csv = "age,education,education-num,race,sex,capital-gain,capital-loss,hours-per-week,native-country,occupation,salary\n\
               35,Bachelors,13,White,Male,0,0,40,India,Sales,>50K\n\
               35,HS-grad,9,White,Male,0,0,40,India,Sales,<=50K\n\
               35,HS-grad,9,White,Male,0,0,40,India,Sales,<=50K\n\
               36,HS-grad,9,White,Male,0,0,40,India,Sales,<=50K\n";
    let table = CensusTable::from_dataframe(
        &demographic_analyzer::loader::load_csv_str(csv).unwrap(),
    )
    .unwrap();

    let even = quiet().compute(&table).unwrap();
    let away = DemographicAnalyzer::new(
        AnalyzerConfig::builder()
            .emit_text(false)
            .rounding(RoundingMode::HalfAwayFromZero)
            .build()
            .unwrap(),
    )
    .unwrap()
    .compute(&table)
    .unwrap();

    assert_eq!(even.average_age_men, 35.2);
    assert_eq!(away.average_age_men, 35.3);
    assert_eq!(even.percentage_bachelors, away.percentage_bachelors);
}

#[test]
fn test_json_output_shape() {
    let table = TableSource::from(fixture("adult_sample.csv")).load().unwrap();
    let stats = quiet().compute(&table).unwrap();
    let report = AnalysisReport::new("adult_sample.csv", &table, RoundingMode::HalfEven, stats);

    let json = serde_json::to_value(&report).unwrap();
    let statistics = json["statistics"].as_object().unwrap();
    let mut keys: Vec<_> = statistics.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "average_age_men",
            "higher_education_rich",
            "highest_earning_country",
            "highest_earning_country_percentage",
            "lower_education_rich",
            "min_work_hours",
            "percentage_bachelors",
            "race_count",
            "rich_percentage",
            "top_IN_occupation",
        ]
    );
    assert_eq!(json["statistics"]["race_count"]["White"], 12);
    assert_eq!(json["row_count"], 20);
}

#[test]
fn test_text_rendering_of_sample() {
    let stats = compute_statistics(fixture("adult_sample.csv"), false).unwrap();
    let text = render_text(&stats, &AnalyzerConfig::default());
    let lines: Vec<_> = text.lines().collect();

    assert_eq!(lines[0], "Number of each race:");
    assert_eq!(lines[1], "  White: 12");
    assert_eq!(lines[5], "Average age of men: 38.7");
    assert_eq!(lines[9], "Min work time: 13 hours/week");
    assert_eq!(lines[13], "Top occupations in India: Prof-specialty");
    assert_eq!(lines.len(), 14);
}
