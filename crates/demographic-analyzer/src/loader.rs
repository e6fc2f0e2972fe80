//! CSV loading into a polars `DataFrame`.
//!
//! Every column is read as text (`infer_schema_length = 0`). A stray `"?"`
//! in a numeric column must not make the reader fail on a dtype mismatch;
//! turning text into numbers is the job of
//! [`CensusTable::coerce_numeric_columns`](crate::table::CensusTable::coerce_numeric_columns).

use crate::error::{AnalyzerError, Result};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

fn text_read_options() -> CsvReadOptions {
    CsvReadOptions::default()
        .with_infer_schema_length(Some(0))
        .with_has_header(true)
}

/// Load a CSV file with multiple fallback strategies.
pub fn load_csv(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(AnalyzerError::InputNotFound(path.to_path_buf()));
    }
    info!("Loading dataset from: {}", path.display());

    // Strategy 1: Standard loading with quote handling
    match text_read_options()
        .with_parse_options(
            CsvParseOptions::default()
                .with_separator(b',')
                .with_quote_char(Some(b'"')),
        )
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
    {
        Ok(df) => return Ok(loaded(df)),
        Err(e) => {
            debug!("Standard loading failed: {}", e);
        }
    }

    // Strategy 2: Without quote handling
    match text_read_options()
        .with_parse_options(CsvParseOptions::default().with_quote_char(None))
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
    {
        Ok(df) => return Ok(loaded(df)),
        Err(e) => {
            debug!("Loading without quotes failed: {}", e);
        }
    }

    // Strategy 3: Pre-clean content
    match std::fs::read_to_string(path) {
        Ok(content) => load_csv_str(&clean_csv_content(&content)),
        Err(e) => {
            error!("Could not read file: {}", e);
            Err(e.into())
        }
    }
}

/// Load CSV text that is already in memory.
pub fn load_csv_str(content: &str) -> Result<DataFrame> {
    let cursor = Cursor::new(content.to_string());
    let df = text_read_options()
        .into_reader_with_file_handle(cursor)
        .finish()?;
    Ok(loaded(df))
}

fn loaded(df: DataFrame) -> DataFrame {
    info!("Dataset loaded successfully: {:?}", df.shape());
    df
}

/// Clean CSV content: collapse doubled quotes and drop blank lines.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_csv_str_reads_everything_as_text() {
        let df = load_csv_str("age,race\n39,White\n?,Black\n").unwrap();
        assert_eq!(df.shape(), (2, 2));
        assert_eq!(df.column("age").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn test_load_csv_str_header_only() {
        let df = load_csv_str("age,race\n").unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 2);
    }

    #[test]
    fn test_load_csv_missing_file() {
        let err = load_csv(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert_eq!(err.error_code(), "INPUT_NOT_FOUND");
    }

    #[test]
    fn test_clean_csv_content() {
        let cleaned = clean_csv_content("a,b\n\n\"\"x\"\",1\n   \n");
        assert_eq!(cleaned, "a,b\n\"x\",1");
    }
}
