//! The typed census table.
//!
//! A [`CensusTable`] is built once from a text-only `DataFrame`: the schema
//! is checked up front, categorical cells are normalized and the numeric
//! columns go through [`CensusTable::coerce_numeric_columns`]. After that the
//! table is read-only and every statistic works on plain Rust slices.

use crate::error::{AnalyzerError, Result};
use crate::numeric::{coerce_integer, normalize_category};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

pub const AGE: &str = "age";
pub const EDUCATION: &str = "education";
pub const EDUCATION_NUM: &str = "education-num";
pub const RACE: &str = "race";
pub const SEX: &str = "sex";
pub const CAPITAL_GAIN: &str = "capital-gain";
pub const CAPITAL_LOSS: &str = "capital-loss";
pub const HOURS_PER_WEEK: &str = "hours-per-week";
pub const NATIVE_COUNTRY: &str = "native-country";
pub const OCCUPATION: &str = "occupation";
pub const SALARY: &str = "salary";

/// Columns coerced to integers.
pub const NUMERIC_COLUMNS: [&str; 5] = [
    AGE,
    EDUCATION_NUM,
    CAPITAL_GAIN,
    CAPITAL_LOSS,
    HOURS_PER_WEEK,
];

/// Columns kept as categorical text.
pub const CATEGORICAL_COLUMNS: [&str; 6] =
    [EDUCATION, RACE, SEX, NATIVE_COUNTRY, OCCUPATION, SALARY];

/// Every column the dataset must provide.
pub fn required_columns() -> impl Iterator<Item = &'static str> {
    NUMERIC_COLUMNS.into_iter().chain(CATEGORICAL_COLUMNS)
}

/// Integer column; `None` marks a missing cell.
pub type NumericColumn = Vec<Option<i64>>;

/// Categorical column; `None` marks an empty cell.
pub type CategoricalColumn = Vec<Option<String>>;

/// Count of cells per numeric column that coercion turned into missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoercionSummary {
    pub missing: BTreeMap<String, usize>,
}

impl CoercionSummary {
    /// Total missing cells across all numeric columns.
    pub fn total_missing(&self) -> usize {
        self.missing.values().sum()
    }
}

/// Numeric part of the table after coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericColumns {
    pub age: NumericColumn,
    pub education_num: NumericColumn,
    pub capital_gain: NumericColumn,
    pub capital_loss: NumericColumn,
    pub hours_per_week: NumericColumn,
    pub summary: CoercionSummary,
}

/// Column-oriented census table with a validated schema.
#[derive(Debug, Clone, PartialEq)]
pub struct CensusTable {
    pub age: NumericColumn,
    pub education: CategoricalColumn,
    pub education_num: NumericColumn,
    pub race: CategoricalColumn,
    pub sex: CategoricalColumn,
    pub capital_gain: NumericColumn,
    pub capital_loss: NumericColumn,
    pub hours_per_week: NumericColumn,
    pub native_country: CategoricalColumn,
    pub occupation: CategoricalColumn,
    pub salary: CategoricalColumn,
    coercion: CoercionSummary,
}

impl CensusTable {
    /// Build the table from a loaded `DataFrame`.
    ///
    /// Fails with [`AnalyzerError::MissingColumn`] before any cell is read if
    /// a required column is absent. Extra columns are ignored.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        Self::validate_schema(df)?;

        let numeric = Self::coerce_numeric_columns(df)?;

        let table = Self {
            age: numeric.age,
            education: categorical_column(df, EDUCATION)?,
            education_num: numeric.education_num,
            race: categorical_column(df, RACE)?,
            sex: categorical_column(df, SEX)?,
            capital_gain: numeric.capital_gain,
            capital_loss: numeric.capital_loss,
            hours_per_week: numeric.hours_per_week,
            native_country: categorical_column(df, NATIVE_COUNTRY)?,
            occupation: categorical_column(df, OCCUPATION)?,
            salary: categorical_column(df, SALARY)?,
            coercion: numeric.summary,
        };

        info!(
            "Census table ready: {} rows, {} missing numeric cells",
            table.len(),
            table.coercion.total_missing()
        );
        Ok(table)
    }

    /// Check that every required column is present.
    pub fn validate_schema(df: &DataFrame) -> Result<()> {
        for name in required_columns() {
            if df.column(name).is_err() {
                return Err(AnalyzerError::MissingColumn(name.to_string()));
            }
        }
        Ok(())
    }

    /// Coerce the numeric columns of `df` to integers.
    ///
    /// Cells that do not parse become `None`; the row is kept. Never fails
    /// on cell content, only on a missing column.
    pub fn coerce_numeric_columns(df: &DataFrame) -> Result<NumericColumns> {
        let mut summary = CoercionSummary::default();
        let mut coerce = |name: &str| -> Result<NumericColumn> {
            let values = coerce_column(df, name)?;
            let missing = values.iter().filter(|v| v.is_none()).count();
            if missing > 0 {
                warn!(
                    "Column '{}': {} value(s) could not be parsed, treated as missing",
                    name, missing
                );
            } else {
                debug!("Column '{}': all values numeric", name);
            }
            summary.missing.insert(name.to_string(), missing);
            Ok(values)
        };

        let age = coerce(AGE)?;
        let education_num = coerce(EDUCATION_NUM)?;
        let capital_gain = coerce(CAPITAL_GAIN)?;
        let capital_loss = coerce(CAPITAL_LOSS)?;
        let hours_per_week = coerce(HOURS_PER_WEEK)?;

        Ok(NumericColumns {
            age,
            education_num,
            capital_gain,
            capital_loss,
            hours_per_week,
            summary,
        })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.race.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Missing-cell counts produced by numeric coercion.
    pub fn coercion_summary(&self) -> &CoercionSummary {
        &self.coercion
    }
}

fn text_series(df: &DataFrame, name: &str) -> Result<Series> {
    let column = df
        .column(name)
        .map_err(|_| AnalyzerError::MissingColumn(name.to_string()))?;
    Ok(column.as_materialized_series().cast(&DataType::String)?)
}

fn coerce_column(df: &DataFrame, name: &str) -> Result<NumericColumn> {
    let series = text_series(df, name)?;
    let values = series
        .str()?
        .into_iter()
        .map(|cell| cell.and_then(coerce_integer))
        .collect();
    Ok(values)
}

fn categorical_column(df: &DataFrame, name: &str) -> Result<CategoricalColumn> {
    let series = text_series(df, name)?;
    let values = series.str()?.into_iter().map(normalize_category).collect();
    Ok(values)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::loader::load_csv_str;

    pub const HEADER: &str = "age,workclass,education,education-num,race,sex,capital-gain,capital-loss,hours-per-week,native-country,occupation,salary";

    /// One CSV row in header order, with `workclass` filled in.
    #[allow(clippy::too_many_arguments)]
    pub fn row(
        age: &str,
        education: &str,
        race: &str,
        sex: &str,
        hours: &str,
        country: &str,
        occupation: &str,
        salary: &str,
    ) -> String {
        format!(
            "{age},Private,{education},10,{race},{sex},0,0,{hours},{country},{occupation},{salary}"
        )
    }

    pub fn table(rows: &[String]) -> CensusTable {
        let mut csv = String::from(HEADER);
        for r in rows {
            csv.push('\n');
            csv.push_str(r);
        }
        csv.push('\n');
        let df = load_csv_str(&csv).unwrap();
        CensusTable::from_dataframe(&df).unwrap()
    }
}
