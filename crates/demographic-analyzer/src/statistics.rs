//! The ten census statistics.
//!
//! Each function is an independent read-only query over a [`CensusTable`].
//! Percentages are rounded with the configured rule; an empty denominator is
//! an error, never `0.0` or `NaN`.

use crate::config::AnalyzerConfig;
use crate::error::{AnalyzerError, Result};
use crate::numeric::percentage;
use crate::table::{CensusTable, HOURS_PER_WEEK};
use crate::types::{CountryRate, ValueCounts};
use std::collections::HashMap;

fn cell(value: &Option<String>) -> Option<&str> {
    value.as_deref()
}

fn is_rich(salary: &Option<String>, config: &AnalyzerConfig) -> bool {
    cell(salary) == Some(config.high_income_label.as_str())
}

/// Rounded share of rich rows among `rows` (row indices of the group).
fn rich_share<I>(
    table: &CensusTable,
    config: &AnalyzerConfig,
    rows: I,
    statistic: &str,
    group: &str,
) -> Result<f64>
where
    I: IntoIterator<Item = usize>,
{
    let (total, rich) = rows.into_iter().fold((0usize, 0usize), |(total, rich), i| {
        (total + 1, rich + usize::from(is_rich(&table.salary[i], config)))
    });
    percentage(rich, total)
        .map(|p| config.round(p))
        .ok_or_else(|| AnalyzerError::division_undefined(statistic, group))
}

/// 1. Rows per race, most frequent first.
pub fn race_count(table: &CensusTable) -> ValueCounts {
    ValueCounts::from_values(table.race.iter().map(cell))
}

/// 2. Mean age of men, missing ages excluded.
pub fn average_age_men(table: &CensusTable, config: &AnalyzerConfig) -> Result<f64> {
    let (sum, count) = table
        .sex
        .iter()
        .zip(&table.age)
        .filter(|(sex, _)| cell(sex) == Some(config.male_label.as_str()))
        .filter_map(|(_, age)| *age)
        .fold((0i128, 0usize), |(sum, count), age| {
            (sum + i128::from(age), count + 1)
        });

    if count == 0 {
        return Err(AnalyzerError::empty_group(
            "average_age_men",
            format!("sex == {} with a valid age", config.male_label),
        ));
    }
    Ok(config.round(sum as f64 / count as f64))
}

/// 3. Share of all rows with a bachelors degree.
pub fn percentage_bachelors(table: &CensusTable, config: &AnalyzerConfig) -> Result<f64> {
    let bachelors = table
        .education
        .iter()
        .filter(|e| cell(e) == Some(config.bachelors_label.as_str()))
        .count();
    percentage(bachelors, table.len())
        .map(|p| config.round(p))
        .ok_or_else(|| AnalyzerError::division_undefined("percentage_bachelors", "all rows"))
}

/// Whether each row belongs to the advanced education group.
pub fn advanced_education_mask(table: &CensusTable, config: &AnalyzerConfig) -> Vec<bool> {
    table
        .education
        .iter()
        .map(|e| cell(e).is_some_and(|e| config.is_advanced_education(e)))
        .collect()
}

/// 4. Share of rich rows among advanced education.
pub fn higher_education_rich(table: &CensusTable, config: &AnalyzerConfig) -> Result<f64> {
    let mask = advanced_education_mask(table, config);
    rich_share(
        table,
        config,
        (0..table.len()).filter(|&i| mask[i]),
        "higher_education_rich",
        "advanced education",
    )
}

/// 5. Share of rich rows among everyone else.
pub fn lower_education_rich(table: &CensusTable, config: &AnalyzerConfig) -> Result<f64> {
    let mask = advanced_education_mask(table, config);
    rich_share(
        table,
        config,
        (0..table.len()).filter(|&i| !mask[i]),
        "lower_education_rich",
        "without advanced education",
    )
}

/// 6. Minimum weekly hours over non-missing values.
pub fn min_work_hours(table: &CensusTable) -> Result<i64> {
    table
        .hours_per_week
        .iter()
        .flatten()
        .copied()
        .min()
        .ok_or_else(|| AnalyzerError::empty_column("min_work_hours", HOURS_PER_WEEK))
}

/// 7. Share of rich rows among those working the minimum hours.
pub fn rich_percentage(table: &CensusTable, config: &AnalyzerConfig) -> Result<f64> {
    let min_hours = min_work_hours(table)?;
    rich_share(
        table,
        config,
        (0..table.len()).filter(|&i| table.hours_per_week[i] == Some(min_hours)),
        "rich_percentage",
        &format!("hours-per-week == {min_hours}"),
    )
}

/// High-income rate of every country, in first-occurrence order.
pub fn country_rates(table: &CensusTable, config: &AnalyzerConfig) -> Vec<CountryRate> {
    let mut tallies: Vec<(&str, usize, usize)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for (country, salary) in table.native_country.iter().zip(&table.salary) {
        let Some(country) = cell(country) else {
            continue;
        };
        let idx = *positions.entry(country).or_insert_with(|| {
            tallies.push((country, 0, 0));
            tallies.len() - 1
        });
        tallies[idx].1 += 1;
        if is_rich(salary, config) {
            tallies[idx].2 += 1;
        }
    }

    tallies
        .into_iter()
        .filter_map(|(country, total, rich)| {
            percentage(rich, total).map(|rate| CountryRate {
                country: country.to_string(),
                rate,
            })
        })
        .collect()
}

/// 8. Country with the highest high-income rate (unrounded).
///
/// Exact ties go to the country that appears first in the table.
pub fn highest_earning_country(table: &CensusTable, config: &AnalyzerConfig) -> Result<CountryRate> {
    let mut best: Option<CountryRate> = None;
    for candidate in country_rates(table, config) {
        if best
            .as_ref()
            .is_none_or(|current| candidate.rate > current.rate)
        {
            best = Some(candidate);
        }
    }
    best.ok_or_else(|| AnalyzerError::empty_group("highest_earning_country", "native-country"))
}

/// 9. Rounded rate of the highest earning country.
pub fn highest_earning_country_percentage(
    table: &CensusTable,
    config: &AnalyzerConfig,
) -> Result<f64> {
    highest_earning_country(table, config).map(|c| config.round(c.rate))
}

/// 10. Most frequent occupation of rich rows from the focus country.
pub fn top_occupation(table: &CensusTable, config: &AnalyzerConfig) -> Result<String> {
    let occupations = ValueCounts::from_values(
        (0..table.len())
            .filter(|&i| {
                cell(&table.native_country[i]) == Some(config.focus_country.as_str())
                    && is_rich(&table.salary[i], config)
            })
            .map(|i| cell(&table.occupation[i])),
    );

    occupations
        .top()
        .map(|(occupation, _)| occupation.to_string())
        .ok_or_else(|| {
            AnalyzerError::empty_group(
                "top_IN_occupation",
                format!(
                    "native-country == {} and salary == {}",
                    config.focus_country, config.high_income_label
                ),
            )
        })
}
