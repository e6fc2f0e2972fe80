//! Human-readable rendering of the statistics.

use crate::config::AnalyzerConfig;
use crate::types::DemographicStatistics;
use std::io;

/// Render the statistics as labeled lines in their fixed order.
///
/// Race counts come first as a header line followed by one indented
/// `race: count` line per race. Rounded values are printed with
/// `config.decimals` digits, and the occupation line names
/// `config.focus_country`.
pub fn render_text(stats: &DemographicStatistics, config: &AnalyzerConfig) -> String {
    let d = config.decimals as usize;

    let mut lines = vec!["Number of each race:".to_string()];
    lines.extend(
        stats
            .race_count
            .iter()
            .map(|(race, count)| format!("  {race}: {count}")),
    );
    lines.push(format!("Average age of men: {:.d$}", stats.average_age_men));
    lines.push(format!(
        "Percentage with Bachelors degrees: {:.d$}%",
        stats.percentage_bachelors
    ));
    lines.push(format!(
        "Percentage with higher education that earn {}: {:.d$}%",
        config.high_income_label, stats.higher_education_rich
    ));
    lines.push(format!(
        "Percentage without higher education that earn {}: {:.d$}%",
        config.high_income_label, stats.lower_education_rich
    ));
    lines.push(format!("Min work time: {} hours/week", stats.min_work_hours));
    lines.push(format!(
        "Percentage of rich among those who work fewest hours: {:.d$}%",
        stats.rich_percentage
    ));
    lines.push(format!(
        "Country with highest percentage of rich: {}",
        stats.highest_earning_country
    ));
    lines.push(format!(
        "Highest percentage of rich people in country: {:.d$}%",
        stats.highest_earning_country_percentage
    ));
    lines.push(format!(
        "Top occupations in {}: {}",
        config.focus_country, stats.top_in_occupation
    ));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Write the rendering to any writer.
pub fn write_text<W: io::Write>(
    stats: &DemographicStatistics,
    config: &AnalyzerConfig,
    writer: &mut W,
) -> io::Result<()> {
    writer.write_all(render_text(stats, config).as_bytes())
}
