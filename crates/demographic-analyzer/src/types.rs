use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Counts per distinct value, most frequent first.
///
/// Ties keep the order in which values first appear in the table. Serializes
/// as a JSON object in that same order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueCounts(Vec<(String, usize)>);

impl ValueCounts {
    /// Count values in table order. `None` cells are skipped.
    pub fn from_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut counts: Vec<(String, usize)> = Vec::new();
        let mut positions: std::collections::HashMap<&'a str, usize> =
            std::collections::HashMap::new();

        for value in values.into_iter().flatten() {
            match positions.get(value) {
                Some(&idx) => counts[idx].1 += 1,
                None => {
                    positions.insert(value, counts.len());
                    counts.push((value.to_string(), 1));
                }
            }
        }

        // Stable sort keeps first-occurrence order among equal counts.
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        Self(counts)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(value, count)| (value.as_str(), *count))
    }

    pub fn get(&self, value: &str) -> Option<usize> {
        self.iter().find(|(v, _)| *v == value).map(|(_, c)| c)
    }

    /// Most frequent value, if any.
    pub fn top(&self) -> Option<(&str, usize)> {
        self.iter().next()
    }

    pub fn total(&self) -> usize {
        self.0.iter().map(|(_, count)| count).sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ValueCounts {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (value, count) in &self.0 {
            map.serialize_entry(value, count)?;
        }
        map.end()
    }
}

/// High-income rate of one country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryRate {
    pub country: String,
    /// Unrounded percentage of rows with the high-income label.
    pub rate: f64,
}

/// The ten statistics of one run. Immutable once computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemographicStatistics {
    pub race_count: ValueCounts,
    pub average_age_men: f64,
    pub percentage_bachelors: f64,
    pub higher_education_rich: f64,
    pub lower_education_rich: f64,
    pub min_work_hours: i64,
    pub rich_percentage: f64,
    pub highest_earning_country: String,
    pub highest_earning_country_percentage: f64,
    #[serde(rename = "top_IN_occupation")]
    pub top_in_occupation: String,
}
