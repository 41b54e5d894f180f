use serde::{Deserialize, Serialize};

use crate::models::Record;

/// How bin edges are placed and how the top edge is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeMode {
    /// Exact edges; a longitude on the last edge belongs to the last bin
    #[default]
    Inclusive,
    /// Edges truncated toward zero; longitudes at or past the last edge are dropped
    Legacy,
}

impl std::str::FromStr for EdgeMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inclusive" => Ok(EdgeMode::Inclusive),
            "legacy" => Ok(EdgeMode::Legacy),
            other => Err(format!(
                "unknown edge mode '{}', expected 'inclusive' or 'legacy'",
                other
            )),
        }
    }
}

/// Contiguous longitude interval and the records assigned to it
#[derive(Debug, Clone)]
pub struct Bin<'a> {
    pub lower: f64,
    pub upper: f64,
    pub label: String,
    pub records: Vec<&'a Record>,
}

impl<'a> Bin<'a> {
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Mean magnitude over records with a usable magnitude, 0 for an empty bin
    pub fn average_magnitude(&self) -> f64 {
        let (sum, n) = self
            .records
            .iter()
            .filter_map(|r| r.magnitude())
            .fold((0.0, 0usize), |(sum, n), m| (sum + m, n + 1));

        if n == 0 {
            0.0
        } else {
            sum / n as f64
        }
    }
}
