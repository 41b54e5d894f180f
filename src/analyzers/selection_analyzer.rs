use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{ExplorerError, Result};
use crate::models::{City, Record, Selection};
use crate::processors::aggregation::date_span;
use crate::utils::constants::DATE_FORMAT;

#[derive(Debug, Serialize)]
pub struct SelectionStatistics {
    pub total_records: usize,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub magnitude_stats: MagnitudeStats,
    pub geographic_bounds: Option<GeographicBounds>,
    pub data_quality: DataQuality,
    pub event_types: BTreeMap<String, usize>,
}

#[derive(Debug, Serialize)]
pub struct MagnitudeStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

#[derive(Debug, Serialize)]
pub struct GeographicBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Counts of records missing a usable value for each filterable field
#[derive(Debug, Default, Serialize)]
pub struct DataQuality {
    pub invalid_dates: usize,
    pub invalid_positions: usize,
    pub invalid_magnitudes: usize,
}

/// A strong event and the closest known city
#[derive(Debug, Clone, Serialize)]
pub struct NotableEvent {
    pub row: usize,
    pub date: Option<NaiveDate>,
    pub magnitude: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub nearest_city: Option<NearestCity>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NearestCity {
    pub name: String,
    pub country: String,
    pub distance_km: f64,
}

pub struct SelectionAnalyzer;

impl SelectionAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, selection: &Selection<'_>) -> Result<SelectionStatistics> {
        if selection.is_empty() {
            return Err(ExplorerError::EmptySelection {
                stage: "analysis".to_string(),
            });
        }

        let mut quality = DataQuality::default();
        let mut event_types: BTreeMap<String, usize> = BTreeMap::new();

        let mut min_mag = f64::INFINITY;
        let mut max_mag = f64::NEG_INFINITY;
        let mut mag_sum = 0.0f64;
        let mut mag_count = 0usize;

        let mut bounds: Option<GeographicBounds> = None;

        for record in selection.iter() {
            if record.date().is_none() {
                quality.invalid_dates += 1;
            }

            match record.magnitude() {
                Some(magnitude) => {
                    min_mag = min_mag.min(magnitude);
                    max_mag = max_mag.max(magnitude);
                    mag_sum += magnitude;
                    mag_count += 1;
                }
                None => quality.invalid_magnitudes += 1,
            }

            match (record.latitude(), record.longitude()) {
                (Some(lat), Some(lon)) => {
                    let b = bounds.get_or_insert(GeographicBounds {
                        min_lat: lat,
                        max_lat: lat,
                        min_lon: lon,
                        max_lon: lon,
                    });
                    b.min_lat = b.min_lat.min(lat);
                    b.max_lat = b.max_lat.max(lat);
                    b.min_lon = b.min_lon.min(lon);
                    b.max_lon = b.max_lon.max(lon);
                }
                _ => quality.invalid_positions += 1,
            }

            let event_type = record.event_type().unwrap_or("Unknown");
            *event_types.entry(event_type.to_string()).or_default() += 1;
        }

        let magnitude_stats = if mag_count > 0 {
            MagnitudeStats {
                min: min_mag,
                max: max_mag,
                mean: mag_sum / mag_count as f64,
            }
        } else {
            MagnitudeStats {
                min: f64::NAN,
                max: f64::NAN,
                mean: f64::NAN,
            }
        };

        Ok(SelectionStatistics {
            total_records: selection.len(),
            date_range: date_span(selection),
            magnitude_stats,
            geographic_bounds: bounds,
            data_quality: quality,
            event_types,
        })
    }

    /// The `count` strongest events, each with its nearest city when one is known
    pub fn strongest_events(
        &self,
        selection: &Selection<'_>,
        cities: &[City],
        count: usize,
    ) -> Vec<NotableEvent> {
        let mut candidates: Vec<(&Record, f64, f64, f64)> = selection
            .iter()
            .filter_map(|r| Some((r, r.magnitude()?, r.latitude()?, r.longitude()?)))
            .collect();

        // Strongest first; ties keep load order
        candidates.sort_by(|a, b| b.1.total_cmp(&a.1));

        candidates
            .into_iter()
            .take(count)
            .map(|(record, magnitude, latitude, longitude)| NotableEvent {
                row: record.row(),
                date: record.date(),
                magnitude,
                latitude,
                longitude,
                nearest_city: nearest_city(cities, latitude, longitude),
            })
            .collect()
    }
}

impl Default for SelectionAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn nearest_city(cities: &[City], latitude: f64, longitude: f64) -> Option<NearestCity> {
    cities
        .iter()
        .map(|c| (c, c.distance_km(latitude, longitude)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(city, distance_km)| NearestCity {
            name: city.name.clone(),
            country: city.country.clone(),
            distance_km,
        })
}

impl SelectionStatistics {
    pub fn summary(&self) -> String {
        let date_range = match self.date_range {
            Some((first, last)) => format!(
                "{} to {}",
                first.format(DATE_FORMAT),
                last.format(DATE_FORMAT)
            ),
            None => "No valid dates".to_string(),
        };

        let magnitude_range = if self.magnitude_stats.min.is_nan() {
            "No valid measurements".to_string()
        } else {
            format!(
                "{:.1} to {:.1} (mean {:.2})",
                self.magnitude_stats.min, self.magnitude_stats.max, self.magnitude_stats.mean
            )
        };

        let coverage = match &self.geographic_bounds {
            Some(b) => format!(
                "{:.3}..{:.3} lat, {:.3}..{:.3} lon",
                b.min_lat, b.max_lat, b.min_lon, b.max_lon
            ),
            None => "No valid positions".to_string(),
        };

        format!(
            "Records: {} selected\n\
            Date Range: {}\n\
            Magnitude: {}\n\
            Coverage: {}",
            self.total_records, date_range, magnitude_range, coverage
        )
    }

    pub fn detailed_summary(&self) -> String {
        let types = self
            .event_types
            .iter()
            .map(|(name, count)| format!("- {}: {}", name, count))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "{}\n\n\
            Event Types:\n{}\n\n\
            Unusable Fields:\n\
            - Dates: {}\n\
            - Positions: {}\n\
            - Magnitudes: {}",
            self.summary(),
            types,
            self.data_quality.invalid_dates,
            self.data_quality.invalid_positions,
            self.data_quality.invalid_magnitudes
        )
    }
}

impl NotableEvent {
    pub fn describe(&self) -> String {
        let date = self
            .date
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_else(|| "unknown date".to_string());

        let place = match &self.nearest_city {
            Some(city) => format!(
                "{:.0} km from {}, {}",
                city.distance_km, city.name, city.country
            ),
            None => "no nearby city known".to_string(),
        };

        format!(
            "M{:.1} on {} at ({:.3}, {:.3}), {}",
            self.magnitude, date, self.latitude, self.longitude, place
        )
    }
}
