use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{Bin, Selection};
use crate::processors::aggregation::{date_span, YearStats};
use crate::processors::binning::histogram;
use crate::utils::constants::DATE_FORMAT;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub longitude: f64,
    pub latitude: f64,
    pub magnitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearValue {
    pub year: i32,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinValue {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramSeries {
    pub values: Vec<f64>,
    pub range: (f64, f64),
    pub bins: usize,
    pub counts: Vec<usize>,
}

/// Everything the charting side needs, in one serializable value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBundle {
    pub record_count: usize,
    /// Valid-date span as `(first, last)` in month/day/year form
    pub date_span: Option<(String, String)>,
    pub scatter: Vec<ScatterPoint>,
    pub yearly_average_magnitude: Vec<YearValue>,
    pub bin_counts: Vec<BinCount>,
    pub longitude_histogram: HistogramSeries,
    pub yearly_counts: Vec<YearCount>,
    pub bin_average_magnitude: Vec<BinValue>,
}

impl ChartBundle {
    /// Assemble the series from a selection, its longitude bins and its yearly aggregate
    pub fn build(
        selection: &Selection<'_>,
        bins: &[Bin<'_>],
        yearly: &BTreeMap<i32, YearStats>,
    ) -> Self {
        let scatter: Vec<ScatterPoint> = selection
            .iter()
            .filter_map(|r| {
                Some(ScatterPoint {
                    longitude: r.longitude()?,
                    latitude: r.latitude()?,
                    magnitude: r.magnitude()?,
                })
            })
            .collect();

        // Years with no usable magnitude have no meaningful average to plot
        let yearly_average_magnitude = yearly
            .iter()
            .filter(|(_, stats)| stats.magnitude_samples > 0)
            .map(|(&year, stats)| YearValue {
                year,
                value: stats.average_magnitude,
            })
            .collect();

        let yearly_counts = yearly
            .iter()
            .map(|(&year, stats)| YearCount {
                year,
                count: stats.count,
            })
            .collect();

        let bin_counts = bins
            .iter()
            .map(|b| BinCount {
                label: b.label.clone(),
                count: b.count(),
            })
            .collect();

        let bin_average_magnitude = bins
            .iter()
            .map(|b| BinValue {
                label: b.label.clone(),
                value: b.average_magnitude(),
            })
            .collect();

        let longitudes: Vec<f64> = selection.iter().filter_map(|r| r.longitude()).collect();
        let range = match (bins.first(), bins.last()) {
            (Some(first), Some(last)) => (first.lower, last.upper),
            _ => (0.0, 0.0),
        };
        let counts = histogram(&longitudes, range, bins.len());

        let date_span = date_span(selection).map(|(first, last)| {
            (
                first.format(DATE_FORMAT).to_string(),
                last.format(DATE_FORMAT).to_string(),
            )
        });

        Self {
            record_count: selection.len(),
            date_span,
            scatter,
            yearly_average_magnitude,
            bin_counts,
            longitude_histogram: HistogramSeries {
                values: longitudes,
                range,
                bins: bins.len(),
                counts,
            },
            yearly_counts,
            bin_average_magnitude,
        }
    }
}
