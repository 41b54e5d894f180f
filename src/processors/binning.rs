use crate::error::{ExplorerError, Result};
use crate::models::{Bin, EdgeMode, Selection};

/// `(floor(min longitude), ceil(max longitude))` over records with a usable longitude
pub fn longitude_span(selection: &Selection<'_>) -> Result<(f64, f64)> {
    let (min, max) = selection
        .iter()
        .filter_map(|r| r.longitude())
        .fold(None, |acc: Option<(f64, f64)>, lon| match acc {
            Some((min, max)) => Some((min.min(lon), max.max(lon))),
            None => Some((lon, lon)),
        })
        .ok_or_else(|| ExplorerError::EmptySelection {
            stage: "binning".to_string(),
        })?;

    Ok((min.floor(), max.ceil()))
}

/// Partition the selection into `bin_count` longitude bins with inclusive top edge
pub fn compute_bins<'a>(selection: &Selection<'a>, bin_count: usize) -> Result<Vec<Bin<'a>>> {
    compute_bins_with_mode(selection, bin_count, EdgeMode::Inclusive)
}

pub fn compute_bins_with_mode<'a>(
    selection: &Selection<'a>,
    bin_count: usize,
    mode: EdgeMode,
) -> Result<Vec<Bin<'a>>> {
    if bin_count == 0 {
        return Err(ExplorerError::Config("bin count must be at least 1".to_string()));
    }

    let (start, mut end) = longitude_span(selection)?;
    // All longitudes on one integer: give the bins a unit span
    if end == start {
        end = start + 1.0;
    }
    let width = (end - start) / bin_count as f64;
    let edges = bin_edges(start, end, bin_count, mode);

    let mut bins: Vec<Bin<'a>> = edges
        .iter()
        .enumerate()
        .map(|(i, &edge)| Bin {
            lower: if i == 0 { start } else { edges[i - 1] },
            upper: edge,
            label: format_label(edge - width, edge),
            records: Vec::new(),
        })
        .collect();

    let mut dropped = 0usize;
    for record in selection.iter() {
        let Some(longitude) = record.longitude() else {
            dropped += 1;
            continue;
        };

        match assign(longitude, &edges, mode) {
            Some(index) => bins[index].records.push(record),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::warn!(dropped, ?mode, "Records left out of every longitude bin");
    }
    tracing::debug!(start, end, width, bins = bin_count, "Computed longitude bins");

    Ok(bins)
}

fn bin_edges(start: f64, end: f64, bin_count: usize, mode: EdgeMode) -> Vec<f64> {
    let width = (end - start) / bin_count as f64;

    (1..=bin_count)
        .map(|k| {
            let edge = start + k as f64 * width;
            match mode {
                EdgeMode::Legacy => edge.trunc(),
                // Pin the top edge so float drift cannot leave the maximum outside
                EdgeMode::Inclusive if k == bin_count => end,
                EdgeMode::Inclusive => edge,
            }
        })
        .collect()
}

/// Index of the first bin whose edge strictly exceeds `longitude`
fn assign(longitude: f64, edges: &[f64], mode: EdgeMode) -> Option<usize> {
    if let Some(index) = edges.iter().position(|&edge| longitude < edge) {
        return Some(index);
    }

    match mode {
        EdgeMode::Inclusive => edges.len().checked_sub(1),
        EdgeMode::Legacy => None,
    }
}

pub fn format_label(lower: f64, upper: f64) -> String {
    format!("{:.2} to\n{:.2}", lower, upper)
}

/// Equal-width histogram over `range` with a closed last bin; values outside are ignored
pub fn histogram(values: &[f64], range: (f64, f64), bins: usize) -> Vec<usize> {
    let mut counts = vec![0usize; bins];
    if bins == 0 {
        return counts;
    }

    let (mut lo, mut hi) = range;
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    for &value in values {
        if !(lo..=hi).contains(&value) {
            continue;
        }
        let index = (((value - lo) / width) as usize).min(bins - 1);
        counts[index] += 1;
    }

    counts
}
