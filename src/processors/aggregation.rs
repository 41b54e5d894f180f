use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::Selection;

/// Events in one calendar year
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct YearStats {
    /// Every record dated in this year
    pub count: usize,
    /// Records that also carried a usable magnitude
    pub magnitude_samples: usize,
    /// Mean over the magnitude samples, 0 when there are none
    pub average_magnitude: f64,
}

/// Group records by the year of their date, ordered by year
///
/// Records without a valid date are ignored; records without a usable magnitude
/// still count toward `count` but not toward the mean.
pub fn aggregate_by_year(selection: &Selection<'_>) -> BTreeMap<i32, YearStats> {
    let mut sums: BTreeMap<i32, (YearStats, f64)> = BTreeMap::new();

    for record in selection.iter() {
        let Some(year) = record.year() else {
            continue;
        };

        let (stats, magnitude_sum) = sums.entry(year).or_default();
        stats.count += 1;
        if let Some(magnitude) = record.magnitude() {
            stats.magnitude_samples += 1;
            *magnitude_sum += magnitude;
        }
    }

    sums.into_iter()
        .map(|(year, (mut stats, magnitude_sum))| {
            if stats.magnitude_samples > 0 {
                stats.average_magnitude = magnitude_sum / stats.magnitude_samples as f64;
            }
            (year, stats)
        })
        .collect()
}

/// Earliest and latest valid date in the selection
pub fn date_span(selection: &Selection<'_>) -> Option<(NaiveDate, NaiveDate)> {
    selection
        .iter()
        .filter_map(|r| r.date())
        .fold(None, |acc, date| match acc {
            Some((first, last)) => Some((std::cmp::min(first, date), std::cmp::max(last, date))),
            None => Some((date, date)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;
    use pretty_assertions::assert_eq;

    fn dated(row: usize, date: &str, magnitude: &str) -> Record {
        Record::from_pairs(row, &[("Date", date), ("Magnitude", magnitude)])
    }

    #[test]
    fn test_aggregate_by_year() {
        let records = vec![
            dated(1, "01/02/1965", "6.0"),
            dated(2, "05/10/1965", "7.0"),
            dated(3, "03/11/2011", "9.1"),
            dated(4, "07/04/2011", ""),
            dated(5, "1975-02-23T02:58:41.000Z", "5.6"),
            dated(6, "12/30/2016", "bad"),
        ];
        let yearly = aggregate_by_year(&Selection::all(&records));

        assert_eq!(yearly.keys().copied().collect::<Vec<_>>(), vec![1965, 2011, 2016]);
        assert_eq!(yearly[&1965].count, 2);
        assert!((yearly[&1965].average_magnitude - 6.5).abs() < 1e-9);
        assert_eq!(
            yearly[&2011],
            YearStats {
                count: 2,
                magnitude_samples: 1,
                average_magnitude: 9.1,
            }
        );
        assert_eq!(yearly[&2016].magnitude_samples, 0);
        assert_eq!(yearly[&2016].average_magnitude, 0.0);

        // Every validly dated record is counted exactly once
        let dated_records = records.iter().filter(|r| r.date().is_some()).count();
        assert_eq!(yearly.values().map(|s| s.count).sum::<usize>(), dated_records);
    }

    #[test]
    fn test_date_span() {
        let records = vec![
            dated(1, "03/11/2011", "9.1"),
            dated(2, "unknown", "6.0"),
            dated(3, "01/02/1965", "6.0"),
        ];
        let selection = Selection::all(&records);

        assert_eq!(
            date_span(&selection),
            Some((
                NaiveDate::from_ymd_opt(1965, 1, 2).unwrap(),
                NaiveDate::from_ymd_opt(2011, 3, 11).unwrap()
            ))
        );
        assert_eq!(date_span(&Selection::default()), None);
    }
}
