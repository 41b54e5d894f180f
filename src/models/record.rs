use chrono::{Datelike, NaiveDate};
use std::sync::Arc;

use crate::models::Field;
use crate::utils::constants::{DATE_FORMAT, TYPE_FIELD};

/// One row of a tabular source, keyed by the header of its file
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    row: usize,
    headers: Arc<[String]>,
    values: Vec<String>,
}

impl Record {
    /// `row` is the 1-based data row index (the header row is not counted)
    pub fn new(row: usize, headers: Arc<[String]>, values: Vec<String>) -> Self {
        Self {
            row,
            headers,
            values,
        }
    }

    /// Build a standalone record from `(column, value)` pairs
    pub fn from_pairs(row: usize, pairs: &[(&str, &str)]) -> Self {
        let headers: Arc<[String]> = pairs.iter().map(|(k, _)| k.to_string()).collect();
        let values = pairs.iter().map(|(_, v)| v.to_string()).collect();
        Self::new(row, headers, values)
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        let index = self.headers.iter().position(|h| h == name)?;
        self.values.get(index).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.headers
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }

    /// Parse a numeric column; missing, empty, non-numeric and non-finite values give `None`
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }

    pub fn latitude(&self) -> Option<f64> {
        self.number(Field::Latitude.column())
    }

    pub fn longitude(&self) -> Option<f64> {
        self.number(Field::Longitude.column())
    }

    pub fn magnitude(&self) -> Option<f64> {
        self.number(Field::Magnitude.column())
    }

    /// Calendar date in month/day/year form; anything else gives `None`
    pub fn date(&self) -> Option<NaiveDate> {
        self.get(Field::Date.column())
            .and_then(|v| NaiveDate::parse_from_str(v.trim(), DATE_FORMAT).ok())
    }

    pub fn year(&self) -> Option<i32> {
        self.date().map(|d| d.year())
    }

    pub fn event_type(&self) -> Option<&str> {
        self.get(TYPE_FIELD)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}
