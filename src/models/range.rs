use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ExplorerError, Result};
use crate::utils::constants::{
    DATE_FIELD, DATE_FORMAT, LATITUDE_FIELD, LONGITUDE_FIELD, MAGNITUDE_FIELD, MAX_DATE,
    MAX_LATITUDE, MAX_LONGITUDE, MAX_MAGNITUDE, MIN_DATE, MIN_LATITUDE, MIN_LONGITUDE,
    MIN_MAGNITUDE,
};

/// The seismic fields that can be range-filtered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Latitude,
    Longitude,
    Date,
    Magnitude,
}

impl Field {
    /// Column name in the seismic table
    pub fn column(&self) -> &'static str {
        match self {
            Field::Latitude => LATITUDE_FIELD,
            Field::Longitude => LONGITUDE_FIELD,
            Field::Date => DATE_FIELD,
            Field::Magnitude => MAGNITUDE_FIELD,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Field::Latitude => "latitude",
            Field::Longitude => "longitude",
            Field::Date => "date",
            Field::Magnitude => "Magnitude",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Min,
    Max,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Min => f.write_str("minimum"),
            Bound::Max => f.write_str("maximum"),
        }
    }
}

/// A value type that can bound a [`Range`]
pub trait RangeValue: PartialOrd + Copy {
    fn parse_token(token: &str) -> Option<Self>;
    fn render(&self) -> String;
}

impl RangeValue for f64 {
    fn parse_token(token: &str) -> Option<Self> {
        token.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

impl RangeValue for NaiveDate {
    fn parse_token(token: &str) -> Option<Self> {
        NaiveDate::parse_from_str(token.trim(), DATE_FORMAT).ok()
    }

    fn render(&self) -> String {
        self.format(DATE_FORMAT).to_string()
    }
}

/// Closed interval `[min, max]`; construction orders the two ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Range<T> {
    min: T,
    max: T,
}

impl<T: RangeValue> Range<T> {
    pub fn new(a: T, b: T) -> Self {
        if b < a {
            Self { min: b, max: a }
        } else {
            Self { min: a, max: b }
        }
    }

    /// Parse two comma-separated values, e.g. `"9.5,5.0"` or `"01/02/1965,12/30/2016"`
    pub fn parse(input: &str) -> Result<Self> {
        let tokens: Vec<&str> = input.split(',').collect();
        if tokens.len() != 2 {
            return Err(ExplorerError::InvalidRange(format!(
                "expected two values separated by a comma, got '{}'",
                input.trim()
            )));
        }

        let parse = |token: &str| {
            T::parse_token(token).ok_or_else(|| {
                ExplorerError::InvalidRange(format!("could not read value '{}'", token.trim()))
            })
        };

        Ok(Self::new(parse(tokens[0])?, parse(tokens[1])?))
    }

    pub fn min(&self) -> T {
        self.min
    }

    pub fn max(&self) -> T {
        self.max
    }

    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    /// Fail with the first bound (max, then min) that lies outside `domain`
    pub fn check_within(&self, domain: &Range<T>, field: Field) -> Result<()> {
        let offending = if !domain.contains(self.max) {
            Some((Bound::Max, self.max))
        } else if !domain.contains(self.min) {
            Some((Bound::Min, self.min))
        } else {
            None
        };

        match offending {
            Some((bound, value)) => Err(ExplorerError::RangeOutOfDomain {
                field,
                bound,
                value: value.render(),
                domain: domain.to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl<T: RangeValue> fmt::Display for Range<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.min.render(), self.max.render())
    }
}

pub fn latitude_domain() -> Range<f64> {
    Range::new(MIN_LATITUDE, MAX_LATITUDE)
}

pub fn longitude_domain() -> Range<f64> {
    Range::new(MIN_LONGITUDE, MAX_LONGITUDE)
}

pub fn magnitude_domain() -> Range<f64> {
    Range::new(MIN_MAGNITUDE, MAX_MAGNITUDE)
}

pub fn date_domain() -> Range<NaiveDate> {
    let date = |(y, m, d): (i32, u32, u32)| {
        NaiveDate::from_ymd_opt(y, m, d).expect("date domain constants are valid calendar dates")
    };
    Range::new(date(MIN_DATE), date(MAX_DATE))
}
