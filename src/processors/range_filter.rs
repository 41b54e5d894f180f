use chrono::NaiveDate;

use crate::error::{ExplorerError, Result};
use crate::models::{
    date_domain, latitude_domain, longitude_domain, magnitude_domain, Field, Range, Selection,
};

/// Records whose latitude lies in `range`
pub fn filter_latitude<'a>(selection: &Selection<'a>, range: &Range<f64>) -> Result<Selection<'a>> {
    range.check_within(&latitude_domain(), Field::Latitude)?;
    Ok(selection.retain_where(|r| r.latitude().is_some_and(|v| range.contains(v))))
}

/// Records whose longitude lies in `range`
pub fn filter_longitude<'a>(
    selection: &Selection<'a>,
    range: &Range<f64>,
) -> Result<Selection<'a>> {
    range.check_within(&longitude_domain(), Field::Longitude)?;
    Ok(selection.retain_where(|r| r.longitude().is_some_and(|v| range.contains(v))))
}

/// Records whose calendar date lies in `range` (both ends inclusive)
pub fn filter_date<'a>(
    selection: &Selection<'a>,
    range: &Range<NaiveDate>,
) -> Result<Selection<'a>> {
    range.check_within(&date_domain(), Field::Date)?;
    Ok(selection.retain_where(|r| r.date().is_some_and(|d| range.contains(d))))
}

/// Records whose magnitude lies in `range`
pub fn filter_magnitude<'a>(
    selection: &Selection<'a>,
    range: &Range<f64>,
) -> Result<Selection<'a>> {
    range.check_within(&magnitude_domain(), Field::Magnitude)?;
    Ok(selection.retain_where(|r| r.magnitude().is_some_and(|v| range.contains(v))))
}

/// Up to four ranges applied latitude, longitude, date, magnitude
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterChain {
    pub latitude: Option<Range<f64>>,
    pub longitude: Option<Range<f64>>,
    pub date: Option<Range<NaiveDate>>,
    pub magnitude: Option<Range<f64>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latitude(mut self, range: Range<f64>) -> Self {
        self.latitude = Some(range);
        self
    }

    pub fn with_longitude(mut self, range: Range<f64>) -> Self {
        self.longitude = Some(range);
        self
    }

    pub fn with_date(mut self, range: Range<NaiveDate>) -> Self {
        self.date = Some(range);
        self
    }

    pub fn with_magnitude(mut self, range: Range<f64>) -> Self {
        self.magnitude = Some(range);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.latitude.is_none()
            && self.longitude.is_none()
            && self.date.is_none()
            && self.magnitude.is_none()
    }

    /// Validate every configured range without touching any records
    pub fn validate(&self) -> Result<()> {
        if let Some(range) = &self.latitude {
            range.check_within(&latitude_domain(), Field::Latitude)?;
        }
        if let Some(range) = &self.longitude {
            range.check_within(&longitude_domain(), Field::Longitude)?;
        }
        if let Some(range) = &self.date {
            range.check_within(&date_domain(), Field::Date)?;
        }
        if let Some(range) = &self.magnitude {
            range.check_within(&magnitude_domain(), Field::Magnitude)?;
        }
        Ok(())
    }

    /// Run the configured stages in order; a stage that leaves nothing is an error
    pub fn apply<'a>(&self, selection: &Selection<'a>) -> Result<Selection<'a>> {
        self.validate()?;

        let mut current = selection.clone();
        if let Some(range) = &self.latitude {
            current = run_stage(Field::Latitude, &current, |s| filter_latitude(s, range))?;
        }
        if let Some(range) = &self.longitude {
            current = run_stage(Field::Longitude, &current, |s| filter_longitude(s, range))?;
        }
        if let Some(range) = &self.date {
            current = run_stage(Field::Date, &current, |s| filter_date(s, range))?;
        }
        if let Some(range) = &self.magnitude {
            current = run_stage(Field::Magnitude, &current, |s| filter_magnitude(s, range))?;
        }

        Ok(current)
    }
}

fn run_stage<'a, F>(field: Field, input: &Selection<'a>, filter: F) -> Result<Selection<'a>>
where
    F: FnOnce(&Selection<'a>) -> Result<Selection<'a>>,
{
    let output = filter(input)?;
    tracing::info!(
        stage = %field,
        input = input.len(),
        selected = output.len(),
        "Applied range filter"
    );

    if output.is_empty() {
        return Err(ExplorerError::EmptySelection {
            stage: field.to_string(),
        });
    }

    Ok(output)
}
