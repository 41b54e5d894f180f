pub mod aggregation;
pub mod binning;
pub mod range_filter;

pub use aggregation::{aggregate_by_year, date_span, YearStats};
pub use binning::{compute_bins, compute_bins_with_mode, histogram, longitude_span};
pub use range_filter::{
    filter_date, filter_latitude, filter_longitude, filter_magnitude, FilterChain,
};
