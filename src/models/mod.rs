pub mod bin;
pub mod city;
pub mod range;
pub mod record;
pub mod selection;

pub use bin::{Bin, EdgeMode};
pub use city::City;
pub use range::{
    date_domain, latitude_domain, longitude_domain, magnitude_domain, Bound, Field, Range,
    RangeValue,
};
pub use record::Record;
pub use selection::Selection;
