pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod logging;
pub mod progress;

pub use constants::*;
pub use coordinates::{haversine_distance, parse_coordinate};
pub use filename::{generate_default_chart_dirname, generate_default_chart_filename};
pub use progress::ProgressReporter;
