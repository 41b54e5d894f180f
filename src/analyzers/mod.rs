pub mod selection_analyzer;

pub use selection_analyzer::{
    nearest_city, NearestCity, NotableEvent, SelectionAnalyzer, SelectionStatistics,
};
