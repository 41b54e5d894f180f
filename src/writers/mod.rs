pub mod chart_bundle;
pub mod chart_writer;

pub use chart_bundle::{
    BinCount, BinValue, ChartBundle, HistogramSeries, ScatterPoint, YearCount, YearValue,
};
pub use chart_writer::{ChartFileInfo, ChartWriter, OutputFormat};
