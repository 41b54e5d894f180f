use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::error::{ExplorerError, Result};
use crate::writers::chart_bundle::{ChartBundle, ScatterPoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ExplorerError::Config(format!(
                "Unsupported output format: {}",
                s
            ))),
        }
    }
}

/// Hands chart series to the plotting side as files
pub struct ChartWriter {
    format: OutputFormat,
}

/// What was written and where
#[derive(Debug, Clone)]
pub struct ChartFileInfo {
    pub files: Vec<PathBuf>,
    pub total_bytes: u64,
}

impl ChartFileInfo {
    pub fn summary(&self) -> String {
        let listing = self
            .files
            .iter()
            .map(|f| format!("  {}", f.display()))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Chart files: {} ({:.1} KB)\n{}",
            self.files.len(),
            self.total_bytes as f64 / 1024.0,
            listing
        )
    }
}

impl ChartWriter {
    pub fn new() -> Self {
        Self {
            format: OutputFormat::Json,
        }
    }

    pub fn with_format(mut self, format: &str) -> Result<Self> {
        self.format = format.parse()?;
        Ok(self)
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// JSON writes one file at `path`; CSV writes one file per series into directory `path`
    pub fn write_bundle(&self, bundle: &ChartBundle, path: &Path) -> Result<ChartFileInfo> {
        let files = match self.format {
            OutputFormat::Json => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                let writer = BufWriter::new(File::create(path)?);
                serde_json::to_writer_pretty(writer, bundle)?;
                vec![path.to_path_buf()]
            }
            OutputFormat::Csv => self.write_csv_series(bundle, path)?,
        };

        tracing::info!(
            format = ?self.format,
            files = files.len(),
            path = %path.display(),
            "Wrote chart data"
        );

        self.get_file_info(files)
    }

    fn write_csv_series(&self, bundle: &ChartBundle, dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;

        let histogram_rows: Vec<HistogramRow> = bundle
            .longitude_histogram
            .counts
            .iter()
            .enumerate()
            .map(|(index, &count)| {
                let (lo, hi) = bundle.longitude_histogram.range;
                let width = (hi - lo) / bundle.longitude_histogram.bins as f64;
                HistogramRow {
                    lower: lo + index as f64 * width,
                    upper: lo + (index + 1) as f64 * width,
                    count,
                }
            })
            .collect();

        let files = vec![
            write_csv::<ScatterPoint>(&dir.join("scatter.csv"), &bundle.scatter)?,
            write_csv(
                &dir.join("yearly_average_magnitude.csv"),
                &bundle.yearly_average_magnitude,
            )?,
            write_csv(&dir.join("bin_counts.csv"), &bundle.bin_counts)?,
            write_csv(&dir.join("longitude_histogram.csv"), &histogram_rows)?,
            write_csv(&dir.join("yearly_counts.csv"), &bundle.yearly_counts)?,
            write_csv(
                &dir.join("bin_average_magnitude.csv"),
                &bundle.bin_average_magnitude,
            )?,
        ];

        Ok(files)
    }

    fn get_file_info(&self, files: Vec<PathBuf>) -> Result<ChartFileInfo> {
        let mut total_bytes = 0;
        for file in &files {
            total_bytes += fs::metadata(file)?.len();
        }

        Ok(ChartFileInfo { files, total_bytes })
    }
}

impl Default for ChartWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
struct HistogramRow {
    lower: f64,
    upper: f64,
    count: usize,
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<PathBuf> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Record, Selection};
    use crate::processors::{aggregate_by_year, compute_bins};
    use tempfile::TempDir;

    fn bundle() -> ChartBundle {
        let records = vec![
            Record::from_pairs(
                1,
                &[
                    ("Date", "01/02/1965"),
                    ("Latitude", "19.246"),
                    ("Longitude", "145.616"),
                    ("Magnitude", "6.0"),
                ],
            ),
            Record::from_pairs(
                2,
                &[
                    ("Date", "03/11/2011"),
                    ("Latitude", "38.297"),
                    ("Longitude", "142.373"),
                    ("Magnitude", "9.1"),
                ],
            ),
        ];
        let selection = Selection::all(&records);
        let bins = compute_bins(&selection, 6).unwrap();
        ChartBundle::build(&selection, &bins, &aggregate_by_year(&selection))
    }

    #[test]
    fn test_write_json_bundle() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("charts").join("bundle.json");

        let info = ChartWriter::new().write_bundle(&bundle(), &path)?;

        assert_eq!(info.files, vec![path.clone()]);
        assert!(info.total_bytes > 0);

        let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
        assert_eq!(json["record_count"], 2);
        assert_eq!(json["bin_counts"].as_array().map(Vec::len), Some(6));
        assert_eq!(json["yearly_counts"][1]["year"], 2011);

        Ok(())
    }

    #[test]
    fn test_write_csv_series() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let dir = temp_dir.path().join("series");

        let writer = ChartWriter::new().with_format("CSV")?;
        assert_eq!(writer.format(), OutputFormat::Csv);

        let info = writer.write_bundle(&bundle(), &dir)?;
        assert_eq!(info.files.len(), 6);

        let counts = fs::read_to_string(dir.join("yearly_counts.csv"))?;
        assert_eq!(counts, "year,count\n1965,1\n2011,1\n");

        let histogram = fs::read_to_string(dir.join("longitude_histogram.csv"))?;
        assert_eq!(histogram.lines().count(), 7);
        assert!(histogram.starts_with("lower,upper,count\n"));

        Ok(())
    }

    #[test]
    fn test_unknown_format() {
        assert!(ChartWriter::new().with_format("parquet").is_err());
    }
}
