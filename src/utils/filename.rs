use chrono::{Datelike, Local};
use std::path::PathBuf;

use crate::utils::constants::OUTPUT_DIR;

/// Generate default chart bundle filename with format: quake-charts-{YYMMDD}.json
pub fn generate_default_chart_filename() -> PathBuf {
    PathBuf::from(OUTPUT_DIR).join(format!("{}.json", chart_stem()))
}

/// Generate default directory for CSV chart series: quake-charts-{YYMMDD}
pub fn generate_default_chart_dirname() -> PathBuf {
    PathBuf::from(OUTPUT_DIR).join(chart_stem())
}

fn chart_stem() -> String {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year
    let month = now.month();
    let day = now.day();

    format!("quake-charts-{:02}{:02}{:02}", year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_default_chart_filename() {
        let filename = generate_default_chart_filename();
        let filename_str = filename.to_string_lossy();

        assert!(filename_str.contains("quake-charts-"));
        assert!(filename_str.ends_with(".json"));
        assert!(filename.starts_with("output"));

        let file_part = filename.file_name().unwrap().to_string_lossy();
        // quake-charts-YYMMDD.json
        assert_eq!(file_part.len(), "quake-charts-".len() + 6 + ".json".len());
    }

    #[test]
    fn test_generate_default_chart_dirname() {
        let dirname = generate_default_chart_dirname();

        assert!(dirname.starts_with("output"));
        assert!(dirname.extension().is_none());
        assert!(dirname.to_string_lossy().contains("quake-charts-"));
    }
}
