use std::path::Path;

use crate::error::Result;
use crate::models::{City, Record, Selection};
use crate::readers::TableReader;
use crate::utils::progress::ProgressReporter;

/// The two tables a run works on, loaded once and never modified
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    pub quakes: Vec<Record>,
    pub cities: Vec<Record>,
}

impl RecordStore {
    pub fn load(seismic_path: &Path, cities_path: &Path) -> Result<Self> {
        Self::load_with(&TableReader::new(), seismic_path, cities_path, None)
    }

    pub fn load_with(
        reader: &TableReader,
        seismic_path: &Path,
        cities_path: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<Self> {
        if let Some(p) = progress {
            p.set_message(&format!("Reading {}...", seismic_path.display()));
        }
        let quakes = reader.read_records(seismic_path)?;
        tracing::info!(path = %seismic_path.display(), records = quakes.len(), "Loaded seismic table");

        if let Some(p) = progress {
            p.set_message(&format!("Reading {}...", cities_path.display()));
        }
        let cities = reader.read_records(cities_path)?;
        tracing::info!(path = %cities_path.display(), records = cities.len(), "Loaded city table");

        Ok(Self { quakes, cities })
    }

    /// Selection over every seismic record
    pub fn selection(&self) -> Selection<'_> {
        Selection::all(&self.quakes)
    }

    /// City rows that carry a usable name and position
    pub fn usable_cities(&self) -> Vec<City> {
        let cities: Vec<City> = self.cities.iter().filter_map(City::from_record).collect();
        if cities.len() < self.cities.len() {
            tracing::debug!(
                skipped = self.cities.len() - cities.len(),
                "Skipped unusable city rows"
            );
        }
        cities
    }
}

/// Load both tables: `(seismic records, city records)`
pub fn load(seismic_path: &Path, cities_path: &Path) -> Result<(Vec<Record>, Vec<Record>)> {
    let store = RecordStore::load(seismic_path, cities_path)?;
    Ok((store.quakes, store.cities))
}
