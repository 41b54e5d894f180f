use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

use crate::error::Result;
use crate::models::EdgeMode;
use crate::utils::constants::{
    CITIES_FILE, CONFIG_FILE, DEFAULT_BIN_COUNT, DEFAULT_LOG_LEVEL, DEFAULT_STRONGEST_EVENTS,
    SEISMIC_FILE,
};
use crate::writers::OutputFormat;

/// Settings resolved from defaults, an optional TOML file and `QUAKE_*` variables
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    pub seismic_file: PathBuf,
    pub cities_file: PathBuf,

    #[validate(range(min = 1, max = 360))]
    pub bin_count: usize,

    pub edge_mode: EdgeMode,
    pub output_format: String,
    pub log_level: String,
    pub use_mmap: bool,

    #[validate(range(max = 100))]
    pub strongest_events: usize,
}

impl AppConfig {
    /// Load settings; an explicit `path` must exist, the default file is optional
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (file, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(CONFIG_FILE), false),
        };

        let settings = Config::builder()
            .set_default("seismic_file", SEISMIC_FILE)?
            .set_default("cities_file", CITIES_FILE)?
            .set_default("bin_count", DEFAULT_BIN_COUNT as i64)?
            .set_default("edge_mode", "inclusive")?
            .set_default("output_format", "json")?
            .set_default("log_level", DEFAULT_LOG_LEVEL)?
            .set_default("use_mmap", false)?
            .set_default("strongest_events", DEFAULT_STRONGEST_EVENTS as i64)?
            .add_source(
                File::from(file.as_path())
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(Environment::with_prefix("QUAKE").try_parsing(true))
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.check()?;

        tracing::debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Field ranges plus the values that are only checked by parsing
    pub fn check(&self) -> Result<()> {
        self.validate()?;
        self.output_format.parse::<OutputFormat>()?;
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seismic_file: PathBuf::from(SEISMIC_FILE),
            cities_file: PathBuf::from(CITIES_FILE),
            bin_count: DEFAULT_BIN_COUNT,
            edge_mode: EdgeMode::Inclusive,
            output_format: "json".to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            use_mmap: false,
            strongest_events: DEFAULT_STRONGEST_EVENTS,
        }
    }
}
