/// Seismic table column names
pub const LATITUDE_FIELD: &str = "Latitude";
pub const LONGITUDE_FIELD: &str = "Longitude";
pub const DATE_FIELD: &str = "Date";
pub const MAGNITUDE_FIELD: &str = "Magnitude";
pub const TYPE_FIELD: &str = "Type";

/// City table column names
pub const CITY_NAME_FIELD: &str = "city";
pub const CITY_LAT_FIELD: &str = "lat";
pub const CITY_LNG_FIELD: &str = "lng";
pub const CITY_COUNTRY_FIELD: &str = "country";
pub const CITY_POPULATION_FIELD: &str = "population";

/// Date format used by the seismic table and the date prompts
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Filter domains
pub const MIN_LATITUDE: f64 = -77.08;
pub const MAX_LATITUDE: f64 = 86.005;
pub const MIN_LONGITUDE: f64 = -179.997;
pub const MAX_LONGITUDE: f64 = 179.998;
pub const MIN_MAGNITUDE: f64 = 5.5;
pub const MAX_MAGNITUDE: f64 = 9.1;
/// (year, month, day)
pub const MIN_DATE: (i32, u32, u32) = (1965, 1, 2);
pub const MAX_DATE: (i32, u32, u32) = (2016, 12, 30);

/// Default file names
pub const SEISMIC_FILE: &str = "earthquakesF23.csv";
pub const CITIES_FILE: &str = "worldcitiesF23.csv";
pub const CONFIG_FILE: &str = "quake-explorer.toml";
pub const OUTPUT_DIR: &str = "output";

/// Processing defaults
pub const DEFAULT_BIN_COUNT: usize = 6;
pub const DEFAULT_STRONGEST_EVENTS: usize = 5;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Puzzle
pub const GRID_SIZE: usize = 4;
pub const WIN_TILE: u32 = 2048;
pub const FOUR_TILE_PROBABILITY: f64 = 0.1;
