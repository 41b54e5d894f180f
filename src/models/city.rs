use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Record;
use crate::utils::constants::{
    CITY_COUNTRY_FIELD, CITY_LAT_FIELD, CITY_LNG_FIELD, CITY_NAME_FIELD, CITY_POPULATION_FIELD,
};
use crate::utils::coordinates::{haversine_distance, parse_coordinate};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct City {
    #[validate(length(min = 1))]
    pub name: String,

    pub country: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    pub population: Option<u64>,
}

impl City {
    pub fn new(
        name: String,
        country: String,
        latitude: f64,
        longitude: f64,
        population: Option<u64>,
    ) -> Self {
        Self {
            name,
            country,
            latitude,
            longitude,
            population,
        }
    }

    /// Typed view over a city-table row; `None` if the row is not a usable city
    pub fn from_record(record: &Record) -> Option<Self> {
        let name = record.get(CITY_NAME_FIELD)?.trim().to_string();
        let country = record
            .get(CITY_COUNTRY_FIELD)
            .unwrap_or_default()
            .trim()
            .to_string();
        let latitude = parse_coordinate(record.get(CITY_LAT_FIELD)?).ok()?;
        let longitude = parse_coordinate(record.get(CITY_LNG_FIELD)?).ok()?;

        // Population is often blank or written as a float ("37732000.0")
        let population = record
            .number(CITY_POPULATION_FIELD)
            .filter(|p| *p >= 0.0)
            .map(|p| p as u64);

        let city = Self::new(name, country, latitude, longitude, population);
        city.validate().ok()?;
        Some(city)
    }

    pub fn distance_km(&self, latitude: f64, longitude: f64) -> f64 {
        haversine_distance(self.latitude, self.longitude, latitude, longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city_row(name: &str, lat: &str, lng: &str, population: &str) -> Record {
        Record::from_pairs(
            1,
            &[
                ("city", name),
                ("city_ascii", name),
                ("lat", lat),
                ("lng", lng),
                ("country", "Japan"),
                ("population", population),
            ],
        )
    }

    #[test]
    fn test_city_from_record() {
        let city = City::from_record(&city_row("Tokyo", "35.6897", "139.6922", "37732000"))
            .unwrap();

        assert_eq!(city.name, "Tokyo");
        assert_eq!(city.country, "Japan");
        assert_eq!(city.population, Some(37_732_000));
        assert!(city.validate().is_ok());
    }

    #[test]
    fn test_unusable_city_rows() {
        assert!(City::from_record(&city_row("", "35.0", "139.0", "")).is_none());
        assert!(City::from_record(&city_row("Nowhere", "95.0", "139.0", "")).is_none());
        assert!(City::from_record(&city_row("Nowhere", "35.0", "east", "")).is_none());

        let no_population = City::from_record(&city_row("Osaka", "34.6936", "135.5019", ""));
        assert_eq!(no_population.unwrap().population, None);
    }

    #[test]
    fn test_distance() {
        let city = City::new("Tokyo".into(), "Japan".into(), 35.6897, 139.6922, None);
        assert!((city.distance_km(34.6936, 135.5019) - 397.0).abs() < 10.0);
        assert!(city.distance_km(35.6897, 139.6922) < 0.001);
    }
}
