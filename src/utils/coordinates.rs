use crate::error::{ExplorerError, Result};

/// Parse a decimal-degree coordinate field, tolerating surrounding whitespace
///
/// # Examples
/// ```
/// use quake_explorer::utils::parse_coordinate;
///
/// let lat = parse_coordinate(" 19.246 ").unwrap();
/// assert!((lat - 19.246).abs() < 0.000001);
/// ```
pub fn parse_coordinate(coord_str: &str) -> Result<f64> {
    let trimmed = coord_str.trim();

    let value = trimmed.parse::<f64>().map_err(|_| {
        ExplorerError::InvalidFormat(format!("Invalid coordinate value: '{}'", coord_str))
    })?;

    if !value.is_finite() {
        return Err(ExplorerError::InvalidFormat(format!(
            "Coordinate is not a finite number: '{}'",
            coord_str
        )));
    }

    Ok(value)
}

/// Calculate the distance between two points using the Haversine formula
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate() {
        assert!((parse_coordinate("51.5074").unwrap() - 51.5074).abs() < 0.000001);
        assert!((parse_coordinate(" -179.997 ").unwrap() - -179.997).abs() < 0.000001);
        assert!(parse_coordinate("").is_err());
        assert!(parse_coordinate("north").is_err());
        assert!(parse_coordinate("NaN").is_err());
    }

    #[test]
    fn test_haversine_distance() {
        // Tokyo to Osaka
        let distance = haversine_distance(35.6897, 139.6922, 34.6936, 135.5019);
        assert!((distance - 397.0).abs() < 10.0); // ~397km with 10km tolerance
    }
}
