//! Input validation for the two coordinate fields.

use crate::{error::ValidationError, model::Coordinates};

pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// Validate the raw latitude/longitude text.
///
/// Checks run in a fixed order, so an empty field reports `MissingInput`
/// even when the other field is garbage:
/// 1. either field empty (after trimming) -> `MissingInput`
/// 2. either field not a number -> `NonNumeric`
/// 3. either value outside its range -> `OutOfRange`
pub fn validate_coordinates(
    latitude: &str,
    longitude: &str,
) -> Result<Coordinates, ValidationError> {
    let latitude = latitude.trim();
    let longitude = longitude.trim();

    if latitude.is_empty() || longitude.is_empty() {
        return Err(ValidationError::MissingInput);
    }

    let lat = parse_number(latitude)?;
    let lon = parse_number(longitude)?;

    if !in_range(lat, LATITUDE_RANGE) || !in_range(lon, LONGITUDE_RANGE) {
        return Err(ValidationError::OutOfRange);
    }

    Ok(Coordinates {
        latitude: lat,
        longitude: lon,
    })
}

/// Rust accepts `inf`/`infinity` in any case; of the spelled-out forms only
/// the exact `Infinity` literal counts as a number. Overflowing numerals such
/// as `1e400` still parse to infinity and fail the range check.
fn parse_number(raw: &str) -> Result<f64, ValidationError> {
    let value = match raw.parse::<f64>() {
        Ok(value) if !value.is_nan() => value,
        _ => return Err(ValidationError::NonNumeric),
    };

    if value.is_infinite() {
        let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
        let spelled_out = unsigned.starts_with(|c: char| c.is_ascii_alphabetic());
        if spelled_out && unsigned != "Infinity" {
            return Err(ValidationError::NonNumeric);
        }
    }

    Ok(value)
}

fn in_range(value: f64, (min, max): (f64, f64)) -> bool {
    (min..=max).contains(&value)
}
