use crate::models::Coordinate;
use serde_json::Value;
use thiserror::Error;
use validator::Validate;

/// Reasons a latitude/longitude pair is rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{0} must be a finite number")]
    NotNumeric(&'static str),

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
}

impl CoordinateError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            CoordinateError::Missing(field) | CoordinateError::NotNumeric(field) => field,
            CoordinateError::OutOfRange { field, .. } => field,
        }
    }
}

impl Coordinate {
    /// Build a coordinate from degrees, rejecting non-finite and out-of-range values
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        // NaN slips through range comparisons
        if !latitude.is_finite() {
            return Err(CoordinateError::NotNumeric("latitude"));
        }
        if !longitude.is_finite() {
            return Err(CoordinateError::NotNumeric("longitude"));
        }

        let coordinate = Self { latitude, longitude };

        if let Err(errors) = coordinate.validate() {
            let fields = errors.field_errors();
            return Err(if fields.contains_key("latitude") {
                CoordinateError::OutOfRange { field: "latitude", min: -90.0, max: 90.0 }
            } else {
                CoordinateError::OutOfRange { field: "longitude", min: -180.0, max: 180.0 }
            });
        }

        Ok(coordinate)
    }
}

/// Validate a coordinate supplied as JSON values
///
/// Numbers and numeric strings are accepted; `null`, booleans, arrays and
/// objects are not.
pub fn validate(
    latitude: Option<&Value>,
    longitude: Option<&Value>,
) -> Result<Coordinate, CoordinateError> {
    let latitude = json_number("latitude", latitude)?;
    let longitude = json_number("longitude", longitude)?;
    Coordinate::new(latitude, longitude)
}

/// Validate a coordinate supplied as text, e.g. from a query string
pub fn validate_text(
    latitude: Option<&str>,
    longitude: Option<&str>,
) -> Result<Coordinate, CoordinateError> {
    let latitude = text_number("latitude", latitude)?;
    let longitude = text_number("longitude", longitude)?;
    Coordinate::new(latitude, longitude)
}

fn json_number(field: &'static str, value: Option<&Value>) -> Result<f64, CoordinateError> {
    match value {
        None | Some(Value::Null) => Err(CoordinateError::Missing(field)),
        Some(Value::Number(n)) => n.as_f64().ok_or(CoordinateError::NotNumeric(field)),
        Some(Value::String(s)) => text_number(field, Some(s.as_str())),
        Some(_) => Err(CoordinateError::NotNumeric(field)),
    }
}

fn text_number(field: &'static str, value: Option<&str>) -> Result<f64, CoordinateError> {
    let text = value.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(CoordinateError::Missing(field));
    }
    text.parse::<f64>().map_err(|_| CoordinateError::NotNumeric(field))
}
