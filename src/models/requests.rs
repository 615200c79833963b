use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query string for the nearby-agents endpoint
///
/// Latitude and longitude stay raw text so that missing or malformed values
/// are reported as invalid coordinates rather than generic query errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NearbyQuery {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub radius: Option<f64>,
    pub limit: Option<u32>,
}

/// Body of a location update
///
/// Accepts any JSON value per field; numbers and numeric strings are both
/// valid input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateLocationRequest {
    #[serde(default)]
    pub latitude: Option<Value>,
    #[serde(default)]
    pub longitude: Option<Value>,
}
