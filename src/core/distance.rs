use crate::models::{BoundingBox, Coordinate};

/// Earth's mean radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

const BOUNDS_EPSILON_DEG: f64 = 1e-6;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

impl Coordinate {
    /// Great-circle distance to another coordinate in kilometers
    #[inline]
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        haversine_distance(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

/// Bounding box usable as a storage pre-filter for a radius search
///
/// Latitude and longitude spans use the exact spherical-cap extent, so the
/// box always contains the search circle.
/// Returns `None` when the box would reach a pole or wrap the antimeridian;
/// callers then scan without a pre-filter.
pub fn search_bounds(center: &Coordinate, radius_km: f64) -> Option<BoundingBox> {
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return None;
    }

    let angular = radius_km / EARTH_RADIUS_KM;
    let ratio = angular.sin() / center.latitude.to_radians().cos();
    if !ratio.is_finite() || ratio >= 1.0 {
        return None;
    }

    // Absorb float error at the circle's edge
    let lat_delta = angular.to_degrees() + BOUNDS_EPSILON_DEG;
    let lon_delta = ratio.asin().to_degrees() + BOUNDS_EPSILON_DEG;

    let bbox = BoundingBox {
        min_lat: center.latitude - lat_delta,
        max_lat: center.latitude + lat_delta,
        min_lon: center.longitude - lon_delta,
        max_lon: center.longitude + lon_delta,
    };

    let valid = bbox.min_lat > -90.0
        && bbox.max_lat < 90.0
        && bbox.min_lon >= -180.0
        && bbox.max_lon <= 180.0;

    valid.then_some(bbox)
}

/// Check if a point is within a bounding box
#[inline]
pub fn is_within_bounding_box(
    lat: f64,
    lon: f64,
    bbox: &BoundingBox,
) -> bool {
    lat >= bbox.min_lat
        && lat <= bbox.max_lat
        && lon >= bbox.min_lon
        && lon <= bbox.max_lon
}
