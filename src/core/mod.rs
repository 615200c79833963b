// Core algorithm exports
pub mod coordinate;
pub mod distance;
pub mod proximity;

pub use coordinate::{validate, validate_text, CoordinateError};
pub use distance::{haversine_distance, search_bounds, is_within_bounding_box, EARTH_RADIUS_KM};
pub use proximity::{find_nearby, ProximitySearch, SearchParams, SearchParamsError};
