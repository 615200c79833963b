// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Agent, Coordinate, SearchResult, BoundingBox, Role, Caller};
pub use requests::{NearbyQuery, UpdateLocationRequest};
pub use responses::{NearbyAgentsResponse, SearchMeta, HealthResponse, ErrorResponse};
