//! Find My Agent - nearby-agent lookup for the Find My Agent insurance app
//!
//! Visitors search for available agents around a point; agents and admins
//! keep each agent's stored location current. Distance math and ranking live
//! in [`core`], storage behind the [`services::AgentRepository`] trait, and
//! the HTTP surface in [`routes`].

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{find_nearby, haversine_distance, ProximitySearch, SearchParams};
pub use error::ApiError;
pub use models::{Agent, Coordinate, SearchResult, Caller, Role};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let origin = Coordinate::new(40.7128, -74.0060).unwrap();
        assert!(find_nearby(&origin, vec![], 10.0, 20).is_empty());
        assert!(haversine_distance(40.7128, -74.0060, 40.7128, -74.0060) < 0.01);
    }
}
