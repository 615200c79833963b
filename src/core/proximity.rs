use crate::models::{Agent, Coordinate, SearchResult};
use std::cmp::Ordering;
use thiserror::Error;

/// Default search radius in kilometers
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Default number of results
pub const DEFAULT_LIMIT: usize = 20;

/// Effective parameters of one search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    pub radius_km: f64,
    pub limit: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            radius_km: DEFAULT_RADIUS_KM,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Find agents within `radius_km` of `origin`, nearest first
///
/// Ineligible agents (unavailable or without a location) are skipped even if
/// the caller passes them in. Equal distances keep their input order.
/// A non-positive or non-finite radius yields no results.
pub fn find_nearby(
    origin: &Coordinate,
    agents: Vec<Agent>,
    radius_km: f64,
    limit: usize,
) -> Vec<SearchResult> {
    if !radius_km.is_finite() || radius_km <= 0.0 || limit == 0 {
        return Vec::new();
    }

    let mut results: Vec<SearchResult> = agents
        .into_iter()
        .filter(|agent| agent.is_available)
        .filter_map(|agent| {
            let location = agent.location()?;
            let distance_km = origin.distance_km(&location);
            (distance_km <= radius_km).then_some(SearchResult { agent, distance_km })
        })
        .collect();

    // sort_by is stable
    results.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(Ordering::Equal)
    });

    results.truncate(limit);
    results
}

/// Requested search parameters beyond the configured caps
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchParamsError {
    #[error("radius must be at most {max} km, got {requested}")]
    RadiusTooLarge { requested: f64, max: f64 },

    #[error("limit must be at most {max}, got {requested}")]
    LimitTooLarge { requested: usize, max: usize },
}

/// Search front-end holding the service's defaults and caps
#[derive(Debug, Clone, Copy)]
pub struct ProximitySearch {
    default_radius_km: f64,
    default_limit: usize,
    max_radius_km: f64,
    max_limit: usize,
}

impl ProximitySearch {
    pub fn new(
        default_radius_km: f64,
        default_limit: usize,
        max_radius_km: f64,
        max_limit: usize,
    ) -> Self {
        Self {
            default_radius_km,
            default_limit,
            max_radius_km,
            max_limit,
        }
    }

    /// Apply defaults to missing values and reject values above the caps
    ///
    /// Non-positive and NaN radii pass through unchanged so the search
    /// returns nothing.
    pub fn params(
        &self,
        radius_km: Option<f64>,
        limit: Option<u32>,
    ) -> Result<SearchParams, SearchParamsError> {
        let radius_km = radius_km.unwrap_or(self.default_radius_km);
        if radius_km > self.max_radius_km {
            return Err(SearchParamsError::RadiusTooLarge {
                requested: radius_km,
                max: self.max_radius_km,
            });
        }

        let limit = limit.map(|l| l as usize).unwrap_or(self.default_limit);
        if limit > self.max_limit {
            return Err(SearchParamsError::LimitTooLarge {
                requested: limit,
                max: self.max_limit,
            });
        }

        Ok(SearchParams { radius_km, limit })
    }

    pub fn search(
        &self,
        origin: &Coordinate,
        agents: Vec<Agent>,
        params: SearchParams,
    ) -> Vec<SearchResult> {
        find_nearby(origin, agents, params.radius_km, params.limit)
    }
}

impl Default for ProximitySearch {
    fn default() -> Self {
        Self::new(DEFAULT_RADIUS_KM, DEFAULT_LIMIT, 500.0, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn create_agent(name: &str, lat: Option<f64>, lon: Option<f64>, is_available: bool) -> Agent {
        Agent {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: name.to_string(),
            latitude: lat,
            longitude: lon,
            is_available,
            average_rating: Some(4.5),
            updated_at: Utc::now(),
        }
    }

    fn london() -> Coordinate {
        Coordinate { latitude: 51.5074, longitude: -0.1278 }
    }

    #[test]
    fn test_includes_near_excludes_far() {
        let agents = vec![
            create_agent("near", Some(51.51), Some(-0.12), true),
            create_agent("far", Some(52.5), Some(0.5), true),
        ];

        let results = find_nearby(&london(), agents, 10.0, 20);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].agent.name, "near");
        assert!((results[0].distance_km - 0.6).abs() < 0.1, "got {}", results[0].distance_km);
    }

    #[test]
    fn test_far_agent_distance() {
        let far = Coordinate { latitude: 52.5, longitude: 0.5 };
        let distance = london().distance_km(&far);
        assert!((distance - 120.0).abs() < 5.0, "got {}", distance);
    }

    #[test]
    fn test_zero_and_negative_radius() {
        let agents = vec![create_agent("here", Some(51.5074), Some(-0.1278), true)];
        assert!(find_nearby(&london(), agents.clone(), 0.0, 20).is_empty());
        assert!(find_nearby(&london(), agents.clone(), -5.0, 20).is_empty());
        assert!(find_nearby(&london(), agents, f64::NAN, 20).is_empty());
    }

    #[test]
    fn test_limit_keeps_nearest() {
        // ~1 km and ~3 km due north
        let agents = vec![
            create_agent("three", Some(51.5074 + 3.0 / 111.195), Some(-0.1278), true),
            create_agent("one", Some(51.5074 + 1.0 / 111.195), Some(-0.1278), true),
        ];

        let results = find_nearby(&london(), agents, 10.0, 1);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].agent.name, "one");
    }

    #[test]
    fn test_ineligible_agents_skipped() {
        let agents = vec![
            create_agent("busy", Some(51.51), Some(-0.12), false),
            create_agent("unlocated", None, None, true),
            create_agent("half", Some(51.51), None, true),
            create_agent("ok", Some(51.52), Some(-0.12), true),
        ];

        let results = find_nearby(&london(), agents, 10.0, 20);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].agent.name, "ok");
    }

    #[test]
    fn test_ties_keep_input_order() {
        let agents = vec![
            create_agent("first", Some(51.51), Some(-0.12), true),
            create_agent("second", Some(51.51), Some(-0.12), true),
            create_agent("third", Some(51.51), Some(-0.12), true),
        ];

        let names: Vec<String> = find_nearby(&london(), agents, 10.0, 20)
            .into_iter()
            .map(|r| r.agent.name)
            .collect();

        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_sorted_and_within_radius() {
        let agents: Vec<Agent> = (0..50)
            .map(|i| {
                let offset = ((i * 37) % 50) as f64 * 0.004;
                create_agent(&i.to_string(), Some(51.5074 + offset), Some(-0.1278 - offset), true)
            })
            .collect();

        let results = find_nearby(&london(), agents, 15.0, 30);

        assert!(results.len() <= 30);
        assert!(results.iter().all(|r| r.distance_km <= 15.0));
        assert!(results.windows(2).all(|w| w[0].distance_km <= w[1].distance_km));
    }

    #[test]
    fn test_params_defaults_and_caps() {
        let search = ProximitySearch::new(10.0, 20, 500.0, 100);

        assert_eq!(search.params(None, None), Ok(SearchParams { radius_km: 10.0, limit: 20 }));
        assert_eq!(search.params(Some(500.0), Some(100)), Ok(SearchParams { radius_km: 500.0, limit: 100 }));
        assert_eq!(search.params(Some(-1.0), Some(0)), Ok(SearchParams { radius_km: -1.0, limit: 0 }));
    }

    #[test]
    fn test_params_over_cap_rejected() {
        let search = ProximitySearch::new(10.0, 20, 500.0, 100);

        assert_eq!(
            search.params(Some(1_000.0), None),
            Err(SearchParamsError::RadiusTooLarge { requested: 1_000.0, max: 500.0 })
        );
        assert_eq!(
            search.params(None, Some(101)),
            Err(SearchParamsError::LimitTooLarge { requested: 101, max: 100 })
        );
        assert!(search.params(Some(f64::INFINITY), None).is_err());
    }
}
