use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Insurance agent as stored in the agents table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Agent {
    pub id: Uuid,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(rename = "isAvailable")]
    pub is_available: bool,
    #[serde(rename = "averageRating")]
    pub average_rating: Option<f64>,
    #[serde(rename = "updatedAt")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Agent {
    /// Stored location, if both halves are present
    pub fn location(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinate { latitude, longitude }),
            _ => None,
        }
    }

    /// Available and located agents take part in proximity search
    pub fn is_eligible(&self) -> bool {
        self.is_available && self.location().is_some()
    }
}

/// Validated latitude/longitude pair in degrees
///
/// Built through [`Coordinate::new`] or [`crate::core::coordinate::validate`];
/// the range checks run through `validator`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct Coordinate {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

/// Agent annotated with its distance from the query point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(flatten)]
    pub agent: Agent,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Roles carried in access tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Agent,
    Employee,
    User,
}

/// Authenticated identity behind a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: Uuid,
    pub role: Role,
}

impl Caller {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn agent(latitude: Option<f64>, longitude: Option<f64>, is_available: bool) -> Agent {
        Agent {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Test Agent".to_string(),
            latitude,
            longitude,
            is_available,
            average_rating: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_eligibility() {
        assert!(agent(Some(51.5), Some(-0.1), true).is_eligible());
        assert!(!agent(Some(51.5), Some(-0.1), false).is_eligible());
        assert!(!agent(None, Some(-0.1), true).is_eligible());
        assert!(!agent(Some(51.5), None, true).is_eligible());
    }

    #[test]
    fn test_search_result_serializes_flat() {
        let result = SearchResult {
            agent: agent(Some(51.51), Some(-0.12), true),
            distance_km: 0.6,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["distanceKm"], 0.6);
        assert_eq!(json["isAvailable"], true);
        assert_eq!(json["latitude"], 51.51);
    }

    #[test]
    fn test_role_serde() {
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
        assert_eq!(serde_json::to_string(&Role::Employee).unwrap(), "\"employee\"");
    }
}
