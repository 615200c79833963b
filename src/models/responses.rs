use serde::{Deserialize, Serialize};
use crate::models::domain::SearchResult;

/// Response for the nearby-agents endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyAgentsResponse {
    pub agents: Vec<SearchResult>,
    pub meta: SearchMeta,
}

/// Echo of the effective search parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchMeta {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: f64,
    pub limit: usize,
    pub count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
