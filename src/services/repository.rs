use crate::models::{Agent, BoundingBox, Coordinate};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when reading or writing agents
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Storage interface consumed by the proximity search and location updates
#[async_trait]
pub trait AgentRepository: Send + Sync {
    /// Agents that are available and have a stored location
    ///
    /// `bounds` is an optional pre-filter; implementations may return agents
    /// outside it but must not drop any agent inside it.
    async fn find_eligible_agents(
        &self,
        bounds: Option<BoundingBox>,
    ) -> Result<Vec<Agent>, RepositoryError>;

    async fn get_agent(&self, id: Uuid) -> Result<Agent, RepositoryError>;

    /// Overwrite an agent's stored location and return the updated record
    async fn update_location(
        &self,
        id: Uuid,
        location: Coordinate,
    ) -> Result<Agent, RepositoryError>;

    async fn health_check(&self) -> Result<bool, RepositoryError>;
}
