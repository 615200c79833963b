use crate::models::{Agent, BoundingBox, Coordinate};
use crate::services::repository::{AgentRepository, RepositoryError};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use uuid::Uuid;

const AGENT_COLUMNS: &str =
    "id, user_id, name, latitude, longitude, is_available, average_rating, updated_at";

/// PostgreSQL-backed agent store
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, RepositoryError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Wrap an existing pool (migrations are not run)
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AgentRepository for PostgresClient {
    async fn find_eligible_agents(
        &self,
        bounds: Option<BoundingBox>,
    ) -> Result<Vec<Agent>, RepositoryError> {
        let agents = match bounds {
            Some(bbox) => {
                let query = format!(
                    r#"
                    SELECT {AGENT_COLUMNS}
                    FROM agents
                    WHERE is_available
                      AND latitude IS NOT NULL
                      AND longitude IS NOT NULL
                      AND latitude BETWEEN $1 AND $2
                      AND longitude BETWEEN $3 AND $4
                    ORDER BY id
                    "#
                );

                sqlx::query_as::<_, Agent>(&query)
                    .bind(bbox.min_lat)
                    .bind(bbox.max_lat)
                    .bind(bbox.min_lon)
                    .bind(bbox.max_lon)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let query = format!(
                    r#"
                    SELECT {AGENT_COLUMNS}
                    FROM agents
                    WHERE is_available
                      AND latitude IS NOT NULL
                      AND longitude IS NOT NULL
                    ORDER BY id
                    "#
                );

                sqlx::query_as::<_, Agent>(&query)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        tracing::debug!("Loaded {} eligible agents (bounded: {})", agents.len(), bounds.is_some());

        Ok(agents)
    }

    async fn get_agent(&self, id: Uuid) -> Result<Agent, RepositoryError> {
        let query = format!("SELECT {AGENT_COLUMNS} FROM agents WHERE id = $1");

        sqlx::query_as::<_, Agent>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("agent {}", id)))
    }

    async fn update_location(
        &self,
        id: Uuid,
        location: Coordinate,
    ) -> Result<Agent, RepositoryError> {
        let query = format!(
            r#"
            UPDATE agents
            SET latitude = $2, longitude = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {AGENT_COLUMNS}
            "#
        );

        let agent = sqlx::query_as::<_, Agent>(&query)
            .bind(id)
            .bind(location.latitude)
            .bind(location.longitude)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("agent {}", id)))?;

        tracing::debug!(
            "Updated location of agent {} to ({}, {})",
            id,
            location.latitude,
            location.longitude
        );

        Ok(agent)
    }

    /// Health check for the database connection
    async fn health_check(&self) -> Result<bool, RepositoryError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
