use crate::core::is_within_bounding_box;
use crate::models::{Agent, BoundingBox, Coordinate};
use crate::services::repository::{AgentRepository, RepositoryError};
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-process agent store
///
/// Keeps insertion order, which is also the order search ties resolve in.
/// Used by tests and by local runs with `database.url = "memory"`.
#[derive(Default)]
pub struct InMemoryAgentRepository {
    agents: RwLock<Vec<Agent>>,
}

impl InMemoryAgentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_agents(agents: Vec<Agent>) -> Self {
        Self {
            agents: RwLock::new(agents),
        }
    }

    /// Insert an agent, replacing any existing record with the same id
    pub async fn upsert(&self, agent: Agent) {
        let mut agents = self.agents.write().await;
        match agents.iter_mut().find(|a| a.id == agent.id) {
            Some(existing) => *existing = agent,
            None => agents.push(agent),
        }
    }
}

#[async_trait]
impl AgentRepository for InMemoryAgentRepository {
    async fn find_eligible_agents(
        &self,
        bounds: Option<BoundingBox>,
    ) -> Result<Vec<Agent>, RepositoryError> {
        let agents = self.agents.read().await;

        Ok(agents
            .iter()
            .filter(|agent| agent.is_available)
            .filter(|agent| match (agent.location(), bounds.as_ref()) {
                (None, _) => false,
                (Some(_), None) => true,
                (Some(loc), Some(bbox)) => is_within_bounding_box(loc.latitude, loc.longitude, bbox),
            })
            .cloned()
            .collect())
    }

    async fn get_agent(&self, id: Uuid) -> Result<Agent, RepositoryError> {
        self.agents
            .read()
            .await
            .iter()
            .find(|agent| agent.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("agent {}", id)))
    }

    async fn update_location(
        &self,
        id: Uuid,
        location: Coordinate,
    ) -> Result<Agent, RepositoryError> {
        let mut agents = self.agents.write().await;
        let agent = agents
            .iter_mut()
            .find(|agent| agent.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("agent {}", id)))?;

        agent.latitude = Some(location.latitude);
        agent.longitude = Some(location.longitude);
        agent.updated_at = chrono::Utc::now();

        Ok(agent.clone())
    }

    async fn health_check(&self) -> Result<bool, RepositoryError> {
        Ok(true)
    }
}
