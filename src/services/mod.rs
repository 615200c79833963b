// Service exports
pub mod auth;
pub mod memory;
pub mod postgres;
pub mod repository;

pub use auth::{AuthError, Claims, TokenVerifier, authorize_location_update, bearer_token};
pub use memory::InMemoryAgentRepository;
pub use postgres::PostgresClient;
pub use repository::{AgentRepository, RepositoryError};
