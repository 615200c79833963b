use actix_web::{web, HttpRequest, HttpResponse, Responder};
use crate::core::{self, search_bounds, ProximitySearch};
use crate::error::ApiError;
use crate::models::{HealthResponse, NearbyAgentsResponse, NearbyQuery, SearchMeta, UpdateLocationRequest};
use crate::services::{authorize_location_update, AgentRepository, TokenVerifier};
use std::sync::Arc;
use uuid::Uuid;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn AgentRepository>,
    pub verifier: Arc<TokenVerifier>,
    pub search: ProximitySearch,
}

/// Configure all agent-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/agents/nearby", web::get().to(find_nearby_agents))
        .route("/agents/{id}", web::get().to(get_agent))
        .route("/agents/{id}/location", web::post().to(update_location));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let healthy = match state.repository.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!("Store health check failed: {}", e);
            false
        }
    };

    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Nearby agents endpoint
///
/// GET /api/v1/agents/nearby?latitude=51.5&longitude=-0.12&radius=10&limit=20
async fn find_nearby_agents(
    state: web::Data<AppState>,
    query: web::Query<NearbyQuery>,
) -> Result<HttpResponse, ApiError> {
    let origin = core::validate_text(query.latitude.as_deref(), query.longitude.as_deref())?;
    let params = state.search.params(query.radius, query.limit)?;

    tracing::info!(
        "Nearby search at ({}, {}), radius {} km, limit {}",
        origin.latitude,
        origin.longitude,
        params.radius_km,
        params.limit
    );

    let agents = if params.radius_km > 0.0 && params.limit > 0 {
        state
            .repository
            .find_eligible_agents(search_bounds(&origin, params.radius_km))
            .await?
    } else {
        Vec::new()
    };

    let candidates = agents.len();
    let results = state.search.search(&origin, agents, params);

    tracing::debug!("Returning {} of {} candidate agents", results.len(), candidates);

    Ok(HttpResponse::Ok().json(NearbyAgentsResponse {
        meta: SearchMeta {
            latitude: origin.latitude,
            longitude: origin.longitude,
            radius: params.radius_km,
            limit: params.limit,
            count: results.len(),
        },
        agents: results,
    }))
}

/// Single agent lookup
///
/// GET /api/v1/agents/{id}
async fn get_agent(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let agent = state.repository.get_agent(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(agent))
}

/// Location update endpoint
///
/// POST /api/v1/agents/{id}/location
///
/// Request body:
/// ```json
/// {
///   "latitude": 51.5074,
///   "longitude": -0.1278
/// }
/// ```
///
/// The caller must be the agent's own user or an admin. The body is parsed
/// only after the caller is identified.
async fn update_location(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Bytes,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let agent_id = path.into_inner();

    let caller = state.verifier.authenticate(&req).map_err(|e| {
        tracing::info!("Rejected location update for {}: {}", agent_id, e);
        e
    })?;

    let body: UpdateLocationRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::InvalidJson(e.to_string()))?;
    let location = core::validate(body.latitude.as_ref(), body.longitude.as_ref())?;

    let agent = state.repository.get_agent(agent_id).await?;
    authorize_location_update(&caller, &agent)?;

    let updated = state.repository.update_location(agent_id, location).await?;

    tracing::info!(
        "Agent {} moved to ({}, {}) by user {} ({:?})",
        agent_id,
        location.latitude,
        location.longitude,
        caller.user_id,
        caller.role
    );

    Ok(HttpResponse::Ok().json(updated))
}
