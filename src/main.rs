use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use find_my_agent::config::{LoggingSettings, Settings};
use find_my_agent::core::ProximitySearch;
use find_my_agent::routes::{self, AppState};
use find_my_agent::services::{AgentRepository, InMemoryAgentRepository, PostgresClient, TokenVerifier};
use std::sync::Arc;
use tracing::{info, error, warn};
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber
///
/// `RUST_LOG` wins over `LOG_LEVEL`, which wins over the configured level.
fn init_logging(logging: &LoggingSettings) {
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| logging.level.clone());
    let format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| logging.format.clone());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging);

    info!("Starting Find My Agent service...");
    info!("Configuration loaded successfully");

    // Initialize agent store
    let repository: Arc<dyn AgentRepository> = if settings.database.is_memory() {
        warn!("Using in-memory agent store; data is lost on restart");
        Arc::new(InMemoryAgentRepository::new())
    } else {
        let db = &settings.database;
        match PostgresClient::from_settings(
            &db.url,
            db.max_connections,
            db.min_connections,
            db.acquire_timeout_secs,
            db.idle_timeout_secs,
        )
        .await
        {
            Ok(client) => {
                info!(
                    "PostgreSQL client initialized (max: {} connections)",
                    db.max_connections.unwrap_or(10)
                );
                Arc::new(client)
            }
            Err(e) => {
                error!("Failed to connect to PostgreSQL: {}", e);
                return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
            }
        }
    };

    if settings.auth.jwt_secret == "change-me" {
        warn!("auth.jwt_secret is the shipped default; set JWT_SECRET in production");
    }
    let verifier = Arc::new(TokenVerifier::new(&settings.auth.jwt_secret, settings.auth.leeway_secs));

    let search = ProximitySearch::new(
        settings.search.default_radius_km,
        settings.search.default_limit,
        settings.search.max_radius_km,
        settings.search.max_limit,
    );

    info!("Proximity search initialized with {:?}", settings.search);

    // Build application state
    let app_state = AppState {
        repository,
        verifier,
        search,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_app)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
