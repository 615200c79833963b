// Route exports
pub mod agents;

use actix_web::web;
use crate::error::{handle_path_error, handle_query_payload_error};

pub use agents::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(agents::configure),
    );
}

/// Routes plus the extractor configs that render query and path errors as JSON
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg
        .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
        .app_data(web::PathConfig::default().error_handler(handle_path_error))
        .configure(configure_routes);
}
