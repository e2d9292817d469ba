use axum::{
    Router,
    extract::State,
    http::Method,
    response::Redirect,
    routing::get,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::landing::LandingService;
use crate::server::config::ServerConfig;
use crate::web::routes::*;

pub mod error;
pub mod routes;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: DatabaseConnection,
    pub landing_service: Arc<LandingService>,
    pub config: Arc<ServerConfig>,
}

async fn health_check_handler() -> &'static str {
    "OK"
}

/// A bare request has no page to show; send it to the configured site.
async fn root_redirect_handler(State(app_state): State<Arc<AppState>>) -> Redirect {
    Redirect::permanent(&app_state.config.fallback_url)
}

pub fn create_axum_router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_redirect_handler).post(root_redirect_handler))
        .route("/api/health", get(health_check_handler))
        .nest("/api/stats", stats_routes::create_stats_router())
        .merge(landing_routes::create_landing_router())
        .with_state(app_state)
        .layer(cors)
}
