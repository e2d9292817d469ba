use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::landing::LandingService;
use crate::notifications::service::NotificationService;
use crate::server::config::ServerConfig;
use crate::web::{AppState, create_axum_router};

pub fn test_config() -> ServerConfig {
    ServerConfig {
        database_url: "sqlite::memory:".to_string(),
        listen_addr: "127.0.0.1:0".to_string(),
        fallback_url: "https://www.example.com/".to_string(),
        log_dir: "logs".to_string(),
        auto_migrate: false,
        smtp_host: None,
        smtp_port: 587,
        smtp_username: None,
        smtp_password: None,
        smtp_sender: None,
    }
}

/// Router over `db` with notifications disabled.
pub fn test_router(db: &DatabaseConnection) -> (Router, Arc<ServerConfig>) {
    let config = Arc::new(test_config());
    let landing_service = LandingService::new(db.clone(), Arc::new(NotificationService::disabled()));
    let app_state = Arc::new(AppState {
        db_pool: db.clone(),
        landing_service: Arc::new(landing_service),
        config: config.clone(),
    });
    (create_axum_router(app_state), config)
}
