use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use sea_orm::EntityTrait;
use serde::Serialize;
use std::sync::Arc;

use crate::db::{entities::landing_page, services};
use crate::web::{AppError, AppState};

/// Stored counters next to the counts derived from the hit log. The two can
/// drift if counters were edited by hand.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStatsResponse {
    pub page_id: i32,
    pub code: String,
    pub page_views: i32,
    pub leads: i32,
    pub hits: services::PageStats,
}

async fn get_page_stats_handler(
    State(app_state): State<Arc<AppState>>,
    Path(page_id): Path<i32>,
) -> Result<Json<PageStatsResponse>, AppError> {
    let page = landing_page::Entity::find_by_id(page_id)
        .one(&app_state.db_pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Landing page not found".to_string()))?;

    let hits = services::page_stats(&app_state.db_pool, page.id).await?;

    Ok(Json(PageStatsResponse {
        page_id: page.id,
        code: page.code,
        page_views: page.page_views,
        leads: page.leads,
        hits,
    }))
}

pub fn create_stats_router() -> Router<Arc<AppState>> {
    Router::new().route("/{page_id}", get(get_page_stats_handler))
}
