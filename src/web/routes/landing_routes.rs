use axum::{
    Form,
    extract::{Path, State, rejection::FormRejection},
    response::Html,
    routing::get,
    Router,
};
use std::sync::Arc;
use tracing::{info, warn};

use crate::web::{AppError, AppState};

/// Browsers ask for this on their own; it never names a page.
const FAVICON: &str = "favicon.ico";

fn reject_reserved(code: &str) -> Result<(), AppError> {
    if code.eq_ignore_ascii_case(FAVICON) {
        return Err(AppError::NotFound(format!("{code} is not a landing page")));
    }
    Ok(())
}

// --- Route Handlers ---

async fn view_landing_handler(
    State(app_state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Html<String>, AppError> {
    reject_reserved(&code)?;
    info!(code = %code, "Landing page view.");
    Ok(Html(app_state.landing_service.view(&code).await))
}

async fn submit_landing_handler(
    State(app_state): State<Arc<AppState>>,
    Path(code): Path<String>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<Html<String>, AppError> {
    reject_reserved(&code)?;
    info!(code = %code, "Landing page submission.");

    let pairs = match form {
        Ok(Form(pairs)) => pairs,
        Err(rejection) => {
            warn!(code = %code, error = %rejection, "Unreadable form body. Treating as empty submission.");
            Vec::new()
        }
    };
    Ok(Html(app_state.landing_service.submit(&code, &pairs).await))
}

// --- Router ---

pub fn create_landing_router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/{code}",
        get(view_landing_handler).post(submit_landing_handler),
    )
}
