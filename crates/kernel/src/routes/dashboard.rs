//! Dashboard endpoint: growth statistics plus the requesting admin's name.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tower_sessions::Session;

use magnate_kernel::listing::types::Envelope;

use crate::error::AppResult;
use crate::state::AppState;

use super::helpers::require_admin;

/// GET /admin/api/dashboard
async fn dashboard(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Json<Envelope<serde_json::Value>>> {
    let admin = require_admin(&state, &session).await?;

    let stats = state.stats().dashboard().await;

    Ok(Json(Envelope::success(serde_json::json!({
        "admin": admin.display_name(),
        "stats": stats,
    }))))
}

/// Create the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/admin/api/dashboard", get(dashboard))
}
