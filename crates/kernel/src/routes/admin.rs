//! Admin JSON API: list views and single-record mutations.
//!
//! Every handler gates through `require_admin`. List endpoints hand the
//! raw parameter bag straight to the listing service, which owns
//! normalization and fail-safe defaulting; malformed filters never 4xx.

use axum::extract::{Path, Query, State};
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde::Deserialize;
use tower_sessions::Session;

use magnate_kernel::listing::EntityKind;
use magnate_kernel::listing::types::{Envelope, RawListParams};
use magnate_kernel::models::{Account, Business, CreateTaxType, Investment, TaxType, UpdateTaxType};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

use super::helpers::require_admin;

/// Status update payload.
#[derive(Debug, Deserialize)]
struct StatusPayload {
    status: i16,
}

type ListResponse = Json<Envelope<Vec<serde_json::Value>>>;

// =============================================================================
// List views
// =============================================================================

/// GET /admin/api/accounts
async fn list_accounts(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<RawListParams>,
) -> AppResult<ListResponse> {
    require_admin(&state, &session).await?;
    Ok(Json(state.listing().list(EntityKind::Account, &params).await))
}

/// GET /admin/api/businesses
async fn list_businesses(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<RawListParams>,
) -> AppResult<ListResponse> {
    require_admin(&state, &session).await?;
    Ok(Json(
        state.listing().list(EntityKind::Business, &params).await,
    ))
}

/// GET /admin/api/investments
async fn list_investments(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<RawListParams>,
) -> AppResult<ListResponse> {
    require_admin(&state, &session).await?;
    Ok(Json(
        state.listing().list(EntityKind::Investment, &params).await,
    ))
}

/// GET /admin/api/taxes
async fn list_taxes(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<RawListParams>,
) -> AppResult<ListResponse> {
    require_admin(&state, &session).await?;
    Ok(Json(state.listing().list(EntityKind::TaxType, &params).await))
}

// =============================================================================
// Single-record reads
// =============================================================================

/// GET /admin/api/accounts/{id}
async fn get_account(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<Json<Envelope<Account>>> {
    require_admin(&state, &session).await?;

    match Account::find_by_id(state.db(), id).await? {
        Some(account) => Ok(Json(Envelope::success(account))),
        None => Err(AppError::NotFound),
    }
}

/// GET /admin/api/businesses/{id}
async fn get_business(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<Json<Envelope<Business>>> {
    require_admin(&state, &session).await?;

    match Business::find_by_id(state.db(), id).await? {
        Some(business) => Ok(Json(Envelope::success(business))),
        None => Err(AppError::NotFound),
    }
}

/// GET /admin/api/investments/{id}
async fn get_investment(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<Json<Envelope<Investment>>> {
    require_admin(&state, &session).await?;

    match Investment::find_by_id(state.db(), id).await? {
        Some(investment) => Ok(Json(Envelope::success(investment))),
        None => Err(AppError::NotFound),
    }
}

/// GET /admin/api/taxes/{id}
async fn get_tax(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<Json<Envelope<TaxType>>> {
    require_admin(&state, &session).await?;

    match TaxType::find_by_id(state.db(), id).await? {
        Some(tax) => Ok(Json(Envelope::success(tax))),
        None => Err(AppError::NotFound),
    }
}

// =============================================================================
// Account mutations
// =============================================================================

/// PATCH /admin/api/accounts/{id}/status
async fn set_account_status(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
    Json(payload): Json<StatusPayload>,
) -> AppResult<Json<Envelope<serde_json::Value>>> {
    require_admin(&state, &session).await?;

    let updated = Account::set_status(state.db(), id, payload.status).await?;
    if !updated {
        return Err(AppError::NotFound);
    }

    Ok(Json(Envelope::success(
        serde_json::json!({ "id": id, "status": payload.status }),
    )))
}

/// DELETE /admin/api/accounts/{id}
async fn delete_account(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<Json<Envelope<serde_json::Value>>> {
    let admin = require_admin(&state, &session).await?;

    // An admin removing their own account would orphan the session.
    if admin.id == id {
        return Err(AppError::BadRequest(
            "cannot delete the requesting admin account".to_string(),
        ));
    }

    if !Account::delete(state.db(), id).await? {
        return Err(AppError::NotFound);
    }

    Ok(Json(Envelope::success(serde_json::json!({ "id": id }))))
}

// =============================================================================
// Business mutations
// =============================================================================

/// PATCH /admin/api/businesses/{id}/status
async fn set_business_status(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
    Json(payload): Json<StatusPayload>,
) -> AppResult<Json<Envelope<serde_json::Value>>> {
    require_admin(&state, &session).await?;

    if !Business::set_status(state.db(), id, payload.status).await? {
        return Err(AppError::NotFound);
    }

    Ok(Json(Envelope::success(
        serde_json::json!({ "id": id, "status": payload.status }),
    )))
}

/// DELETE /admin/api/businesses/{id}
async fn delete_business(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<Json<Envelope<serde_json::Value>>> {
    require_admin(&state, &session).await?;

    if !Business::delete(state.db(), id).await? {
        return Err(AppError::NotFound);
    }

    Ok(Json(Envelope::success(serde_json::json!({ "id": id }))))
}

// =============================================================================
// Investment mutations
// =============================================================================

/// DELETE /admin/api/investments/{id}
async fn delete_investment(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<Json<Envelope<serde_json::Value>>> {
    require_admin(&state, &session).await?;

    if !Investment::delete(state.db(), id).await? {
        return Err(AppError::NotFound);
    }

    Ok(Json(Envelope::success(serde_json::json!({ "id": id }))))
}

// =============================================================================
// Tax rule mutations
// =============================================================================

/// POST /admin/api/taxes
async fn create_tax(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateTaxType>,
) -> AppResult<Json<Envelope<TaxType>>> {
    require_admin(&state, &session).await?;

    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("tax name is required".to_string()));
    }
    if !payload.rate.is_finite() || payload.rate < 0.0 {
        return Err(AppError::BadRequest(
            "tax rate must be a non-negative number".to_string(),
        ));
    }

    let tax = TaxType::create(state.db(), payload).await?;
    Ok(Json(Envelope::success(tax)))
}

/// PATCH /admin/api/taxes/{id}
async fn update_tax(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateTaxType>,
) -> AppResult<Json<Envelope<TaxType>>> {
    require_admin(&state, &session).await?;

    if let Some(rate) = payload.rate
        && (!rate.is_finite() || rate < 0.0)
    {
        return Err(AppError::BadRequest(
            "tax rate must be a non-negative number".to_string(),
        ));
    }

    match TaxType::update(state.db(), id, payload).await? {
        Some(tax) => Ok(Json(Envelope::success(tax))),
        None => Err(AppError::NotFound),
    }
}

/// DELETE /admin/api/taxes/{id}
async fn delete_tax(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<Json<Envelope<serde_json::Value>>> {
    require_admin(&state, &session).await?;

    if !TaxType::delete(state.db(), id).await? {
        return Err(AppError::NotFound);
    }

    Ok(Json(Envelope::success(serde_json::json!({ "id": id }))))
}

/// Create the admin API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/api/accounts", get(list_accounts))
        .route(
            "/admin/api/accounts/{id}",
            get(get_account).delete(delete_account),
        )
        .route("/admin/api/accounts/{id}/status", patch(set_account_status))
        .route("/admin/api/businesses", get(list_businesses))
        .route(
            "/admin/api/businesses/{id}",
            get(get_business).delete(delete_business),
        )
        .route(
            "/admin/api/businesses/{id}/status",
            patch(set_business_status),
        )
        .route("/admin/api/investments", get(list_investments))
        .route(
            "/admin/api/investments/{id}",
            get(get_investment).delete(delete_investment),
        )
        .route("/admin/api/taxes", get(list_taxes).post(create_tax))
        .route(
            "/admin/api/taxes/{id}",
            get(get_tax).patch(update_tax).delete(delete_tax),
        )
}
