//! Admin API endpoints.
//!
//! All endpoints require admin role.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use serde::Deserialize;

use super::error::{ApiError, ResultExt};
use crate::auth::CurrentUser;
use crate::db::Database;

/// State for admin endpoints.
#[derive(Clone)]
pub struct AdminState {
    pub db: Database,
}

pub fn router(state: AdminState) -> Router {
    Router::new()
        .route("/accounts", get(list_accounts))
        .route("/accounts/{id}/active", put(set_active))
        .with_state(state)
}

/// List all accounts.
async fn list_accounts(State(state): State<AdminState>) -> Result<impl IntoResponse, ApiError> {
    let accounts = state
        .db
        .accounts()
        .list()
        .await
        .db_err("Failed to list accounts")?;

    Ok(Json(accounts))
}

#[derive(Deserialize)]
struct SetActiveRequest {
    active: bool,
}

/// Activate or deactivate an account.
async fn set_active(
    State(state): State<AdminState>,
    CurrentUser(admin): CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<SetActiveRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if id == admin.id && !payload.active {
        return Err(ApiError::bad_request("Cannot deactivate your own account"));
    }

    let updated = state
        .db
        .accounts()
        .set_active(&id, payload.active)
        .await
        .db_err("Failed to update account")?;

    if !updated {
        return Err(ApiError::not_found("Account not found"));
    }

    tracing::info!(account_id = %id, active = payload.active, by = %admin.id, "Account status changed");

    Ok(StatusCode::NO_CONTENT)
}
