use axum::{Json, extract::State, response::IntoResponse};
use std::sync::Arc;

use crate::AppState;
use crate::db::models::api::ApiResponse;
use crate::db::run_blocking;
use crate::error::AppResult;
use crate::middleware::auth::{CurrentUser, Identity};
use crate::services::UsersService;

pub async fn get_me(CurrentUser(user): CurrentUser) -> AppResult<impl IntoResponse> {
    Ok(Json(ApiResponse::success(user, "User retrieved")))
}

/// Mirrors the token's profile into the local users table.
pub async fn sync_me(
    State(state): State<Arc<AppState>>,
    Identity(claims): Identity,
) -> AppResult<impl IntoResponse> {
    let profile = claims.profile();
    let user = run_blocking(&state.db, move |conn| UsersService::sync(conn, &profile)).await?;
    Ok(Json(ApiResponse::success(user, "User synced")))
}
