use axum::{Json, extract::State, response::IntoResponse};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;
use crate::db::models::api::ApiResponse;
use crate::db::run_blocking;
use crate::error::AppResult;

#[derive(Serialize)]
pub struct HealthStatus {
    pub database: bool,
    pub live_updates: bool,
}

pub async fn health(State(state): State<Arc<AppState>>) -> AppResult<impl IntoResponse> {
    let database = run_blocking(&state.db, |conn| {
        diesel::sql_query("SELECT 1").execute(conn)?;
        Ok(())
    })
    .await
    .is_ok();

    Ok(Json(ApiResponse::success(
        HealthStatus {
            database,
            live_updates: state.live.is_enabled(),
        },
        "OK",
    )))
}
