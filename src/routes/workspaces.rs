use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::AppState;
use crate::db::models::api::ApiResponse;
use crate::db::models::workspace::CreateWorkspaceRequest;
use crate::db::run_blocking;
use crate::error::AppResult;
use crate::live::LiveTopic;
use crate::middleware::auth::CurrentUser;
use crate::services::WorkspacesService;
use crate::validation::ValidatedJson;

#[derive(Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<i64>,
}

pub async fn list_workspaces(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> AppResult<impl IntoResponse> {
    let workspaces = run_blocking(&state.db, move |conn| {
        WorkspacesService::list_for_user(conn, user.id)
    })
    .await?;
    Ok(Json(ApiResponse::success(workspaces, "Workspaces retrieved")))
}

pub async fn create_workspace(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateWorkspaceRequest>,
) -> AppResult<impl IntoResponse> {
    let user_id = user.id;
    let workspace = run_blocking(&state.db, move |conn| {
        WorkspacesService::create(conn, user_id, &payload.name)
    })
    .await?;

    state.live.publish(LiveTopic::User(user_id)).await;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(workspace, "Workspace created")),
    ))
}

pub async fn list_members(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(workspace_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let members = run_blocking(&state.db, move |conn| {
        WorkspacesService::members(conn, workspace_id, user.id)
    })
    .await?;
    Ok(Json(ApiResponse::success(members, "Members retrieved")))
}

pub async fn list_activity(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(workspace_id): Path<Uuid>,
    Query(query): Query<ActivityQuery>,
) -> AppResult<impl IntoResponse> {
    let entries = run_blocking(&state.db, move |conn| {
        WorkspacesService::activity(conn, workspace_id, user.id, query.limit)
    })
    .await?;
    Ok(Json(ApiResponse::success(entries, "Activity retrieved")))
}
