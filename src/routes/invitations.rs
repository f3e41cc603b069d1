use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::AppState;
use crate::db::models::api::ApiResponse;
use crate::db::models::invitation::InvitationStatus;
use crate::db::models::workspace_member::WorkspaceRole;
use crate::db::run_blocking;
use crate::error::{AppError, AppResult};
use crate::live::LiveTopic;
use crate::middleware::auth::CurrentUser;
use crate::services::InvitationsService;
use crate::services::context::RequestContext;
use crate::validation::ValidatedJson;

fn default_role() -> WorkspaceRole {
    WorkspaceRole::Member
}

#[derive(Deserialize, Validate)]
pub struct CreateInvitationRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[serde(default = "default_role")]
    pub role: WorkspaceRole,
}

#[derive(Deserialize)]
pub struct InvitationQuery {
    pub status: Option<InvitationStatus>,
}

/// Requires owner or admin in the target workspace.
pub async fn create_invitation(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(workspace_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<CreateInvitationRequest>,
) -> AppResult<impl IntoResponse> {
    let ctx = RequestContext {
        user_id: user.id,
        workspace_id,
    };
    let ttl = state.config.invitation_ttl();

    let created = run_blocking(&state.db, move |conn| {
        InvitationsService::create(conn, &ctx, &payload.email, payload.role, ttl, Utc::now())
    })
    .await?;

    state.live.publish(LiveTopic::Workspace(workspace_id)).await;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(created, "Invitation created")),
    ))
}

pub async fn list_invitations(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(workspace_id): Path<Uuid>,
    Query(query): Query<InvitationQuery>,
) -> AppResult<impl IntoResponse> {
    let ctx = RequestContext {
        user_id: user.id,
        workspace_id,
    };
    let invitations = run_blocking(&state.db, move |conn| {
        InvitationsService::list_for_workspace(conn, &ctx, query.status, Utc::now())
    })
    .await?;
    Ok(Json(ApiResponse::success(invitations, "Invitations retrieved")))
}

pub async fn get_invitation_by_token(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> AppResult<impl IntoResponse> {
    let lookup = run_blocking(&state.db, move |conn| {
        InvitationsService::get_by_token(conn, &token, Utc::now())
    })
    .await?
    .ok_or_else(|| AppError::not_found("invitation"))?;
    Ok(Json(ApiResponse::success(lookup, "Invitation retrieved")))
}

pub async fn accept_invitation(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(token): Path<String>,
) -> AppResult<impl IntoResponse> {
    let user_id = user.id;
    let workspace_id = run_blocking(&state.db, move |conn| {
        InvitationsService::accept(conn, &token, user_id, Utc::now())
    })
    .await?;

    state
        .live
        .publish_all(&[LiveTopic::Workspace(workspace_id), LiveTopic::User(user_id)])
        .await;
    Ok(Json(ApiResponse::success(
        serde_json::json!({ "workspace_id": workspace_id }),
        "Invitation accepted",
    )))
}

/// The token itself authorises declining; no login needed.
pub async fn decline_invitation(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> AppResult<impl IntoResponse> {
    let workspace_id =
        run_blocking(&state.db, move |conn| InvitationsService::decline(conn, &token)).await?;

    state.live.publish(LiveTopic::Workspace(workspace_id)).await;
    Ok(Json(ApiResponse::<()>::ok("Invitation declined")))
}

pub async fn cancel_invitation(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(invitation_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let workspace_id = run_blocking(&state.db, move |conn| {
        InvitationsService::cancel(conn, invitation_id, user.id)
    })
    .await?;

    state.live.publish(LiveTopic::Workspace(workspace_id)).await;
    Ok(Json(ApiResponse::<()>::ok("Invitation cancelled")))
}
