use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::AppState;
use crate::db::models::api::ApiResponse;
use crate::db::run_blocking;
use crate::error::AppResult;
use crate::live::LiveTopic;
use crate::middleware::auth::CurrentUser;
use crate::services::NotificationsService;

#[derive(Deserialize)]
pub struct NotificationQuery {
    #[serde(default)]
    pub unread_only: bool,
}

pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<NotificationQuery>,
) -> AppResult<impl IntoResponse> {
    let notifications = run_blocking(&state.db, move |conn| {
        NotificationsService::list(conn, user.id, query.unread_only)
    })
    .await?;
    Ok(Json(ApiResponse::success(notifications, "Notifications retrieved")))
}

pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(notification_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let user_id = user.id;
    run_blocking(&state.db, move |conn| {
        NotificationsService::mark_read(conn, notification_id, user_id)
    })
    .await?;

    state.live.publish(LiveTopic::User(user_id)).await;
    Ok(Json(ApiResponse::<()>::ok("Notification marked as read")))
}

pub async fn mark_all_read(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> AppResult<impl IntoResponse> {
    let user_id = user.id;
    let updated = run_blocking(&state.db, move |conn| {
        NotificationsService::mark_all_read(conn, user_id)
    })
    .await?;

    state.live.publish(LiveTopic::User(user_id)).await;
    Ok(Json(ApiResponse::success(
        serde_json::json!({ "updated": updated }),
        "All notifications marked as read",
    )))
}
