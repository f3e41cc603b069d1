pub mod feature_requests;
pub mod health;
pub mod invitations;
pub mod notifications;
pub mod users;
pub mod workspaces;

use crate::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/users/me", get(users::get_me).post(users::sync_me))
        .route(
            "/feature-requests",
            get(feature_requests::list_feature_requests)
                .post(feature_requests::submit_feature_request),
        )
        .route(
            "/feature-requests/:request_id/vote",
            get(feature_requests::get_user_vote).post(feature_requests::cast_vote),
        )
        .route(
            "/feature-requests/:request_id/recount",
            post(feature_requests::recount_votes),
        )
        .route(
            "/workspaces",
            get(workspaces::list_workspaces).post(workspaces::create_workspace),
        )
        .route(
            "/workspaces/:workspace_id/members",
            get(workspaces::list_members),
        )
        .route(
            "/workspaces/:workspace_id/activity",
            get(workspaces::list_activity),
        )
        .route(
            "/workspaces/:workspace_id/invitations",
            get(invitations::list_invitations).post(invitations::create_invitation),
        )
        .route(
            "/invitations/:invitation_id",
            delete(invitations::cancel_invitation),
        )
        .route(
            "/invitations/token/:token",
            get(invitations::get_invitation_by_token),
        )
        .route(
            "/invitations/token/:token/accept",
            post(invitations::accept_invitation),
        )
        .route(
            "/invitations/token/:token/decline",
            post(invitations::decline_invitation),
        )
        .route("/notifications", get(notifications::list_notifications))
        .route(
            "/notifications/read-all",
            post(notifications::mark_all_read),
        )
        .route(
            "/notifications/:notification_id/read",
            post(notifications::mark_read),
        )
        .with_state(state)
}
