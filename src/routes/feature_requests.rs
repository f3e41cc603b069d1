use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::AppState;
use crate::db::enums::{FeatureRequestStatus, VoteType};
use crate::db::models::api::ApiResponse;
use crate::db::run_blocking;
use crate::error::AppResult;
use crate::live::LiveTopic;
use crate::middleware::auth::{CurrentUser, MaybeUser};
use crate::services::FeatureRequestsService;
use crate::validation::{ValidatedJson, rules::not_blank};

#[derive(Deserialize, Validate)]
pub struct SubmitFeatureRequest {
    #[validate(
        length(min = 1, max = 200, message = "Title must be 1-200 characters"),
        custom(function = "not_blank", message = "Title cannot be blank")
    )]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: String,
    #[validate(length(min = 1, max = 50, message = "Category must be 1-50 characters"))]
    pub category: String,
}

#[derive(Deserialize, Validate)]
pub struct CastVoteRequest {
    pub vote_type: VoteType,
}

#[derive(Deserialize)]
pub struct FeatureRequestQuery {
    pub status: Option<FeatureRequestStatus>,
}

#[derive(Serialize)]
pub struct UserVoteResponse {
    pub vote_type: Option<VoteType>,
}

pub async fn list_feature_requests(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FeatureRequestQuery>,
) -> AppResult<impl IntoResponse> {
    let requests = run_blocking(&state.db, move |conn| {
        FeatureRequestsService::list_by_status(conn, query.status)
    })
    .await?;
    Ok(Json(ApiResponse::success(requests, "Feature requests retrieved")))
}

pub async fn submit_feature_request(
    State(state): State<Arc<AppState>>,
    MaybeUser(user): MaybeUser,
    ValidatedJson(payload): ValidatedJson<SubmitFeatureRequest>,
) -> AppResult<impl IntoResponse> {
    let creator_id = user.map(|u| u.id);
    let request = run_blocking(&state.db, move |conn| {
        FeatureRequestsService::submit(
            conn,
            creator_id,
            &payload.title,
            &payload.description,
            &payload.category,
        )
    })
    .await?;

    state.live.publish(LiveTopic::FeatureRequests).await;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(request, "Feature request submitted")),
    ))
}

pub async fn get_user_vote(
    State(state): State<Arc<AppState>>,
    MaybeUser(user): MaybeUser,
    Path(request_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let user_id = user.map(|u| u.id);
    let vote_type = run_blocking(&state.db, move |conn| {
        FeatureRequestsService::get_user_vote(conn, request_id, user_id)
    })
    .await?;
    Ok(Json(ApiResponse::success(
        UserVoteResponse { vote_type },
        "Vote retrieved",
    )))
}

pub async fn cast_vote(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(request_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<CastVoteRequest>,
) -> AppResult<impl IntoResponse> {
    run_blocking(&state.db, move |conn| {
        FeatureRequestsService::cast_vote(conn, request_id, user.id, payload.vote_type)
    })
    .await?;

    state.live.publish(LiveTopic::FeatureRequests).await;
    Ok(Json(ApiResponse::<()>::ok("Vote recorded")))
}

pub async fn recount_votes(
    State(state): State<Arc<AppState>>,
    CurrentUser(_user): CurrentUser,
    Path(request_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let tally = run_blocking(&state.db, move |conn| {
        FeatureRequestsService::recount(conn, request_id)
    })
    .await?;

    state.live.publish(LiveTopic::FeatureRequests).await;
    Ok(Json(ApiResponse::success(tally, "Vote counters recounted")))
}
