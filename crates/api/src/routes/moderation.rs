//! Admin moderation routes: the review queue, single and bulk status
//! transitions, and the side-flag toggles.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use newsdesk_core::content::id::ContentId;
use newsdesk_core::content::model::ContentItem;
use newsdesk_core::content::status::ModerationAction;
use newsdesk_core::envelope::ApiEnvelope;
use newsdesk_core::events::types::{ContentFlag, ModerationEvent};
use newsdesk_core::store::ContentAction;
use serde::Deserialize;

use super::{apply_action, parse_id};
use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/moderation/queue", get(queue))
        .route("/v1/moderation/{id}", get(get_any))
        .route("/v1/moderation/{id}/approve", post(approve))
        .route("/v1/moderation/{id}/reject", post(reject))
        .route("/v1/moderation/{id}/return", post(return_to_pending))
        .route("/v1/moderation/{id}/top-news", post(toggle_top_news))
        .route("/v1/moderation/{id}/trending", post(toggle_trending))
        .route("/v1/moderation/bulk/approve", post(bulk_approve))
        .route("/v1/moderation/bulk/reject", post(bulk_reject))
}

#[derive(Debug, Default, Deserialize)]
struct RejectBody {
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BulkBody {
    ids: Vec<String>,
    reason: Option<String>,
}

fn parse_ids(raw: &[String]) -> Result<Vec<ContentId>, ApiError> {
    raw.iter().map(|s| parse_id(s)).collect()
}

/// The review queue: pending items, oldest submission first.
async fn queue(
    auth: AuthUser,
    State(state): State<AppState>,
) -> ApiResult<Json<ApiEnvelope<Vec<ContentItem>>>> {
    auth.require_admin()?;
    let store = state.store().read().await;
    let mut items: Vec<ContentItem> = store.pending().into_iter().cloned().collect();
    items.sort_by(|a, b| a.updated_at.cmp(&b.updated_at));
    Ok(Json(ApiEnvelope::ok(items)))
}

/// Admin fetch: any item, any status.
async fn get_any(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<Json<ApiEnvelope<ContentItem>>> {
    auth.require_admin()?;
    let id = parse_id(&raw)?;
    let store = state.store().read().await;
    let item = store
        .get(id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("content {id}")))?;
    Ok(Json(ApiEnvelope::ok(item)))
}

async fn approve(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<Json<ApiEnvelope<ContentItem>>> {
    auth.require_admin()?;
    super::content::set_status(state, auth, &raw, ModerationAction::Approve).await
}

async fn reject(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(raw): Path<String>,
    Json(body): Json<RejectBody>,
) -> ApiResult<Json<ApiEnvelope<ContentItem>>> {
    auth.require_admin()?;
    super::content::set_status(
        state,
        auth,
        &raw,
        ModerationAction::Reject {
            reason: body.reason,
        },
    )
    .await
}

async fn return_to_pending(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<Json<ApiEnvelope<ContentItem>>> {
    auth.require_admin()?;
    super::content::set_status(state, auth, &raw, ModerationAction::ReturnToPending).await
}

async fn toggle_top_news(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<Json<ApiEnvelope<ContentItem>>> {
    toggle_flag(state, auth, &raw, ContentFlag::TopNews).await
}

async fn toggle_trending(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<Json<ApiEnvelope<ContentItem>>> {
    toggle_flag(state, auth, &raw, ContentFlag::Trending).await
}

async fn toggle_flag(
    state: AppState,
    auth: AuthUser,
    raw: &str,
    flag: ContentFlag,
) -> ApiResult<Json<ApiEnvelope<ContentItem>>> {
    auth.require_admin()?;
    let id = parse_id(raw)?;
    let (_, item) = apply_action(&state, ContentAction::ToggleFlag { id, flag }, auth.actor()).await?;
    let item = item.ok_or_else(|| ApiError::NotFound(format!("content {id}")))?;
    Ok(Json(ApiEnvelope::ok(item)))
}

async fn bulk_approve(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<BulkBody>,
) -> ApiResult<Json<ApiEnvelope<ModerationEvent>>> {
    auth.require_admin()?;
    bulk_set_status(state, auth, body, ModerationAction::Approve).await
}

async fn bulk_reject(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<BulkBody>,
) -> ApiResult<Json<ApiEnvelope<ModerationEvent>>> {
    auth.require_admin()?;
    let action = ModerationAction::Reject {
        reason: body.reason.clone(),
    };
    bulk_set_status(state, auth, body, action).await
}

/// All-or-nothing: the reducer checks the whole batch before touching
/// anything, so a single bad id fails the request with no partial state.
async fn bulk_set_status(
    state: AppState,
    auth: AuthUser,
    body: BulkBody,
    action: ModerationAction,
) -> ApiResult<Json<ApiEnvelope<ModerationEvent>>> {
    let ids = parse_ids(&body.ids)?;
    let (event, _) = apply_action(
        &state,
        ContentAction::BulkSetStatus { ids, action },
        auth.actor(),
    )
    .await?;
    Ok(Json(ApiEnvelope::ok(event)))
}
