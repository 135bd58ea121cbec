//! Reader and author routes: public listings plus the author's own
//! create/edit/submit surface.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use newsdesk_core::content::model::{ContentDraft, ContentItem, ContentKind, ContentPatch};
use newsdesk_core::content::status::ModerationAction;
use newsdesk_core::envelope::ApiEnvelope;
use newsdesk_core::store::ContentAction;
use serde::Deserialize;
use serde_json::json;

use super::{apply_action, parse_id};
use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/content", get(list_content).post(create_content))
        .route("/v1/content/mine", get(my_content))
        .route(
            "/v1/content/{id}",
            get(get_content).put(update_content).delete(delete_content),
        )
        .route("/v1/content/{id}/submit", axum::routing::post(submit_content))
        .route(
            "/v1/content/{id}/resubmit",
            axum::routing::post(resubmit_content),
        )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListParams {
    kind: Option<ContentKind>,
    top_news: Option<bool>,
    trending: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct CreateBody {
    #[serde(flatten)]
    draft: ContentDraft,
    #[serde(default)]
    submit: bool,
}

/// Reader listing: live items only, newest first. The flag filters
/// compose with the live filter, so `topNews=true` means live AND flagged.
async fn list_content(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Json<ApiEnvelope<Vec<ContentItem>>> {
    let store = state.store().read().await;
    let mut items: Vec<ContentItem> = store
        .live()
        .into_iter()
        .filter(|item| params.kind.map_or(true, |k| item.kind == k))
        .filter(|item| !params.top_news.unwrap_or(false) || item.top_news)
        .filter(|item| !params.trending.unwrap_or(false) || item.trending)
        .cloned()
        .collect();
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Json(ApiEnvelope::ok(items))
}

/// Readers only ever see live content; everything else is a 404 here.
async fn get_content(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<Json<ApiEnvelope<ContentItem>>> {
    let id = parse_id(&raw)?;
    let store = state.store().read().await;
    let item = store
        .get(id)
        .filter(|item| item.is_live())
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("content {id}")))?;
    Ok(Json(ApiEnvelope::ok(item)))
}

/// The author dashboard listing: everything the caller owns, any status.
async fn my_content(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Json<ApiEnvelope<Vec<ContentItem>>> {
    let store = state.store().read().await;
    let mut items: Vec<ContentItem> = store.by_author(auth.id).into_iter().cloned().collect();
    items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    Json(ApiEnvelope::ok(items))
}

async fn create_content(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<CreateBody>,
) -> ApiResult<(StatusCode, Json<ApiEnvelope<ContentItem>>)> {
    let (_, item) = apply_action(
        &state,
        ContentAction::Create {
            draft: body.draft,
            submit: body.submit,
        },
        auth.actor(),
    )
    .await?;
    let item = item.ok_or_else(|| ApiError::Internal("created item vanished".to_string()))?;
    tracing::info!(id = %item.id, status = %item.status, "content created");
    Ok((StatusCode::CREATED, Json(ApiEnvelope::ok(item))))
}

async fn update_content(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(raw): Path<String>,
    Json(patch): Json<ContentPatch>,
) -> ApiResult<Json<ApiEnvelope<ContentItem>>> {
    let id = parse_id(&raw)?;
    let (_, item) = apply_action(&state, ContentAction::Update { id, patch }, auth.actor()).await?;
    let item = item.ok_or_else(|| ApiError::NotFound(format!("content {id}")))?;
    Ok(Json(ApiEnvelope::ok(item)))
}

async fn delete_content(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<Json<ApiEnvelope<serde_json::Value>>> {
    let id = parse_id(&raw)?;
    apply_action(&state, ContentAction::Delete { id }, auth.actor()).await?;
    Ok(Json(ApiEnvelope::ok_with_message(
        json!({ "id": id }),
        "content deleted",
    )))
}

async fn submit_content(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<Json<ApiEnvelope<ContentItem>>> {
    set_status(state, auth, &raw, ModerationAction::Submit).await
}

async fn resubmit_content(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<Json<ApiEnvelope<ContentItem>>> {
    set_status(state, auth, &raw, ModerationAction::Resubmit).await
}

pub(crate) async fn set_status(
    state: AppState,
    auth: AuthUser,
    raw: &str,
    action: ModerationAction,
) -> ApiResult<Json<ApiEnvelope<ContentItem>>> {
    let id = parse_id(raw)?;
    let (_, item) = apply_action(&state, ContentAction::SetStatus { id, action }, auth.actor()).await?;
    let item = item.ok_or_else(|| ApiError::NotFound(format!("content {id}")))?;
    Ok(Json(ApiEnvelope::ok(item)))
}
