pub mod auth;
pub mod content;
pub mod health;
pub mod moderation;

use axum::Router;
use chrono::Utc;
use newsdesk_core::content::id::ContentId;
use newsdesk_core::content::model::ContentItem;
use newsdesk_core::content::status::Actor;
use newsdesk_core::events::types::ModerationEvent;
use newsdesk_core::store::ContentAction;

use crate::error::ApiError;
use crate::state::AppState;

/// Assemble the full router with all route groups.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(content::routes())
        .merge(moderation::routes())
        .with_state(state)
}

/// Run one action under a single write-lock acquisition, publish the
/// resulting event, and hand back the touched item where there is one.
pub(crate) async fn apply_action(
    state: &AppState,
    action: ContentAction,
    actor: Actor,
) -> Result<(ModerationEvent, Option<ContentItem>), ApiError> {
    let mut store = state.store().write().await;
    let event = store.apply(action, actor, Utc::now())?;
    let item = event.content_id().and_then(|id| store.get(id).cloned());
    drop(store);

    // No subscribers is fine; the bus reports it and we move on.
    let _ = state.event_bus().publish(event.clone());
    Ok((event, item))
}

pub(crate) fn parse_id(raw: &str) -> Result<ContentId, ApiError> {
    raw.parse()
        .map_err(|err: newsdesk_core::content::id::ContentIdError| {
            ApiError::BadRequest(err.to_string())
        })
}
