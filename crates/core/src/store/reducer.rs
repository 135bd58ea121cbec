//! Pure reducers over the content map. Each function checks everything it
//! needs before the first mutation, so an `Err` always means the map is
//! exactly as it was.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::content::id::ContentId;
use crate::content::model::{ContentDraft, ContentItem, ContentPatch};
use crate::content::status::{Actor, ModerationAction, Role, TransitionError};
use crate::content::validate::validate_submission;
use crate::events::types::{ContentFlag, ModerationEvent};

use super::actions::StoreError;

type ContentMap = BTreeMap<ContentId, ContentItem>;

fn check_ownership(item: &ContentItem, actor: Actor) -> Result<(), StoreError> {
    if actor.role == Role::Author && !item.owned_by(actor.id) {
        return Err(StoreError::NotOwner);
    }
    Ok(())
}

pub fn create(
    items: &mut ContentMap,
    draft: ContentDraft,
    submit: bool,
    actor: Actor,
    now: DateTime<Utc>,
) -> Result<ModerationEvent, StoreError> {
    if actor.role != Role::Author {
        return Err(TransitionError::Forbidden {
            role: actor.role,
            action: "create",
        }
        .into());
    }
    let mut item = ContentItem::from_draft(actor.id, draft, now);
    if submit {
        validate_submission(&item)?;
        item.status = item.status.transition(&ModerationAction::Submit, actor.role)?;
    }
    let event = ModerationEvent::Created {
        id: item.id,
        kind: item.kind,
        status: item.status,
    };
    items.insert(item.id, item);
    Ok(event)
}

pub fn update(
    items: &mut ContentMap,
    id: ContentId,
    patch: ContentPatch,
    actor: Actor,
    now: DateTime<Utc>,
) -> Result<ModerationEvent, StoreError> {
    let item = items.get_mut(&id).ok_or(StoreError::NotFound(id))?;
    if actor.role == Role::Author {
        check_ownership(item, actor)?;
        item.status.check_author_edit()?;
    }
    item.apply_patch(patch);
    item.updated_at = now;
    Ok(ModerationEvent::Updated { id })
}

pub fn set_status(
    items: &mut ContentMap,
    id: ContentId,
    action: ModerationAction,
    actor: Actor,
    now: DateTime<Utc>,
) -> Result<ModerationEvent, StoreError> {
    let item = items.get_mut(&id).ok_or(StoreError::NotFound(id))?;
    check_ownership(item, actor)?;
    let from = item.status;
    let to = from.transition(&action, actor.role)?;
    if action.requires_valid_submission() {
        validate_submission(item)?;
    }

    // Commit point: nothing below can fail.
    item.status = to;
    let reason = match action {
        ModerationAction::Reject { reason } => {
            item.rejection_reason = reason.clone();
            reason
        }
        ModerationAction::Resubmit => {
            item.rejection_reason = None;
            None
        }
        _ => None,
    };
    item.updated_at = now;
    Ok(ModerationEvent::StatusChanged {
        id,
        from,
        to,
        reason,
    })
}

pub fn bulk_set_status(
    items: &mut ContentMap,
    ids: &[ContentId],
    action: &ModerationAction,
    actor: Actor,
    now: DateTime<Utc>,
) -> Result<ModerationEvent, StoreError> {
    if ids.is_empty() {
        return Err(StoreError::EmptyBulk);
    }

    // Phase one: check every id against the untouched map.
    let mut staged = Vec::with_capacity(ids.len());
    for id in ids {
        let item = items.get(id).ok_or(StoreError::NotFound(*id))?;
        check_ownership(item, actor)?;
        let to = item.status.transition(action, actor.role)?;
        if action.requires_valid_submission() {
            validate_submission(item)?;
        }
        staged.push((*id, to));
    }

    // The action determines one target status for the whole batch.
    let to = staged.first().map(|(_, s)| *s).ok_or(StoreError::EmptyBulk)?;

    // Phase two: apply. Every staged entry was verified to exist above.
    for (id, next) in staged {
        if let Some(item) = items.get_mut(&id) {
            item.status = next;
            if let ModerationAction::Reject { reason } = action {
                item.rejection_reason = reason.clone();
            }
            item.updated_at = now;
        }
    }
    Ok(ModerationEvent::BulkStatusChanged {
        ids: ids.to_vec(),
        to,
    })
}

pub fn toggle_flag(
    items: &mut ContentMap,
    id: ContentId,
    flag: ContentFlag,
    actor: Actor,
    now: DateTime<Utc>,
) -> Result<ModerationEvent, StoreError> {
    if !actor.is_admin() {
        return Err(TransitionError::Forbidden {
            role: actor.role,
            action: "toggleFlag",
        }
        .into());
    }
    let item = items.get_mut(&id).ok_or(StoreError::NotFound(id))?;
    let value = match flag {
        ContentFlag::TopNews => {
            item.top_news = !item.top_news;
            item.top_news
        }
        ContentFlag::Trending => {
            item.trending = !item.trending;
            item.trending
        }
    };
    item.updated_at = now;
    Ok(ModerationEvent::FlagToggled { id, flag, value })
}

pub fn delete(
    items: &mut ContentMap,
    id: ContentId,
    actor: Actor,
) -> Result<ModerationEvent, StoreError> {
    let item = items.get(&id).ok_or(StoreError::NotFound(id))?;
    check_ownership(item, actor)?;
    item.status.check_delete()?;
    items.remove(&id);
    Ok(ModerationEvent::Deleted { id })
}
