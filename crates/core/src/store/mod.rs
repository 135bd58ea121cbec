//! The injected content state container.
//!
//! One `ContentStore` holds the whole collection. All mutation goes
//! through [`ContentStore::apply`], which dispatches to a pure reducer;
//! callers hold the store by reference, never through a global.

pub mod actions;
pub mod reducer;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::content::id::ContentId;
use crate::content::model::ContentItem;
use crate::content::status::{Actor, ModerationStatus};
use crate::events::types::ModerationEvent;

pub use actions::{ContentAction, StoreError};

#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    items: BTreeMap<ContentId, ContentItem>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrate a store from already-fetched items, e.g. a listing response.
    pub fn from_items(items: impl IntoIterator<Item = ContentItem>) -> Self {
        Self {
            items: items.into_iter().map(|item| (item.id, item)).collect(),
        }
    }

    pub fn get(&self, id: ContentId) -> Option<&ContentItem> {
        self.items.get(&id)
    }

    pub fn contains(&self, id: ContentId) -> bool {
        self.items.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items in id order.
    pub fn iter(&self) -> impl Iterator<Item = &ContentItem> {
        self.items.values()
    }

    pub fn by_author(&self, author_id: Uuid) -> Vec<&ContentItem> {
        self.iter()
            .filter(|item| item.owned_by(author_id))
            .collect()
    }

    /// Reader-visible items.
    pub fn live(&self) -> Vec<&ContentItem> {
        self.with_status(ModerationStatus::Approved)
    }

    /// The admin review queue.
    pub fn pending(&self) -> Vec<&ContentItem> {
        self.with_status(ModerationStatus::Pending)
    }

    pub fn with_status(&self, status: ModerationStatus) -> Vec<&ContentItem> {
        self.iter().filter(|item| item.status == status).collect()
    }

    /// Dry-run an action against a scratch copy. `Ok` means the real
    /// `apply` would succeed modulo ids minted at creation time.
    pub fn check(&self, action: &ContentAction, actor: Actor) -> Result<(), StoreError> {
        let mut scratch = self.clone();
        scratch.apply(action.clone(), actor, Utc::now()).map(|_| ())
    }

    /// Run an action through its reducer. On `Err` the collection is
    /// untouched, bulk actions included.
    pub fn apply(
        &mut self,
        action: ContentAction,
        actor: Actor,
        now: DateTime<Utc>,
    ) -> Result<ModerationEvent, StoreError> {
        match action {
            ContentAction::Create { draft, submit } => {
                reducer::create(&mut self.items, draft, submit, actor, now)
            }
            ContentAction::Update { id, patch } => {
                reducer::update(&mut self.items, id, patch, actor, now)
            }
            ContentAction::SetStatus { id, action } => {
                reducer::set_status(&mut self.items, id, action, actor, now)
            }
            ContentAction::BulkSetStatus { ids, action } => {
                reducer::bulk_set_status(&mut self.items, &ids, &action, actor, now)
            }
            ContentAction::ToggleFlag { id, flag } => {
                reducer::toggle_flag(&mut self.items, id, flag, actor, now)
            }
            ContentAction::Delete { id } => reducer::delete(&mut self.items, id, actor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::model::{ContentDraft, ContentKind, ContentPatch};
    use crate::content::status::{ModerationAction, TransitionError};
    use crate::content::validate::ValidationError;
    use crate::events::types::ContentFlag;

    fn draft(title: &str) -> ContentDraft {
        ContentDraft {
            kind: ContentKind::Article,
            title: title.to_string(),
            body: "body".to_string(),
            category: "politics".to_string(),
            region: "eu".to_string(),
            summary: None,
            cover_image: None,
        }
    }

    fn seeded(author: Actor, n: usize) -> (ContentStore, Vec<ContentId>) {
        let mut store = ContentStore::new();
        let mut ids = Vec::new();
        for i in 0..n {
            let event = store
                .apply(
                    ContentAction::Create {
                        draft: draft(&format!("headline {i}")),
                        submit: true,
                    },
                    author,
                    Utc::now(),
                )
                .unwrap();
            ids.push(event.content_id().unwrap());
        }
        (store, ids)
    }

    #[test]
    fn create_draft_starts_in_draft() {
        let author = Actor::author(Uuid::new_v4());
        let mut store = ContentStore::new();
        let event = store
            .apply(
                ContentAction::Create {
                    draft: draft("headline"),
                    submit: false,
                },
                author,
                Utc::now(),
            )
            .unwrap();
        let id = event.content_id().unwrap();
        assert_eq!(store.get(id).unwrap().status, ModerationStatus::Draft);
        assert_eq!(store.get(id).unwrap().author_id, author.id);
    }

    #[test]
    fn create_with_submit_lands_in_pending() {
        let author = Actor::author(Uuid::new_v4());
        let (store, ids) = seeded(author, 1);
        assert_eq!(store.get(ids[0]).unwrap().status, ModerationStatus::Pending);
    }

    #[test]
    fn create_with_empty_title_is_refused_before_any_insert() {
        let author = Actor::author(Uuid::new_v4());
        let mut store = ContentStore::new();
        let err = store
            .apply(
                ContentAction::Create {
                    draft: draft(""),
                    submit: true,
                },
                author,
                Utc::now(),
            )
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::Validation(ValidationError::MissingTitle)
        );
        assert!(store.is_empty());
    }

    #[test]
    fn admins_do_not_author_content() {
        let admin = Actor::admin(Uuid::new_v4());
        let mut store = ContentStore::new();
        let err = store
            .apply(
                ContentAction::Create {
                    draft: draft("headline"),
                    submit: false,
                },
                admin,
                Utc::now(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Transition(TransitionError::Forbidden { .. })
        ));
    }

    #[test]
    fn reject_stores_the_reason_verbatim() {
        let author = Actor::author(Uuid::new_v4());
        let admin = Actor::admin(Uuid::new_v4());
        let (mut store, ids) = seeded(author, 1);

        store
            .apply(
                ContentAction::SetStatus {
                    id: ids[0],
                    action: ModerationAction::Reject {
                        reason: Some("  needs a second source before publication ".to_string()),
                    },
                },
                admin,
                Utc::now(),
            )
            .unwrap();

        let item = store.get(ids[0]).unwrap();
        assert_eq!(item.status, ModerationStatus::Rejected);
        assert_eq!(
            item.rejection_reason.as_deref(),
            Some("  needs a second source before publication ")
        );
    }

    #[test]
    fn reject_without_reason_is_tolerated() {
        let author = Actor::author(Uuid::new_v4());
        let admin = Actor::admin(Uuid::new_v4());
        let (mut store, ids) = seeded(author, 1);

        store
            .apply(
                ContentAction::SetStatus {
                    id: ids[0],
                    action: ModerationAction::Reject { reason: None },
                },
                admin,
                Utc::now(),
            )
            .unwrap();

        let item = store.get(ids[0]).unwrap();
        assert_eq!(item.status, ModerationStatus::Rejected);
        assert_eq!(item.rejection_reason, None);
    }

    #[test]
    fn resubmit_clears_the_stored_reason() {
        let author = Actor::author(Uuid::new_v4());
        let admin = Actor::admin(Uuid::new_v4());
        let (mut store, ids) = seeded(author, 1);

        store
            .apply(
                ContentAction::SetStatus {
                    id: ids[0],
                    action: ModerationAction::Reject {
                        reason: Some("thin".to_string()),
                    },
                },
                admin,
                Utc::now(),
            )
            .unwrap();
        store
            .apply(
                ContentAction::SetStatus {
                    id: ids[0],
                    action: ModerationAction::Resubmit,
                },
                author,
                Utc::now(),
            )
            .unwrap();

        let item = store.get(ids[0]).unwrap();
        assert_eq!(item.status, ModerationStatus::Pending);
        assert_eq!(item.rejection_reason, None);
    }

    #[test]
    fn authors_cannot_touch_items_they_do_not_own() {
        let author = Actor::author(Uuid::new_v4());
        let stranger = Actor::author(Uuid::new_v4());
        let (mut store, ids) = seeded(author, 1);

        let err = store
            .apply(
                ContentAction::Update {
                    id: ids[0],
                    patch: ContentPatch {
                        title: Some("hijacked".to_string()),
                        ..ContentPatch::default()
                    },
                },
                stranger,
                Utc::now(),
            )
            .unwrap_err();
        assert_eq!(err, StoreError::NotOwner);
    }

    #[test]
    fn approved_items_refuse_author_edits_and_deletes() {
        let author = Actor::author(Uuid::new_v4());
        let admin = Actor::admin(Uuid::new_v4());
        let (mut store, ids) = seeded(author, 1);
        store
            .apply(
                ContentAction::SetStatus {
                    id: ids[0],
                    action: ModerationAction::Approve,
                },
                admin,
                Utc::now(),
            )
            .unwrap();

        let edit = store
            .apply(
                ContentAction::Update {
                    id: ids[0],
                    patch: ContentPatch {
                        body: Some("sneaky rewrite".to_string()),
                        ..ContentPatch::default()
                    },
                },
                author,
                Utc::now(),
            )
            .unwrap_err();
        assert!(matches!(
            edit,
            StoreError::Transition(TransitionError::Illegal { .. })
        ));

        let delete = store
            .apply(ContentAction::Delete { id: ids[0] }, author, Utc::now())
            .unwrap_err();
        assert!(matches!(
            delete,
            StoreError::Transition(TransitionError::Illegal { .. })
        ));
        assert!(store.contains(ids[0]));
    }

    #[test]
    fn admin_edits_are_allowed_on_live_items() {
        let author = Actor::author(Uuid::new_v4());
        let admin = Actor::admin(Uuid::new_v4());
        let (mut store, ids) = seeded(author, 1);
        store
            .apply(
                ContentAction::SetStatus {
                    id: ids[0],
                    action: ModerationAction::Approve,
                },
                admin,
                Utc::now(),
            )
            .unwrap();

        store
            .apply(
                ContentAction::Update {
                    id: ids[0],
                    patch: ContentPatch {
                        category: Some("world".to_string()),
                        ..ContentPatch::default()
                    },
                },
                admin,
                Utc::now(),
            )
            .unwrap();
        assert_eq!(store.get(ids[0]).unwrap().category, "world");
    }

    #[test]
    fn bulk_approve_touches_exactly_the_requested_ids() {
        let author = Actor::author(Uuid::new_v4());
        let admin = Actor::admin(Uuid::new_v4());
        let (mut store, ids) = seeded(author, 5);

        let batch = vec![ids[0], ids[1], ids[2]];
        let event = store
            .apply(
                ContentAction::BulkSetStatus {
                    ids: batch.clone(),
                    action: ModerationAction::Approve,
                },
                admin,
                Utc::now(),
            )
            .unwrap();
        assert_eq!(
            event,
            ModerationEvent::BulkStatusChanged {
                ids: batch,
                to: ModerationStatus::Approved,
            }
        );

        for id in &ids[..3] {
            assert_eq!(store.get(*id).unwrap().status, ModerationStatus::Approved);
        }
        for id in &ids[3..] {
            assert_eq!(store.get(*id).unwrap().status, ModerationStatus::Pending);
        }
    }

    #[test]
    fn bulk_with_one_bad_id_changes_nothing() {
        let author = Actor::author(Uuid::new_v4());
        let admin = Actor::admin(Uuid::new_v4());
        let (mut store, ids) = seeded(author, 3);
        let missing = ContentId::generate(ContentKind::Article);

        let err = store
            .apply(
                ContentAction::BulkSetStatus {
                    ids: vec![ids[0], missing, ids[2]],
                    action: ModerationAction::Approve,
                },
                admin,
                Utc::now(),
            )
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound(missing));

        for id in &ids {
            assert_eq!(store.get(*id).unwrap().status, ModerationStatus::Pending);
        }
    }

    #[test]
    fn bulk_with_an_illegal_transition_changes_nothing() {
        let author = Actor::author(Uuid::new_v4());
        let admin = Actor::admin(Uuid::new_v4());
        let (mut store, ids) = seeded(author, 3);
        // ids[1] is already approved; approving it again is illegal.
        store
            .apply(
                ContentAction::SetStatus {
                    id: ids[1],
                    action: ModerationAction::Approve,
                },
                admin,
                Utc::now(),
            )
            .unwrap();

        let err = store
            .apply(
                ContentAction::BulkSetStatus {
                    ids: ids.clone(),
                    action: ModerationAction::Approve,
                },
                admin,
                Utc::now(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Transition(TransitionError::Illegal { .. })
        ));
        assert_eq!(store.get(ids[0]).unwrap().status, ModerationStatus::Pending);
        assert_eq!(store.get(ids[2]).unwrap().status, ModerationStatus::Pending);
    }

    #[test]
    fn empty_bulk_is_refused() {
        let admin = Actor::admin(Uuid::new_v4());
        let mut store = ContentStore::new();
        let err = store
            .apply(
                ContentAction::BulkSetStatus {
                    ids: Vec::new(),
                    action: ModerationAction::Approve,
                },
                admin,
                Utc::now(),
            )
            .unwrap_err();
        assert_eq!(err, StoreError::EmptyBulk);
    }

    #[test]
    fn double_toggle_restores_the_flag_and_never_touches_status() {
        let author = Actor::author(Uuid::new_v4());
        let admin = Actor::admin(Uuid::new_v4());
        let (mut store, ids) = seeded(author, 1);

        for _ in 0..2 {
            store
                .apply(
                    ContentAction::ToggleFlag {
                        id: ids[0],
                        flag: ContentFlag::TopNews,
                    },
                    admin,
                    Utc::now(),
                )
                .unwrap();
        }
        let item = store.get(ids[0]).unwrap();
        assert!(!item.top_news);
        assert_eq!(item.status, ModerationStatus::Pending);
    }

    #[test]
    fn authors_cannot_toggle_flags() {
        let author = Actor::author(Uuid::new_v4());
        let (mut store, ids) = seeded(author, 1);
        let err = store
            .apply(
                ContentAction::ToggleFlag {
                    id: ids[0],
                    flag: ContentFlag::Trending,
                },
                author,
                Utc::now(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Transition(TransitionError::Forbidden { .. })
        ));
    }

    #[test]
    fn delete_removes_the_item_from_listings() {
        let author = Actor::author(Uuid::new_v4());
        let (mut store, ids) = seeded(author, 2);

        store
            .apply(ContentAction::Delete { id: ids[0] }, author, Utc::now())
            .unwrap();
        assert!(!store.contains(ids[0]));
        assert_eq!(store.len(), 1);
        assert!(store.by_author(author.id).iter().all(|i| i.id != ids[0]));
    }

    #[test]
    fn updated_at_moves_on_every_mutation() {
        let author = Actor::author(Uuid::new_v4());
        let admin = Actor::admin(Uuid::new_v4());
        let (mut store, ids) = seeded(author, 1);
        let before = store.get(ids[0]).unwrap().updated_at;

        let later = before + chrono::Duration::seconds(5);
        store
            .apply(
                ContentAction::SetStatus {
                    id: ids[0],
                    action: ModerationAction::Approve,
                },
                admin,
                later,
            )
            .unwrap();
        let item = store.get(ids[0]).unwrap();
        assert_eq!(item.updated_at, later);
        assert_eq!(item.created_at, before);
    }

    #[test]
    fn check_is_side_effect_free() {
        let author = Actor::author(Uuid::new_v4());
        let admin = Actor::admin(Uuid::new_v4());
        let (store, ids) = seeded(author, 1);

        store
            .check(
                &ContentAction::SetStatus {
                    id: ids[0],
                    action: ModerationAction::Approve,
                },
                admin,
            )
            .unwrap();
        assert_eq!(store.get(ids[0]).unwrap().status, ModerationStatus::Pending);
    }
}
