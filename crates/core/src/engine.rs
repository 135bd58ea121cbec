//! Client-side moderation engine.
//!
//! Composes the three steps every dashboard action goes through:
//! local validation, a commit at the collaborator boundary, and only then
//! the local store mutation. A request that fails validation never
//! reaches the wire; a request that fails at the boundary leaves the
//! store exactly as it was.

use std::fmt;
use std::future::Future;

use chrono::Utc;

use crate::content::id::ContentId;
use crate::content::model::{ContentDraft, ContentPatch};
use crate::content::status::{Actor, ModerationAction};
use crate::envelope::EnvelopeError;
use crate::events::types::{ContentFlag, ModerationEvent};
use crate::store::{ContentAction, ContentStore, StoreError};

/// The collaborator boundary: typically the Newsdesk REST API, a mock in
/// tests. `Ok` means the change is durable on the other side.
pub trait StatusBackend {
    fn commit(
        &self,
        action: &ContentAction,
        actor: Actor,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("network error: {0}")]
    Network(String),
    #[error("rejected by the api: {0}")]
    Rejected(String),
}

impl From<EnvelopeError> for BackendError {
    fn from(err: EnvelopeError) -> Self {
        BackendError::Rejected(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Explicit lifecycle of one request, instead of scattered boolean flags.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<T> {
    Loading,
    Ok(T),
    Err(String),
}

impl<T> RequestState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub fn is_err(&self) -> bool {
        matches!(self, Self::Err(_))
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Self::Ok(value) => Some(value),
            _ => None,
        }
    }

    pub fn err(&self) -> Option<&str> {
        match self {
            Self::Err(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn from_result<E: fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(err) => Self::Err(err.to_string()),
        }
    }
}

/// Owns a local [`ContentStore`] mirror and a backend. All operations
/// funnel through [`ModerationEngine::dispatch`].
#[derive(Debug)]
pub struct ModerationEngine<B> {
    store: ContentStore,
    backend: B,
    last_request: Option<RequestState<ModerationEvent>>,
}

impl<B: StatusBackend> ModerationEngine<B> {
    pub fn new(backend: B) -> Self {
        Self::with_store(ContentStore::new(), backend)
    }

    /// Start from an already-hydrated store, e.g. after fetching a listing.
    pub fn with_store(store: ContentStore, backend: B) -> Self {
        Self {
            store,
            backend,
            last_request: None,
        }
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    /// State of the most recent request, `None` before the first one.
    pub fn last_request(&self) -> Option<&RequestState<ModerationEvent>> {
        self.last_request.as_ref()
    }

    /// Validate locally, commit at the boundary, then mutate the store.
    pub async fn dispatch(
        &mut self,
        action: ContentAction,
        actor: Actor,
    ) -> Result<ModerationEvent, EngineError> {
        if let Err(err) = self.store.check(&action, actor) {
            self.last_request = Some(RequestState::Err(err.to_string()));
            return Err(err.into());
        }

        self.last_request = Some(RequestState::Loading);
        if let Err(err) = self.backend.commit(&action, actor).await {
            tracing::warn!(action = action.name(), error = %err, "backend refused moderation action");
            self.last_request = Some(RequestState::Err(err.to_string()));
            return Err(err.into());
        }

        match self.store.apply(action, actor, Utc::now()) {
            Ok(event) => {
                self.last_request = Some(RequestState::Ok(event.clone()));
                Ok(event)
            }
            Err(err) => {
                self.last_request = Some(RequestState::Err(err.to_string()));
                Err(err.into())
            }
        }
    }

    pub async fn create(
        &mut self,
        draft: ContentDraft,
        submit: bool,
        actor: Actor,
    ) -> Result<ModerationEvent, EngineError> {
        self.dispatch(ContentAction::Create { draft, submit }, actor)
            .await
    }

    pub async fn edit(
        &mut self,
        id: ContentId,
        patch: ContentPatch,
        actor: Actor,
    ) -> Result<ModerationEvent, EngineError> {
        self.dispatch(ContentAction::Update { id, patch }, actor)
            .await
    }

    pub async fn submit_for_review(
        &mut self,
        id: ContentId,
        actor: Actor,
    ) -> Result<ModerationEvent, EngineError> {
        self.set_status(id, ModerationAction::Submit, actor).await
    }

    pub async fn resubmit(
        &mut self,
        id: ContentId,
        actor: Actor,
    ) -> Result<ModerationEvent, EngineError> {
        self.set_status(id, ModerationAction::Resubmit, actor).await
    }

    pub async fn approve(
        &mut self,
        id: ContentId,
        actor: Actor,
    ) -> Result<ModerationEvent, EngineError> {
        self.set_status(id, ModerationAction::Approve, actor).await
    }

    pub async fn reject(
        &mut self,
        id: ContentId,
        reason: Option<String>,
        actor: Actor,
    ) -> Result<ModerationEvent, EngineError> {
        self.set_status(id, ModerationAction::Reject { reason }, actor)
            .await
    }

    pub async fn return_to_pending(
        &mut self,
        id: ContentId,
        actor: Actor,
    ) -> Result<ModerationEvent, EngineError> {
        self.set_status(id, ModerationAction::ReturnToPending, actor)
            .await
    }

    pub async fn bulk_approve(
        &mut self,
        ids: Vec<ContentId>,
        actor: Actor,
    ) -> Result<ModerationEvent, EngineError> {
        self.dispatch(
            ContentAction::BulkSetStatus {
                ids,
                action: ModerationAction::Approve,
            },
            actor,
        )
        .await
    }

    pub async fn bulk_reject(
        &mut self,
        ids: Vec<ContentId>,
        reason: Option<String>,
        actor: Actor,
    ) -> Result<ModerationEvent, EngineError> {
        self.dispatch(
            ContentAction::BulkSetStatus {
                ids,
                action: ModerationAction::Reject { reason },
            },
            actor,
        )
        .await
    }

    pub async fn toggle_top_news(
        &mut self,
        id: ContentId,
        actor: Actor,
    ) -> Result<ModerationEvent, EngineError> {
        self.dispatch(
            ContentAction::ToggleFlag {
                id,
                flag: ContentFlag::TopNews,
            },
            actor,
        )
        .await
    }

    pub async fn toggle_trending(
        &mut self,
        id: ContentId,
        actor: Actor,
    ) -> Result<ModerationEvent, EngineError> {
        self.dispatch(
            ContentAction::ToggleFlag {
                id,
                flag: ContentFlag::Trending,
            },
            actor,
        )
        .await
    }

    pub async fn delete(
        &mut self,
        id: ContentId,
        actor: Actor,
    ) -> Result<ModerationEvent, EngineError> {
        self.dispatch(ContentAction::Delete { id }, actor).await
    }

    async fn set_status(
        &mut self,
        id: ContentId,
        action: ModerationAction,
        actor: Actor,
    ) -> Result<ModerationEvent, EngineError> {
        self.dispatch(ContentAction::SetStatus { id, action }, actor)
            .await
    }
}
