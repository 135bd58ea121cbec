use thiserror::Error;

use crate::content::id::ContentId;
use crate::content::model::{ContentDraft, ContentPatch};
use crate::content::status::{ModerationAction, TransitionError};
use crate::content::validate::ValidationError;
use crate::events::types::ContentFlag;

/// Everything that can change the content collection. One reducer per
/// variant; handlers and the moderation engine both speak this type.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentAction {
    /// Author creates an item, as a draft or straight into the queue.
    Create { draft: ContentDraft, submit: bool },
    /// Partial edit of an existing item.
    Update { id: ContentId, patch: ContentPatch },
    /// Single status transition.
    SetStatus {
        id: ContentId,
        action: ModerationAction,
    },
    /// The same transition applied to a batch, all-or-nothing.
    BulkSetStatus {
        ids: Vec<ContentId>,
        action: ModerationAction,
    },
    /// Flip a side flag without touching status.
    ToggleFlag { id: ContentId, flag: ContentFlag },
    /// Remove the item from the collection.
    Delete { id: ContentId },
}

impl ContentAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::SetStatus { action, .. } | Self::BulkSetStatus { action, .. } => action.name(),
            Self::ToggleFlag { .. } => "toggleFlag",
            Self::Delete { .. } => "delete",
        }
    }
}

/// Why a reducer refused an action. The map is untouched whenever one of
/// these comes back, bulk actions included.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("content {0} not found")]
    NotFound(ContentId),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("only the item's author may do that")]
    NotOwner,
    #[error("bulk request contains no ids")]
    EmptyBulk,
}
