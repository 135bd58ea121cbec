use serde::{Deserialize, Serialize};

use crate::content::id::ContentId;
use crate::content::model::ContentKind;
use crate::content::status::ModerationStatus;

/// The two admin-settable side flags, orthogonal to status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentFlag {
    TopNews,
    Trending,
}

/// Events emitted after successful store mutations, consumed by dashboard
/// listeners and tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ModerationEvent {
    Created {
        id: ContentId,
        kind: ContentKind,
        status: ModerationStatus,
    },
    Updated {
        id: ContentId,
    },
    StatusChanged {
        id: ContentId,
        from: ModerationStatus,
        to: ModerationStatus,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    BulkStatusChanged {
        ids: Vec<ContentId>,
        to: ModerationStatus,
    },
    FlagToggled {
        id: ContentId,
        flag: ContentFlag,
        value: bool,
    },
    Deleted {
        id: ContentId,
    },
}

impl ModerationEvent {
    /// The primary id the event concerns, when there is exactly one.
    pub fn content_id(&self) -> Option<ContentId> {
        match self {
            Self::Created { id, .. }
            | Self::Updated { id }
            | Self::StatusChanged { id, .. }
            | Self::FlagToggled { id, .. }
            | Self::Deleted { id } => Some(*id),
            Self::BulkStatusChanged { .. } => None,
        }
    }
}
