//! The moderation status lifecycle shared by articles and web stories.
//!
//! Transitions are encoded as one pure function over
//! `(status, action, role)` so every caller, from single ops to bulk ops
//! to the HTTP layer, goes through the same table.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who is asking. Authors own content; admins moderate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Author,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Author => write!(f, "author"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// An authenticated principal acting on the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn author(id: Uuid) -> Self {
        Self {
            id,
            role: Role::Author,
        }
    }

    pub fn admin(id: Uuid) -> Self {
        Self {
            id,
            role: Role::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Lifecycle state of a content item. `Approved` is the live state;
/// web stories surface it to readers as "published".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
}

impl ModerationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status-changing request. The reject reason travels with the action so
/// it can be stored verbatim on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ModerationAction {
    /// Author sends a draft to the review queue.
    Submit,
    /// Admin takes a pending item live.
    Approve,
    /// Admin turns an item down, optionally saying why.
    Reject { reason: Option<String> },
    /// Author sends a rejected item back to the queue.
    Resubmit,
    /// Admin pulls a live item back into the queue.
    ReturnToPending,
}

impl ModerationAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Approve => "approve",
            Self::Reject { .. } => "reject",
            Self::Resubmit => "resubmit",
            Self::ReturnToPending => "returnToPending",
        }
    }

    /// The role that may request this action.
    pub fn required_role(&self) -> Role {
        match self {
            Self::Submit | Self::Resubmit => Role::Author,
            Self::Approve | Self::Reject { .. } | Self::ReturnToPending => Role::Admin,
        }
    }

    /// Actions that put an item in front of reviewers require the item to
    /// pass submission validation first.
    pub fn requires_valid_submission(&self) -> bool {
        matches!(self, Self::Submit | Self::Resubmit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("cannot {action} content that is {from}")]
    Illegal {
        from: ModerationStatus,
        action: &'static str,
    },
    #[error("{role} may not {action}")]
    Forbidden { role: Role, action: &'static str },
}

impl ModerationStatus {
    /// The transition table. Returns the next status, or why the move is
    /// not allowed. Role is checked before state so a forbidden request
    /// never leaks whether the transition would otherwise have been legal.
    pub fn transition(
        self,
        action: &ModerationAction,
        role: Role,
    ) -> Result<ModerationStatus, TransitionError> {
        use ModerationAction::*;
        use ModerationStatus::*;

        if role != action.required_role() {
            return Err(TransitionError::Forbidden {
                role,
                action: action.name(),
            });
        }

        match (self, action) {
            (Draft, Submit) => Ok(Pending),
            (Pending, Approve) => Ok(Approved),
            (Draft | Pending | Approved, Reject { .. }) => Ok(Rejected),
            (Rejected, Resubmit) => Ok(Pending),
            (Approved, ReturnToPending) => Ok(Pending),
            (from, act) => Err(TransitionError::Illegal {
                from,
                action: act.name(),
            }),
        }
    }

    /// Deletion is legal from every state except the live one. Live items
    /// must be pulled back to pending by an admin first.
    pub fn check_delete(self) -> Result<(), TransitionError> {
        if self.is_live() {
            Err(TransitionError::Illegal {
                from: self,
                action: "delete",
            })
        } else {
            Ok(())
        }
    }

    /// Authors may edit their items anywhere short of live.
    pub fn check_author_edit(self) -> Result<(), TransitionError> {
        if self.is_live() {
            Err(TransitionError::Illegal {
                from: self,
                action: "edit",
            })
        } else {
            Ok(())
        }
    }
}
