use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::id::ContentId;
use super::status::ModerationStatus;

/// The two content kinds on the platform. Structurally identical; readers
/// see articles in the news feed and stories in the stories carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Article,
    Story,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Story => "story",
        }
    }

    /// Reader-facing label for the live status. Articles say "approved",
    /// stories say "published"; the underlying state is the same.
    pub fn live_label(&self) -> &'static str {
        match self {
            Self::Article => "approved",
            Self::Story => "published",
        }
    }
}

/// A content item moving through the moderation lifecycle.
/// `id`, `kind`, `author_id` and `created_at` never change after creation;
/// `updated_at` changes on every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: ContentId,
    pub kind: ContentKind,
    pub author_id: Uuid,
    pub title: String,
    pub body: String,
    pub category: String,
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub status: ModerationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub top_news: bool,
    pub trending: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentItem {
    /// Build a fresh item in `Draft` from an author's draft payload.
    pub fn from_draft(author_id: Uuid, draft: ContentDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: ContentId::generate(draft.kind),
            kind: draft.kind,
            author_id,
            title: draft.title,
            body: draft.body,
            category: draft.category,
            region: draft.region,
            summary: draft.summary,
            cover_image: draft.cover_image,
            status: ModerationStatus::Draft,
            rejection_reason: None,
            top_news: false,
            trending: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_live(&self) -> bool {
        self.status == ModerationStatus::Approved
    }

    pub fn owned_by(&self, author_id: Uuid) -> bool {
        self.author_id == author_id
    }

    /// Fold a partial edit into the item. Absent fields are left alone.
    pub fn apply_patch(&mut self, patch: ContentPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(body) = patch.body {
            self.body = body;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(region) = patch.region {
            self.region = region;
        }
        if let Some(summary) = patch.summary {
            self.summary = Some(summary);
        }
        if let Some(cover_image) = patch.cover_image {
            self.cover_image = Some(cover_image);
        }
    }
}

/// What an author sends to create an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDraft {
    pub kind: ContentKind,
    pub title: String,
    pub body: String,
    pub category: String,
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

/// Partial edit of an existing item. Every field optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}
