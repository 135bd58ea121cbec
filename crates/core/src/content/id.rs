/// Content ID parsing utilities.
///
/// Newsdesk content IDs carry their kind as a prefix:
/// - Article: `article.{uuid}`
/// - Web story: `story.{uuid}`
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::ContentKind;

const ARTICLE_PREFIX: &str = "article.";
const STORY_PREFIX: &str = "story.";

/// Typed identifier for a content item. The kind prefix makes ids
/// self-describing in logs and URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentId {
    kind: ContentKind,
    uuid: Uuid,
}

impl ContentId {
    /// Mint a fresh ID for a new item of the given kind.
    pub fn generate(kind: ContentKind) -> Self {
        Self {
            kind,
            uuid: Uuid::new_v4(),
        }
    }

    pub fn from_parts(kind: ContentKind, uuid: Uuid) -> Self {
        Self { kind, uuid }
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn is_article(&self) -> bool {
        self.kind == ContentKind::Article
    }

    pub fn is_story(&self) -> bool {
        self.kind == ContentKind::Story
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentIdError {
    #[error("content id '{0}' has no recognized kind prefix")]
    UnknownPrefix(String),
    #[error("content id '{0}' does not end in a valid UUID")]
    InvalidUuid(String),
}

impl FromStr for ContentId {
    type Err = ContentIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, rest) = if let Some(rest) = s.strip_prefix(ARTICLE_PREFIX) {
            (ContentKind::Article, rest)
        } else if let Some(rest) = s.strip_prefix(STORY_PREFIX) {
            (ContentKind::Story, rest)
        } else {
            return Err(ContentIdError::UnknownPrefix(s.to_string()));
        };
        let uuid = Uuid::parse_str(rest).map_err(|_| ContentIdError::InvalidUuid(s.to_string()))?;
        Ok(Self { kind, uuid })
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            ContentKind::Article => ARTICLE_PREFIX,
            ContentKind::Story => STORY_PREFIX,
        };
        write!(f, "{prefix}{}", self.uuid)
    }
}

impl TryFrom<String> for ContentId {
    type Error = ContentIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ContentId> for String {
    fn from(id: ContentId) -> String {
        id.to_string()
    }
}
