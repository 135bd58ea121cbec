/// Submission validation.
///
/// Runs before any collaborator call: an item that fails here never
/// reaches the review queue or the network.
use thiserror::Error;

use super::model::ContentItem;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title is required")]
    MissingTitle,
    #[error("body is required")]
    MissingBody,
    #[error("category is required")]
    MissingCategory,
    #[error("region is required")]
    MissingRegion,
}

/// Check that an item carries everything a review submission needs.
/// Whitespace-only values count as missing.
pub fn validate_submission(item: &ContentItem) -> Result<(), ValidationError> {
    if item.title.trim().is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    if item.body.trim().is_empty() {
        return Err(ValidationError::MissingBody);
    }
    if item.category.trim().is_empty() {
        return Err(ValidationError::MissingCategory);
    }
    if item.region.trim().is_empty() {
        return Err(ValidationError::MissingRegion);
    }
    Ok(())
}
