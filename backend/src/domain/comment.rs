//! Comment records and the validated payload for posting one.

use chrono::{DateTime, Utc};

use super::{ArticleId, CommentId, KeyValidationError, Username};

/// A comment attached to an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub comment_id: CommentId,
    pub article_id: ArticleId,
    pub author: Username,
    pub body: String,
    pub votes: i32,
    pub created_at: DateTime<Utc>,
}

/// Unvalidated input for posting a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentDraft {
    pub author: String,
    pub body: String,
}

/// Validation errors raised by [`NewComment::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommentValidationError {
    #[error(transparent)]
    Author(#[from] KeyValidationError),
    #[error("body must not be empty")]
    EmptyBody,
}

/// Validated comment ready to be inserted.
///
/// Votes start at zero; the identifier and timestamp are assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub article_id: ArticleId,
    pub author: Username,
    pub body: String,
}

impl NewComment {
    /// Validate a draft for the given article.
    pub fn new(article_id: ArticleId, draft: CommentDraft) -> Result<Self, CommentValidationError> {
        let author = Username::new(draft.author)?;
        if draft.body.trim().is_empty() {
            return Err(CommentValidationError::EmptyBody);
        }
        Ok(Self {
            article_id,
            author,
            body: draft.body,
        })
    }
}
