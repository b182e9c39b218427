//! Port for comment persistence.

use async_trait::async_trait;

use crate::domain::article_query::PageRequest;
use crate::domain::{ArticleId, Comment, CommentId, NewComment, VoteDelta};

use super::StorageError;

/// Reads and writes comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Whether a comment with this id exists.
    async fn exists(&self, comment_id: CommentId) -> Result<bool, StorageError>;

    /// Comments on an article, newest first with ties broken by descending
    /// id. Unpaginated when `page` is `None`.
    async fn list_for_article(
        &self,
        article_id: ArticleId,
        page: Option<PageRequest>,
    ) -> Result<Vec<Comment>, StorageError>;

    /// Insert a comment with zero votes and return it.
    async fn insert(&self, comment: &NewComment) -> Result<Comment, StorageError>;

    /// Add `delta` to the comment's votes and return it, or `None` when no
    /// row matched.
    async fn increment_votes(
        &self,
        comment_id: CommentId,
        delta: VoteDelta,
    ) -> Result<Option<Comment>, StorageError>;

    /// Delete a comment, reporting whether a row was removed.
    async fn delete(&self, comment_id: CommentId) -> Result<bool, StorageError>;
}
