//! Driving port for comment mutations.

use async_trait::async_trait;

use crate::domain::existence::not_found;
use crate::domain::{Comment, CommentId, Error, VoteDelta};

/// Use-case port behind the comment write endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentsCommand: Send + Sync {
    /// Add `delta` to an existing comment's votes and return the comment.
    async fn increment_votes(&self, comment_id: CommentId, delta: VoteDelta)
        -> Result<Comment, Error>;

    /// Delete a comment; not found when nothing was removed.
    async fn delete_comment(&self, comment_id: CommentId) -> Result<(), Error>;
}

/// Fixture command used when no database is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCommentsCommand;

#[async_trait]
impl CommentsCommand for FixtureCommentsCommand {
    async fn increment_votes(
        &self,
        comment_id: CommentId,
        _delta: VoteDelta,
    ) -> Result<Comment, Error> {
        Err(not_found("comment", comment_id))
    }

    async fn delete_comment(&self, comment_id: CommentId) -> Result<(), Error> {
        Err(not_found("comment", comment_id))
    }
}
