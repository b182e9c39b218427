//! Comment domain service implementing [`CommentsCommand`].

use std::sync::Arc;

use async_trait::async_trait;

use super::error_classifier::classify;
use super::existence::{not_found, require_comment};
use super::ports::{CommentRepository, CommentsCommand};
use super::{Comment, CommentId, Error, VoteDelta};

fn comment_missing(comment_id: CommentId) -> Error {
    not_found("comment", comment_id)
}

/// Service for comment votes and deletion.
pub struct CommentService<C> {
    comments: Arc<C>,
}

impl<C> Clone for CommentService<C> {
    fn clone(&self) -> Self {
        Self {
            comments: Arc::clone(&self.comments),
        }
    }
}

impl<C> CommentService<C> {
    /// Create a service over the comment repository.
    pub fn new(comments: Arc<C>) -> Self {
        Self { comments }
    }
}

#[async_trait]
impl<C> CommentsCommand for CommentService<C>
where
    C: CommentRepository,
{
    async fn increment_votes(
        &self,
        comment_id: CommentId,
        delta: VoteDelta,
    ) -> Result<Comment, Error> {
        require_comment(self.comments.as_ref(), comment_id).await?;
        self.comments
            .increment_votes(comment_id, delta)
            .await
            .map_err(classify)?
            .ok_or_else(|| comment_missing(comment_id))
    }

    async fn delete_comment(&self, comment_id: CommentId) -> Result<(), Error> {
        let removed = self.comments.delete(comment_id).await.map_err(classify)?;
        if removed {
            Ok(())
        } else {
            Err(comment_missing(comment_id))
        }
    }
}
