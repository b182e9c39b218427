//! Port for reading topics.

use async_trait::async_trait;

use crate::domain::{Topic, TopicSlug};

use super::StorageError;

/// Read-only access to topics.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TopicRepository: Send + Sync {
    /// Whether a topic with this slug exists, regardless of its articles.
    async fn exists(&self, slug: &TopicSlug) -> Result<bool, StorageError>;

    /// All topics ordered by slug.
    async fn list(&self) -> Result<Vec<Topic>, StorageError>;
}
