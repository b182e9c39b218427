//! Port for article persistence, including the comment-count aggregation.

use async_trait::async_trait;

use crate::domain::article_query::ArticleQuery;
use crate::domain::{Article, ArticleId, ArticleSummary, NewArticle, VoteDelta};

use super::StorageError;

/// Reads and writes articles.
///
/// Every article returned carries a `comment_count` computed from the
/// comments table at query time.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Whether an article with this id exists.
    async fn exists(&self, article_id: ArticleId) -> Result<bool, StorageError>;

    /// One page of article summaries matching the query's filter, ordered by
    /// its sort key with `article_id` as tie-break in the same direction.
    async fn list(&self, query: &ArticleQuery) -> Result<Vec<ArticleSummary>, StorageError>;

    /// Number of articles matching the query's filter, ignoring pagination.
    async fn count(&self, query: &ArticleQuery) -> Result<u64, StorageError>;

    /// Fetch a full article.
    async fn find_by_id(&self, article_id: ArticleId) -> Result<Option<Article>, StorageError>;

    /// Add `delta` to the article's votes in one statement and return the
    /// updated article, or `None` when no row matched.
    async fn increment_votes(
        &self,
        article_id: ArticleId,
        delta: VoteDelta,
    ) -> Result<Option<Article>, StorageError>;

    /// Insert an article with zero votes and return it.
    async fn insert(&self, article: &NewArticle) -> Result<Article, StorageError>;
}
