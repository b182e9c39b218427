//! Driving port for article mutations: votes, new comments and new articles.

use async_trait::async_trait;

use crate::domain::existence::not_found;
use crate::domain::{Article, ArticleDraft, ArticleId, Comment, CommentDraft, Error, VoteDelta};

/// Use-case port behind the article write endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticlesCommand: Send + Sync {
    /// Add `delta` to an existing article's votes and return the article.
    async fn increment_votes(&self, article_id: ArticleId, delta: VoteDelta)
        -> Result<Article, Error>;

    /// Post a comment on an existing article by a known user.
    async fn add_comment(
        &self,
        article_id: ArticleId,
        draft: CommentDraft,
    ) -> Result<Comment, Error>;

    /// Publish an article under an existing topic by a known user.
    async fn create_article(&self, draft: ArticleDraft) -> Result<Article, Error>;
}

/// Fixture command used when no database is configured; every target is
/// reported missing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureArticlesCommand;

#[async_trait]
impl ArticlesCommand for FixtureArticlesCommand {
    async fn increment_votes(
        &self,
        article_id: ArticleId,
        _delta: VoteDelta,
    ) -> Result<Article, Error> {
        Err(not_found("article", article_id))
    }

    async fn add_comment(
        &self,
        article_id: ArticleId,
        _draft: CommentDraft,
    ) -> Result<Comment, Error> {
        Err(not_found("article", article_id))
    }

    async fn create_article(&self, draft: ArticleDraft) -> Result<Article, Error> {
        Err(not_found("topic", &draft.topic))
    }
}
