//! Driving port for reading articles and their comments.

use async_trait::async_trait;

use crate::domain::existence::not_found;
use crate::domain::article_query::{ArticleQuery, RawArticleQuery, RawPageQuery};
use crate::domain::{Article, ArticleId, ArticlePage, Comment, Error};

/// Use-case port behind the article read endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticlesQuery: Send + Sync {
    /// Compile the raw parameters and return the matching page with the
    /// total number of matches. Fails with not found for an unknown topic.
    async fn list_articles(&self, query: RawArticleQuery) -> Result<ArticlePage, Error>;

    /// Fetch one article with its body and comment count.
    async fn get_article(&self, article_id: ArticleId) -> Result<Article, Error>;

    /// Comments on an existing article, newest first.
    async fn list_comments(
        &self,
        article_id: ArticleId,
        page: RawPageQuery,
    ) -> Result<Vec<Comment>, Error>;
}

/// Fixture query used when no database is configured: validates input and
/// reports an empty catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureArticlesQuery;

#[async_trait]
impl ArticlesQuery for FixtureArticlesQuery {
    async fn list_articles(&self, query: RawArticleQuery) -> Result<ArticlePage, Error> {
        let query = ArticleQuery::compile(query)?;
        match query.topic() {
            Some(topic) => Err(not_found("topic", topic)),
            None => Ok(ArticlePage::default()),
        }
    }

    async fn get_article(&self, article_id: ArticleId) -> Result<Article, Error> {
        Err(not_found("article", article_id))
    }

    async fn list_comments(
        &self,
        article_id: ArticleId,
        page: RawPageQuery,
    ) -> Result<Vec<Comment>, Error> {
        page.compile()?;
        Err(not_found("article", article_id))
    }
}
