//! Article domain service.
//!
//! Implements the article read and write driving ports. Reads that scope by a
//! referenced entity run the existence check and the fetch concurrently and
//! fail as soon as either fails. Writes check their preconditions first and
//! then issue a single statement; nothing spans the two steps, so a row
//! removed in between surfaces as not found.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::aggregation::{ArticlePage, fetch_article_page};
use super::article_query::{ArticleQuery, RawArticleQuery, RawPageQuery};
use super::error_classifier::classify;
use super::existence::{not_found, require_article, require_topic, require_user};
use super::ports::{
    ArticleRepository, ArticlesCommand, ArticlesQuery, CommentRepository, TopicRepository,
    UserRepository,
};
use super::{
    Article, ArticleDraft, ArticleId, Comment, CommentDraft, Error, ErrorCode, NewArticle,
    NewComment, Username, VoteDelta,
};

/// Unknown authors are a property of the payload, so they are reported as
/// malformed input rather than a missing resource.
fn unknown_author(username: &Username, err: Error) -> Error {
    if err.code() == ErrorCode::NotFound {
        Error::malformed_input(format!("author {username} is not a known user")).with_details(
            json!({ "field": "author", "value": username.as_str(), "code": "unknown_user" }),
        )
    } else {
        err
    }
}

fn article_missing(article_id: ArticleId) -> Error {
    not_found("article", article_id)
}

/// Service implementing [`ArticlesQuery`] and [`ArticlesCommand`].
pub struct ArticleService<A, C, T, U> {
    articles: Arc<A>,
    comments: Arc<C>,
    topics: Arc<T>,
    users: Arc<U>,
}

impl<A, C, T, U> Clone for ArticleService<A, C, T, U> {
    fn clone(&self) -> Self {
        Self {
            articles: Arc::clone(&self.articles),
            comments: Arc::clone(&self.comments),
            topics: Arc::clone(&self.topics),
            users: Arc::clone(&self.users),
        }
    }
}

impl<A, C, T, U> ArticleService<A, C, T, U> {
    /// Create a service over the four repositories.
    pub fn new(articles: Arc<A>, comments: Arc<C>, topics: Arc<T>, users: Arc<U>) -> Self {
        Self {
            articles,
            comments,
            topics,
            users,
        }
    }
}

#[async_trait]
impl<A, C, T, U> ArticlesQuery for ArticleService<A, C, T, U>
where
    A: ArticleRepository,
    C: CommentRepository,
    T: TopicRepository,
    U: UserRepository,
{
    async fn list_articles(&self, query: RawArticleQuery) -> Result<ArticlePage, Error> {
        let query = ArticleQuery::compile(query)?;
        let fetch = fetch_article_page(self.articles.as_ref(), &query);
        match query.topic() {
            Some(topic) => {
                let (page, ()) =
                    tokio::try_join!(fetch, require_topic(self.topics.as_ref(), topic))?;
                Ok(page)
            }
            None => fetch.await,
        }
    }

    async fn get_article(&self, article_id: ArticleId) -> Result<Article, Error> {
        self.articles
            .find_by_id(article_id)
            .await
            .map_err(classify)?
            .ok_or_else(|| article_missing(article_id))
    }

    async fn list_comments(
        &self,
        article_id: ArticleId,
        page: RawPageQuery,
    ) -> Result<Vec<Comment>, Error> {
        let page = page.compile()?;
        let fetch = async {
            self.comments
                .list_for_article(article_id, page)
                .await
                .map_err(classify)
        };
        let (comments, ()) =
            tokio::try_join!(fetch, require_article(self.articles.as_ref(), article_id))?;
        Ok(comments)
    }
}

#[async_trait]
impl<A, C, T, U> ArticlesCommand for ArticleService<A, C, T, U>
where
    A: ArticleRepository,
    C: CommentRepository,
    T: TopicRepository,
    U: UserRepository,
{
    async fn increment_votes(
        &self,
        article_id: ArticleId,
        delta: VoteDelta,
    ) -> Result<Article, Error> {
        require_article(self.articles.as_ref(), article_id).await?;
        self.articles
            .increment_votes(article_id, delta)
            .await
            .map_err(classify)?
            .ok_or_else(|| article_missing(article_id))
    }

    async fn add_comment(
        &self,
        article_id: ArticleId,
        draft: CommentDraft,
    ) -> Result<Comment, Error> {
        let comment = NewComment::new(article_id, draft)
            .map_err(|err| Error::malformed_input(format!("invalid comment: {err}")))?;

        require_article(self.articles.as_ref(), article_id).await?;
        require_user(self.users.as_ref(), &comment.author)
            .await
            .map_err(|err| unknown_author(&comment.author, err))?;

        self.comments.insert(&comment).await.map_err(classify)
    }

    async fn create_article(&self, draft: ArticleDraft) -> Result<Article, Error> {
        let article = NewArticle::try_from(draft)
            .map_err(|err| Error::malformed_input(format!("invalid article: {err}")))?;

        require_topic(self.topics.as_ref(), &article.topic).await?;
        require_user(self.users.as_ref(), &article.author)
            .await
            .map_err(|err| unknown_author(&article.author, err))?;

        self.articles.insert(&article).await.map_err(classify)
    }
}

#[cfg(test)]
#[path = "article_service_tests.rs"]
mod tests;
