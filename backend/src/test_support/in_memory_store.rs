//! In-memory implementation of every repository port.
//!
//! Mirrors the relational behaviour the services rely on: comment counts are
//! computed on every read, inserts enforce the foreign keys, vote updates
//! overflow like a 32-bit integer column, and deletes report rows affected.

use std::cmp::Ordering;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;

use crate::domain::article_query::{ArticleQuery, PageRequest, SortBy, SortOrder};
use crate::domain::ports::{
    ArticleRepository, CommentRepository, StorageError, StorageErrorCode, TopicRepository,
    UserRepository,
};
use crate::domain::{
    Article, ArticleId, ArticleSummary, Comment, CommentId, NewArticle, NewComment, Topic,
    TopicSlug, User, Username, VoteDelta,
};

#[derive(Debug, Clone)]
struct ArticleRow {
    article_id: ArticleId,
    title: String,
    topic: TopicSlug,
    author: Username,
    body: String,
    created_at: DateTime<Utc>,
    votes: i32,
    article_img_url: String,
}

#[derive(Default)]
struct StoreState {
    topics: Vec<Topic>,
    users: Vec<User>,
    articles: Vec<ArticleRow>,
    comments: Vec<Comment>,
    last_article_id: i32,
    last_comment_id: i32,
    pending_failure: Option<StorageError>,
}

impl StoreState {
    fn take_failure(&mut self) -> Result<(), StorageError> {
        self.pending_failure.take().map_or(Ok(()), Err)
    }

    fn comment_count(&self, article_id: ArticleId) -> u64 {
        self.comments
            .iter()
            .filter(|comment| comment.article_id == article_id)
            .fold(0, |count, _| count + 1)
    }

    fn to_article(&self, row: &ArticleRow) -> Article {
        Article {
            summary: ArticleSummary {
                article_id: row.article_id,
                title: row.title.clone(),
                topic: row.topic.clone(),
                author: row.author.clone(),
                created_at: row.created_at,
                votes: row.votes,
                article_img_url: row.article_img_url.clone(),
                comment_count: self.comment_count(row.article_id),
            },
            body: row.body.clone(),
        }
    }

    fn matching<'a>(&'a self, query: &'a ArticleQuery) -> impl Iterator<Item = &'a ArticleRow> {
        self.articles
            .iter()
            .filter(move |row| query.topic().is_none_or(|topic| row.topic == *topic))
    }

    fn has_user(&self, username: &Username) -> bool {
        self.users.iter().any(|user| user.username == *username)
    }
}

fn foreign_key_violation(constraint: &str) -> StorageError {
    StorageError::database(
        StorageErrorCode::ForeignKeyViolation,
        format!("insert violates foreign key constraint \"{constraint}\""),
    )
}

fn integer_out_of_range() -> StorageError {
    StorageError::database(StorageErrorCode::NumericValueOutOfRange, "integer out of range")
}

fn next_id(last: &mut i32) -> Result<i32, StorageError> {
    *last = last
        .checked_add(1)
        .ok_or_else(|| StorageError::database(StorageErrorCode::Other(None), "sequence exhausted"))?;
    Ok(*last)
}

fn invalid_id(err: impl std::fmt::Display) -> StorageError {
    StorageError::decode(format!("generated identifier rejected: {err}"))
}

fn compare_summaries(a: &ArticleSummary, b: &ArticleSummary, sort_by: SortBy) -> Ordering {
    let primary = match sort_by {
        SortBy::Topic => a.topic.cmp(&b.topic),
        SortBy::CreatedAt => a.created_at.cmp(&b.created_at),
        SortBy::Votes => a.votes.cmp(&b.votes),
        SortBy::Author => a.author.cmp(&b.author),
        SortBy::Title => a.title.cmp(&b.title),
        SortBy::CommentCount => a.comment_count.cmp(&b.comment_count),
    };
    primary.then_with(|| a.article_id.cmp(&b.article_id))
}

fn window<T>(rows: Vec<T>, page: Option<PageRequest>) -> Vec<T> {
    match page {
        Some(page) => {
            let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
            let take = usize::try_from(page.limit()).unwrap_or(usize::MAX);
            rows.into_iter().skip(skip).take(take).collect()
        }
        None => rows,
    }
}

/// Thread-safe in-memory news store.
///
/// # Examples
/// ```
/// use news_backend::test_support::seeded_store;
///
/// let store = seeded_store();
/// assert_eq!(store.article_count(), 13);
/// ```
pub struct InMemoryNewsStore {
    state: Mutex<StoreState>,
    clock: Arc<dyn Clock>,
}

impl InMemoryNewsStore {
    /// Create an empty store stamping new rows with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            clock,
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a topic.
    pub fn add_topic(&self, topic: Topic) {
        self.lock_state().topics.push(topic);
    }

    /// Add a user.
    pub fn add_user(&self, user: User) {
        self.lock_state().users.push(user);
    }

    /// Add an article with an explicit timestamp and vote tally.
    pub fn add_article(
        &self,
        article: NewArticle,
        created_at: DateTime<Utc>,
        votes: i32,
    ) -> Result<ArticleId, StorageError> {
        let mut state = self.lock_state();
        let article_id = ArticleId::new(next_id(&mut state.last_article_id)?).map_err(invalid_id)?;
        state.articles.push(ArticleRow {
            article_id,
            title: article.title,
            topic: article.topic,
            author: article.author,
            body: article.body,
            created_at,
            votes,
            article_img_url: article.article_img_url,
        });
        Ok(article_id)
    }

    /// Add a comment with an explicit timestamp and vote tally.
    pub fn add_comment(
        &self,
        comment: NewComment,
        created_at: DateTime<Utc>,
        votes: i32,
    ) -> Result<CommentId, StorageError> {
        let mut state = self.lock_state();
        let comment_id = CommentId::new(next_id(&mut state.last_comment_id)?).map_err(invalid_id)?;
        state.comments.push(Comment {
            comment_id,
            article_id: comment.article_id,
            author: comment.author,
            body: comment.body,
            votes,
            created_at,
        });
        Ok(comment_id)
    }

    /// Remove an article and its comments, as a concurrent writer might.
    pub fn remove_article(&self, article_id: ArticleId) {
        let mut state = self.lock_state();
        state.articles.retain(|row| row.article_id != article_id);
        state.comments.retain(|comment| comment.article_id != article_id);
    }

    /// Make the next repository call fail with `error`.
    pub fn fail_next(&self, error: StorageError) {
        self.lock_state().pending_failure = Some(error);
    }

    /// Number of stored articles.
    pub fn article_count(&self) -> usize {
        self.lock_state().articles.len()
    }

    /// Count comments on an article by scanning every stored comment.
    pub fn raw_comment_count(&self, article_id: ArticleId) -> usize {
        self.lock_state()
            .comments
            .iter()
            .filter(|comment| comment.article_id == article_id)
            .count()
    }

    /// Identifiers of every stored article.
    pub fn article_ids(&self) -> Vec<ArticleId> {
        self.lock_state()
            .articles
            .iter()
            .map(|row| row.article_id)
            .collect()
    }
}

#[async_trait]
impl ArticleRepository for InMemoryNewsStore {
    async fn exists(&self, article_id: ArticleId) -> Result<bool, StorageError> {
        let mut state = self.lock_state();
        state.take_failure()?;
        Ok(state.articles.iter().any(|row| row.article_id == article_id))
    }

    async fn list(&self, query: &ArticleQuery) -> Result<Vec<ArticleSummary>, StorageError> {
        let mut state = self.lock_state();
        state.take_failure()?;
        let mut summaries: Vec<ArticleSummary> = state
            .matching(query)
            .map(|row| state.to_article(row).into_summary())
            .collect();
        summaries.sort_by(|a, b| {
            let ordering = compare_summaries(a, b, query.sort_by());
            match query.order() {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
        Ok(window(summaries, Some(query.page())))
    }

    async fn count(&self, query: &ArticleQuery) -> Result<u64, StorageError> {
        let mut state = self.lock_state();
        state.take_failure()?;
        Ok(state.matching(query).fold(0, |count, _| count + 1))
    }

    async fn find_by_id(&self, article_id: ArticleId) -> Result<Option<Article>, StorageError> {
        let mut state = self.lock_state();
        state.take_failure()?;
        Ok(state
            .articles
            .iter()
            .find(|row| row.article_id == article_id)
            .map(|row| state.to_article(row)))
    }

    async fn increment_votes(
        &self,
        article_id: ArticleId,
        delta: VoteDelta,
    ) -> Result<Option<Article>, StorageError> {
        let mut state = self.lock_state();
        state.take_failure()?;
        let Some(row) = state
            .articles
            .iter_mut()
            .find(|row| row.article_id == article_id)
        else {
            return Ok(None);
        };
        row.votes = delta.apply(row.votes).ok_or_else(integer_out_of_range)?;
        let row = row.clone();
        Ok(Some(state.to_article(&row)))
    }

    async fn insert(&self, article: &NewArticle) -> Result<Article, StorageError> {
        {
            let mut state = self.lock_state();
            state.take_failure()?;
            if !state.topics.iter().any(|topic| topic.slug == article.topic) {
                return Err(foreign_key_violation("articles_topic_fkey"));
            }
            if !state.has_user(&article.author) {
                return Err(foreign_key_violation("articles_author_fkey"));
            }
        }
        let article_id = self.add_article(article.clone(), self.clock.utc(), 0)?;
        let state = self.lock_state();
        state
            .articles
            .iter()
            .find(|row| row.article_id == article_id)
            .map(|row| state.to_article(row))
            .ok_or_else(|| StorageError::decode("inserted article not returned"))
    }
}

#[async_trait]
impl CommentRepository for InMemoryNewsStore {
    async fn exists(&self, comment_id: CommentId) -> Result<bool, StorageError> {
        let mut state = self.lock_state();
        state.take_failure()?;
        Ok(state
            .comments
            .iter()
            .any(|comment| comment.comment_id == comment_id))
    }

    async fn list_for_article(
        &self,
        article_id: ArticleId,
        page: Option<PageRequest>,
    ) -> Result<Vec<Comment>, StorageError> {
        let mut state = self.lock_state();
        state.take_failure()?;
        let mut comments: Vec<Comment> = state
            .comments
            .iter()
            .filter(|comment| comment.article_id == article_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.comment_id.cmp(&a.comment_id))
        });
        Ok(window(comments, page))
    }

    async fn insert(&self, comment: &NewComment) -> Result<Comment, StorageError> {
        let created_at = self.clock.utc();
        let mut state = self.lock_state();
        state.take_failure()?;
        if !state
            .articles
            .iter()
            .any(|row| row.article_id == comment.article_id)
        {
            return Err(foreign_key_violation("comments_article_id_fkey"));
        }
        if !state.has_user(&comment.author) {
            return Err(foreign_key_violation("comments_author_fkey"));
        }
        let comment_id = CommentId::new(next_id(&mut state.last_comment_id)?).map_err(invalid_id)?;
        let stored = Comment {
            comment_id,
            article_id: comment.article_id,
            author: comment.author.clone(),
            body: comment.body.clone(),
            votes: 0,
            created_at,
        };
        state.comments.push(stored.clone());
        Ok(stored)
    }

    async fn increment_votes(
        &self,
        comment_id: CommentId,
        delta: VoteDelta,
    ) -> Result<Option<Comment>, StorageError> {
        let mut state = self.lock_state();
        state.take_failure()?;
        let Some(comment) = state
            .comments
            .iter_mut()
            .find(|comment| comment.comment_id == comment_id)
        else {
            return Ok(None);
        };
        comment.votes = delta.apply(comment.votes).ok_or_else(integer_out_of_range)?;
        Ok(Some(comment.clone()))
    }

    async fn delete(&self, comment_id: CommentId) -> Result<bool, StorageError> {
        let mut state = self.lock_state();
        state.take_failure()?;
        let before = state.comments.len();
        state.comments.retain(|comment| comment.comment_id != comment_id);
        Ok(state.comments.len() < before)
    }
}

#[async_trait]
impl TopicRepository for InMemoryNewsStore {
    async fn exists(&self, slug: &TopicSlug) -> Result<bool, StorageError> {
        let mut state = self.lock_state();
        state.take_failure()?;
        Ok(state.topics.iter().any(|topic| topic.slug == *slug))
    }

    async fn list(&self) -> Result<Vec<Topic>, StorageError> {
        let mut state = self.lock_state();
        state.take_failure()?;
        let mut topics = state.topics.clone();
        topics.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(topics)
    }
}

#[async_trait]
impl UserRepository for InMemoryNewsStore {
    async fn exists(&self, username: &Username) -> Result<bool, StorageError> {
        let mut state = self.lock_state();
        state.take_failure()?;
        Ok(state.has_user(username))
    }

    async fn list(&self) -> Result<Vec<User>, StorageError> {
        let mut state = self.lock_state();
        state.take_failure()?;
        let mut users = state.users.clone();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn find(&self, username: &Username) -> Result<Option<User>, StorageError> {
        let mut state = self.lock_state();
        state.take_failure()?;
        Ok(state
            .users
            .iter()
            .find(|user| user.username == *username)
            .cloned())
    }
}
