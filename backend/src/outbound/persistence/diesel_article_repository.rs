//! PostgreSQL-backed `ArticleRepository`.
//!
//! Listing needs a caller-chosen `ORDER BY`, which cannot be a bind
//! parameter. The clause is assembled from a closed mapping of [`SortBy`]
//! and [`SortOrder`] to column names and keywords, so no request text ever
//! reaches the statement. Every other value is bound.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Int4, Nullable, Text, Varchar};
use diesel_async::RunQueryDsl;

use crate::domain::article_query::{ArticleQuery, SortBy, SortOrder};
use crate::domain::ports::{ArticleRepository, StorageError};
use crate::domain::{Article, ArticleId, ArticleSummary, NewArticle, VoteDelta};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ArticleRow, ArticleSummaryRow, CountRow};
use super::pool::DbPool;
use super::schema::articles;

const SUMMARY_COLUMNS: &str = "articles.article_id, articles.title, articles.topic, \
     articles.author, articles.created_at, articles.votes, articles.article_img_url";

const TOPIC_FILTER: &str = "($1::text IS NULL OR articles.topic = $1)";

fn sort_column(sort_by: SortBy) -> &'static str {
    match sort_by {
        SortBy::Topic => "articles.topic",
        SortBy::CreatedAt => "articles.created_at",
        SortBy::Votes => "articles.votes",
        SortBy::Author => "articles.author",
        SortBy::Title => "articles.title",
        SortBy::CommentCount => "comment_count",
    }
}

fn direction(order: SortOrder) -> &'static str {
    order.keyword()
}

fn list_sql(sort_by: SortBy, order: SortOrder) -> String {
    let dir = direction(order);
    format!(
        "SELECT {SUMMARY_COLUMNS}, COUNT(comments.comment_id) AS comment_count \
         FROM articles LEFT JOIN comments ON comments.article_id = articles.article_id \
         WHERE {TOPIC_FILTER} \
         GROUP BY articles.article_id \
         ORDER BY {column} {dir}, articles.article_id {dir} \
         LIMIT $2 OFFSET $3",
        column = sort_column(sort_by),
    )
}

fn count_sql() -> String {
    format!("SELECT COUNT(*) AS total FROM articles WHERE {TOPIC_FILTER}")
}

fn find_sql() -> String {
    format!(
        "SELECT {SUMMARY_COLUMNS}, articles.body, COUNT(comments.comment_id) AS comment_count \
         FROM articles LEFT JOIN comments ON comments.article_id = articles.article_id \
         WHERE articles.article_id = $1 \
         GROUP BY articles.article_id"
    )
}

const INCREMENT_VOTES_SQL: &str = "UPDATE articles SET votes = votes + $2 \
     WHERE article_id = $1 \
     RETURNING article_id, title, topic, author, created_at, votes, article_img_url, body, \
     (SELECT COUNT(*) FROM comments WHERE comments.article_id = articles.article_id) \
     AS comment_count";

const INSERT_SQL: &str = "INSERT INTO articles (author, title, body, topic, article_img_url) \
     VALUES ($1, $2, $3, $4, $5) \
     RETURNING article_id, title, topic, author, created_at, votes, article_img_url, body, \
     0::bigint AS comment_count";

/// Diesel-backed article storage.
#[derive(Clone)]
pub struct DieselArticleRepository {
    pool: DbPool,
}

impl DieselArticleRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn topic_bind(query: &ArticleQuery) -> Option<String> {
    query.topic().map(|slug| slug.as_str().to_owned())
}

#[async_trait]
impl ArticleRepository for DieselArticleRepository {
    async fn exists(&self, article_id: ArticleId) -> Result<bool, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(exists(
            articles::table.filter(articles::article_id.eq(article_id.get())),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, "article exists"))
    }

    async fn list(&self, query: &ArticleQuery) -> Result<Vec<ArticleSummary>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let page = query.page();
        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);

        let rows: Vec<ArticleSummaryRow> = sql_query(list_sql(query.sort_by(), query.order()))
            .bind::<Nullable<Text>, _>(topic_bind(query))
            .bind::<BigInt, _>(i64::from(page.limit()))
            .bind::<BigInt, _>(offset)
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list articles"))?;

        rows.into_iter().map(ArticleSummary::try_from).collect()
    }

    async fn count(&self, query: &ArticleQuery) -> Result<u64, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: CountRow = sql_query(count_sql())
            .bind::<Nullable<Text>, _>(topic_bind(query))
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "count articles"))?;
        row.into_total()
    }

    async fn find_by_id(&self, article_id: ArticleId) -> Result<Option<Article>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ArticleRow> = sql_query(find_sql())
            .bind::<Int4, _>(article_id.get())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find article"))?;
        row.map(Article::try_from).transpose()
    }

    async fn increment_votes(
        &self,
        article_id: ArticleId,
        delta: VoteDelta,
    ) -> Result<Option<Article>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ArticleRow> = sql_query(INCREMENT_VOTES_SQL)
            .bind::<Int4, _>(article_id.get())
            .bind::<Int4, _>(delta.get())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "increment article votes"))?;
        row.map(Article::try_from).transpose()
    }

    async fn insert(&self, article: &NewArticle) -> Result<Article, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: ArticleRow = sql_query(INSERT_SQL)
            .bind::<Varchar, _>(article.author.as_str())
            .bind::<Varchar, _>(article.title.as_str())
            .bind::<Text, _>(article.body.as_str())
            .bind::<Varchar, _>(article.topic.as_str())
            .bind::<Varchar, _>(article.article_img_url.as_str())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "insert article"))?;
        Article::try_from(row)
    }
}
