//! PostgreSQL-backed `CommentRepository`.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::article_query::PageRequest;
use crate::domain::ports::{CommentRepository, StorageError};
use crate::domain::{ArticleId, Comment, CommentId, NewComment, VoteDelta};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CommentRow, NewCommentRow};
use super::pool::DbPool;
use super::schema::comments;

/// Diesel-backed comment storage.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn into_comments(rows: Vec<CommentRow>) -> Result<Vec<Comment>, StorageError> {
    rows.into_iter().map(Comment::try_from).collect()
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn exists(&self, comment_id: CommentId) -> Result<bool, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(exists(
            comments::table.filter(comments::comment_id.eq(comment_id.get())),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, "comment exists"))
    }

    async fn list_for_article(
        &self,
        article_id: ArticleId,
        page: Option<PageRequest>,
    ) -> Result<Vec<Comment>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = comments::table
            .filter(comments::article_id.eq(article_id.get()))
            .order((comments::created_at.desc(), comments::comment_id.desc()))
            .select(CommentRow::as_select())
            .into_boxed();

        if let Some(page) = page {
            query = query
                .limit(i64::from(page.limit()))
                .offset(i64::try_from(page.offset()).unwrap_or(i64::MAX));
        }

        let rows = query
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list comments"))?;
        into_comments(rows)
    }

    async fn insert(&self, comment: &NewComment) -> Result<Comment, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewCommentRow {
            article_id: comment.article_id.get(),
            author: comment.author.as_str(),
            body: comment.body.as_str(),
        };
        let inserted: CommentRow = diesel::insert_into(comments::table)
            .values(&row)
            .returning(CommentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "insert comment"))?;
        Comment::try_from(inserted)
    }

    async fn increment_votes(
        &self,
        comment_id: CommentId,
        delta: VoteDelta,
    ) -> Result<Option<Comment>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated: Option<CommentRow> =
            diesel::update(comments::table.filter(comments::comment_id.eq(comment_id.get())))
                .set(comments::votes.eq(comments::votes + delta.get()))
                .returning(CommentRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(|err| map_diesel_error(err, "increment comment votes"))?;
        updated.map(Comment::try_from).transpose()
    }

    async fn delete(&self, comment_id: CommentId) -> Result<bool, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed =
            diesel::delete(comments::table.filter(comments::comment_id.eq(comment_id.get())))
                .execute(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, "delete comment"))?;
        Ok(removed > 0)
    }
}
