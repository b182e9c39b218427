//! Internal Diesel row structs. Never exposed outside the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Int4, Text, Timestamptz, Varchar};

use crate::domain::ports::StorageError;
use crate::domain::{
    Article, ArticleId, ArticleSummary, Comment, CommentId, Topic, TopicSlug, User, Username,
};

use super::schema::{comments, topics, users};

fn decode(what: &'static str) -> impl Fn(String) -> StorageError {
    move |err| StorageError::decode(format!("{what}: {err}"))
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = topics)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TopicRow {
    pub slug: String,
    pub description: String,
}

impl TryFrom<TopicRow> for Topic {
    type Error = StorageError;

    fn try_from(row: TopicRow) -> Result<Self, Self::Error> {
        Ok(Self {
            slug: TopicSlug::new(row.slug).map_err(|e| decode("topic slug")(e.to_string()))?,
            description: row.description,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub username: String,
    pub name: String,
    pub avatar_url: String,
}

impl TryFrom<UserRow> for User {
    type Error = StorageError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            username: Username::new(row.username)
                .map_err(|e| decode("username")(e.to_string()))?,
            name: row.name,
            avatar_url: row.avatar_url,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub comment_id: i32,
    pub article_id: i32,
    pub author: String,
    pub body: String,
    pub votes: i32,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<CommentRow> for Comment {
    type Error = StorageError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            comment_id: CommentId::new(row.comment_id)
                .map_err(|e| decode("comment id")(e.to_string()))?,
            article_id: ArticleId::new(row.article_id)
                .map_err(|e| decode("comment article id")(e.to_string()))?,
            author: Username::new(row.author)
                .map_err(|e| decode("comment author")(e.to_string()))?,
            body: row.body,
            votes: row.votes,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub(crate) struct NewCommentRow<'a> {
    pub article_id: i32,
    pub author: &'a str,
    pub body: &'a str,
}

/// Article columns plus the aggregated comment count, without the body.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct ArticleSummaryRow {
    #[diesel(sql_type = Int4)]
    pub article_id: i32,
    #[diesel(sql_type = Varchar)]
    pub title: String,
    #[diesel(sql_type = Varchar)]
    pub topic: String,
    #[diesel(sql_type = Varchar)]
    pub author: String,
    #[diesel(sql_type = Timestamptz)]
    pub created_at: DateTime<Utc>,
    #[diesel(sql_type = Int4)]
    pub votes: i32,
    #[diesel(sql_type = Varchar)]
    pub article_img_url: String,
    #[diesel(sql_type = BigInt)]
    pub comment_count: i64,
}

impl TryFrom<ArticleSummaryRow> for ArticleSummary {
    type Error = StorageError;

    fn try_from(row: ArticleSummaryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            article_id: ArticleId::new(row.article_id)
                .map_err(|e| decode("article id")(e.to_string()))?,
            title: row.title,
            topic: TopicSlug::new(row.topic).map_err(|e| decode("article topic")(e.to_string()))?,
            author: Username::new(row.author)
                .map_err(|e| decode("article author")(e.to_string()))?,
            created_at: row.created_at,
            votes: row.votes,
            article_img_url: row.article_img_url,
            comment_count: u64::try_from(row.comment_count)
                .map_err(|e| decode("comment count")(e.to_string()))?,
        })
    }
}

/// Full article row including the body.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct ArticleRow {
    #[diesel(embed)]
    pub summary: ArticleSummaryRow,
    #[diesel(sql_type = Text)]
    pub body: String,
}

impl TryFrom<ArticleRow> for Article {
    type Error = StorageError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        Ok(Self {
            summary: ArticleSummary::try_from(row.summary)?,
            body: row.body,
        })
    }
}

#[derive(Debug, Clone, Copy, QueryableByName)]
pub(crate) struct CountRow {
    #[diesel(sql_type = BigInt)]
    pub total: i64,
}

impl CountRow {
    pub fn into_total(self) -> Result<u64, StorageError> {
        u64::try_from(self.total).map_err(|e| decode("article total")(e.to_string()))
    }
}
