//! Wire representations for the news API.
//!
//! Field names are snake_case on the wire. Request bodies deserialise every
//! field as optional so a missing field becomes a field-level validation
//! error instead of an opaque extractor failure. Unknown fields are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::domain::article_query::{RawArticleQuery, RawPageQuery};
use crate::domain::{Article, ArticlePage, ArticleSummary, Comment, Topic, User};

/// Article as it appears in collection responses (no body).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ArticleSummaryDto {
    #[schema(example = 1)]
    pub article_id: i32,
    pub title: String,
    #[schema(example = "mitch")]
    pub topic: String,
    #[schema(example = "butter_bridge")]
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub votes: i32,
    pub article_img_url: String,
    #[schema(example = 11)]
    pub comment_count: u64,
}

impl From<ArticleSummary> for ArticleSummaryDto {
    fn from(summary: ArticleSummary) -> Self {
        Self {
            article_id: summary.article_id.get(),
            title: summary.title,
            topic: summary.topic.into(),
            author: summary.author.into(),
            created_at: summary.created_at,
            votes: summary.votes,
            article_img_url: summary.article_img_url,
            comment_count: summary.comment_count,
        }
    }
}

/// Full article including its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ArticleDto {
    #[serde(flatten)]
    pub summary: ArticleSummaryDto,
    pub body: String,
}

impl From<Article> for ArticleDto {
    fn from(article: Article) -> Self {
        Self {
            summary: article.summary.into(),
            body: article.body,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CommentDto {
    pub comment_id: i32,
    pub article_id: i32,
    pub author: String,
    pub body: String,
    pub votes: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            comment_id: comment.comment_id.get(),
            article_id: comment.article_id.get(),
            author: comment.author.into(),
            body: comment.body,
            votes: comment.votes,
            created_at: comment.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TopicDto {
    pub slug: String,
    pub description: String,
}

impl From<Topic> for TopicDto {
    fn from(topic: Topic) -> Self {
        Self {
            slug: topic.slug.into(),
            description: topic.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub username: String,
    pub name: String,
    pub avatar_url: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            username: user.username.into(),
            name: user.name,
            avatar_url: user.avatar_url,
        }
    }
}

/// `GET /api/articles` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ArticlesResponse {
    pub articles: Vec<ArticleSummaryDto>,
    /// Matches for the filter with pagination ignored.
    pub total_count: u64,
}

impl From<ArticlePage> for ArticlesResponse {
    fn from(page: ArticlePage) -> Self {
        Self {
            articles: page.articles.into_iter().map(Into::into).collect(),
            total_count: page.total_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ArticleResponse {
    pub article: ArticleDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CommentsResponse {
    pub comments: Vec<CommentDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CommentResponse {
    pub comment: CommentDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TopicsResponse {
    pub topics: Vec<TopicDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UsersResponse {
    pub users: Vec<UserDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub user: UserDto,
}

/// Query parameters for `GET /api/articles`. Values stay raw strings so the
/// query compiler can report exactly which one is wrong.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ArticleListParams {
    /// Exact topic slug.
    pub topic: Option<String>,
    /// One of `topic`, `created_at`, `votes`, `author`, `title`,
    /// `comment_count`. Defaults to `created_at`.
    pub sort_by: Option<String>,
    /// `asc` or `desc`, defaults to `desc`.
    pub order: Option<String>,
    /// Page size, defaults to 10.
    pub limit: Option<String>,
    /// 1-based page number, defaults to 1.
    pub page: Option<String>,
    /// Alias of `page`.
    pub p: Option<String>,
}

impl From<ArticleListParams> for RawArticleQuery {
    fn from(params: ArticleListParams) -> Self {
        Self {
            topic: params.topic,
            sort_by: params.sort_by,
            order: params.order,
            limit: params.limit,
            page: params.page.or(params.p),
        }
    }
}

/// Optional pagination for `GET /api/articles/{article_id}/comments`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    pub limit: Option<String>,
    pub page: Option<String>,
    /// Alias of `page`.
    pub p: Option<String>,
}

impl From<PageParams> for RawPageQuery {
    fn from(params: PageParams) -> Self {
        Self {
            limit: params.limit,
            page: params.page.or(params.p),
        }
    }
}

/// Body of the vote endpoints. `inc_votes` stays untyped so a non-integer
/// value is reported against the field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct VoteRequest {
    #[schema(value_type = i32, example = 1)]
    pub inc_votes: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct NewCommentRequest {
    #[schema(value_type = String, example = "butter_bridge")]
    pub author: Option<String>,
    #[schema(value_type = String)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct NewArticleRequest {
    #[schema(value_type = String)]
    pub author: Option<String>,
    #[schema(value_type = String)]
    pub title: Option<String>,
    #[schema(value_type = String)]
    pub body: Option<String>,
    #[schema(value_type = String)]
    pub topic: Option<String>,
    /// Defaults to a stock image when absent.
    pub article_img_url: Option<String>,
}
