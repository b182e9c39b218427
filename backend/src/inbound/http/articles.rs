//! Article endpoints.
//!
//! ```text
//! GET   /api/articles?topic=cats&sort_by=votes&order=asc&limit=5&p=2
//! POST  /api/articles {"author":"butter_bridge","title":"..","body":"..","topic":"cats"}
//! GET   /api/articles/1
//! PATCH /api/articles/1 {"inc_votes":10}
//! GET   /api/articles/1/comments
//! POST  /api/articles/1/comments {"author":"butter_bridge","body":".."}
//! ```

use actix_web::{HttpResponse, get, patch, post, web};

use crate::domain::{ArticleDraft, CommentDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{
    ArticleListParams, ArticleResponse, ArticlesResponse, CommentResponse, CommentsResponse,
    NewArticleRequest, NewCommentRequest, PageParams, VoteRequest,
};
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_article_id, parse_vote_delta, require_field,
};

const AUTHOR: FieldName = FieldName::new("author");
const BODY: FieldName = FieldName::new("body");
const TITLE: FieldName = FieldName::new("title");
const TOPIC: FieldName = FieldName::new("topic");

/// List articles with their comment counts.
#[utoipa::path(
    get,
    path = "/api/articles",
    params(ArticleListParams),
    responses(
        (status = 200, description = "One page of articles", body = ArticlesResponse),
        (status = 400, description = "Unknown sort key, order or bad pagination", body = ErrorEnvelope),
        (status = 404, description = "Unknown topic", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["articles"],
    operation_id = "listArticles"
)]
#[get("/articles")]
pub async fn list_articles(
    state: web::Data<HttpState>,
    params: web::Query<ArticleListParams>,
) -> ApiResult<web::Json<ArticlesResponse>> {
    let page = state.articles.list_articles(params.into_inner().into()).await?;
    Ok(web::Json(page.into()))
}

/// Create an article.
#[utoipa::path(
    post,
    path = "/api/articles",
    request_body = NewArticleRequest,
    responses(
        (status = 201, description = "Created article", body = ArticleResponse),
        (status = 400, description = "Missing field or unknown author", body = ErrorEnvelope),
        (status = 404, description = "Unknown topic", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["articles"],
    operation_id = "createArticle"
)]
#[post("/articles")]
pub async fn create_article(
    state: web::Data<HttpState>,
    payload: web::Json<NewArticleRequest>,
) -> ApiResult<HttpResponse> {
    let NewArticleRequest {
        author,
        title,
        body,
        topic,
        article_img_url,
    } = payload.into_inner();
    let draft = ArticleDraft {
        author: require_field(author, AUTHOR)?,
        title: require_field(title, TITLE)?,
        body: require_field(body, BODY)?,
        topic: require_field(topic, TOPIC)?,
        article_img_url,
    };

    let article = state.article_commands.create_article(draft).await?;
    Ok(HttpResponse::Created().json(ArticleResponse {
        article: article.into(),
    }))
}

/// Fetch one article including its body.
#[utoipa::path(
    get,
    path = "/api/articles/{article_id}",
    params(("article_id" = i32, Path, description = "Positive article id")),
    responses(
        (status = 200, description = "Article", body = ArticleResponse),
        (status = 400, description = "Malformed id", body = ErrorEnvelope),
        (status = 404, description = "Unknown article", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["articles"],
    operation_id = "getArticle"
)]
#[get("/articles/{article_id}")]
pub async fn get_article(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ArticleResponse>> {
    let article_id = parse_article_id(&path)?;
    let article = state.articles.get_article(article_id).await?;
    Ok(web::Json(ArticleResponse {
        article: article.into(),
    }))
}

/// Add `inc_votes` to an article's votes.
#[utoipa::path(
    patch,
    path = "/api/articles/{article_id}",
    params(("article_id" = i32, Path, description = "Positive article id")),
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Updated article", body = ArticleResponse),
        (status = 400, description = "Malformed id or inc_votes", body = ErrorEnvelope),
        (status = 404, description = "Unknown article", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["articles"],
    operation_id = "voteOnArticle"
)]
#[patch("/articles/{article_id}")]
pub async fn vote_on_article(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<VoteRequest>,
) -> ApiResult<web::Json<ArticleResponse>> {
    let article_id = parse_article_id(&path)?;
    let delta = parse_vote_delta(payload.into_inner().inc_votes)?;
    let article = state
        .article_commands
        .increment_votes(article_id, delta)
        .await?;
    Ok(web::Json(ArticleResponse {
        article: article.into(),
    }))
}

/// Comments on an article, newest first.
#[utoipa::path(
    get,
    path = "/api/articles/{article_id}/comments",
    params(
        ("article_id" = i32, Path, description = "Positive article id"),
        PageParams
    ),
    responses(
        (status = 200, description = "Comments, possibly empty", body = CommentsResponse),
        (status = 400, description = "Malformed id or pagination", body = ErrorEnvelope),
        (status = 404, description = "Unknown article", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["comments"],
    operation_id = "listArticleComments"
)]
#[get("/articles/{article_id}/comments")]
pub async fn list_comments(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    params: web::Query<PageParams>,
) -> ApiResult<web::Json<CommentsResponse>> {
    let article_id = parse_article_id(&path)?;
    let comments = state
        .articles
        .list_comments(article_id, params.into_inner().into())
        .await?;
    Ok(web::Json(CommentsResponse {
        comments: comments.into_iter().map(Into::into).collect(),
    }))
}

/// Post a comment on an article.
#[utoipa::path(
    post,
    path = "/api/articles/{article_id}/comments",
    params(("article_id" = i32, Path, description = "Positive article id")),
    request_body = NewCommentRequest,
    responses(
        (status = 201, description = "Created comment", body = CommentResponse),
        (status = 400, description = "Malformed id, missing field or unknown author", body = ErrorEnvelope),
        (status = 404, description = "Unknown article", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["comments"],
    operation_id = "postComment"
)]
#[post("/articles/{article_id}/comments")]
pub async fn post_comment(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<NewCommentRequest>,
) -> ApiResult<HttpResponse> {
    let article_id = parse_article_id(&path)?;
    let NewCommentRequest { author, body } = payload.into_inner();
    let draft = CommentDraft {
        author: require_field(author, AUTHOR)?,
        body: require_field(body, BODY)?,
    };

    let comment = state.article_commands.add_comment(article_id, draft).await?;
    Ok(HttpResponse::Created().json(CommentResponse {
        comment: comment.into(),
    }))
}

#[cfg(test)]
#[path = "articles_tests.rs"]
mod tests;
