//! Existence checks for referenced entities.
//!
//! Each check asks storage only whether a matching row exists, independent
//! of any related rows, so "topic exists but has no articles" stays distinct
//! from "topic does not exist". A missing row is reported as not found;
//! storage failures go through the classifier.

use std::fmt;

use serde_json::json;

use super::error_classifier::classify;
use super::ports::{ArticleRepository, CommentRepository, TopicRepository, UserRepository};
use super::{ArticleId, CommentId, Error, TopicSlug, Username};

/// Not-found error with a fixed per-entity message; the key goes in
/// `details` only.
///
/// # Examples
/// ```
/// use news_backend::domain::existence::not_found;
///
/// let err = not_found("article", 9999);
/// assert_eq!(err.message(), "article not found");
/// assert_eq!(
///     err.details().and_then(|d| d.get("value")),
///     Some(&serde_json::json!("9999"))
/// );
/// ```
pub fn not_found(entity: &'static str, key: impl fmt::Display) -> Error {
    Error::not_found(format!("{entity} not found"))
        .with_details(json!({ "entity": entity, "value": key.to_string() }))
}

fn found_or(exists: bool, missing: impl FnOnce() -> Error) -> Result<(), Error> {
    if exists { Ok(()) } else { Err(missing()) }
}

/// Require that the topic exists.
pub async fn require_topic<T>(topics: &T, slug: &TopicSlug) -> Result<(), Error>
where
    T: TopicRepository + ?Sized,
{
    let exists = topics.exists(slug).await.map_err(classify)?;
    found_or(exists, || not_found("topic", slug))
}

/// Require that the article exists.
pub async fn require_article<A>(articles: &A, article_id: ArticleId) -> Result<(), Error>
where
    A: ArticleRepository + ?Sized,
{
    let exists = articles.exists(article_id).await.map_err(classify)?;
    found_or(exists, || not_found("article", article_id))
}

/// Require that the comment exists.
pub async fn require_comment<C>(comments: &C, comment_id: CommentId) -> Result<(), Error>
where
    C: CommentRepository + ?Sized,
{
    let exists = comments.exists(comment_id).await.map_err(classify)?;
    found_or(exists, || not_found("comment", comment_id))
}

/// Require that the user exists.
pub async fn require_user<U>(users: &U, username: &Username) -> Result<(), Error>
where
    U: UserRepository + ?Sized,
{
    let exists = users.exists(username).await.map_err(classify)?;
    found_or(exists, || not_found("user", username))
}
