//! Article records and the validated payload for creating one.

use chrono::{DateTime, Utc};

use super::{ArticleId, KeyValidationError, TopicSlug, Username};

/// Image used when a new article does not supply one.
pub const DEFAULT_ARTICLE_IMG_URL: &str =
    "https://images.pexels.com/photos/97050/pexels-photo-97050.jpeg?w=700&h=700";

/// Collection view of an article: everything except the body.
///
/// `comment_count` is derived from the comments table on every read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleSummary {
    pub article_id: ArticleId,
    pub title: String,
    pub topic: TopicSlug,
    pub author: Username,
    pub created_at: DateTime<Utc>,
    pub votes: i32,
    pub article_img_url: String,
    pub comment_count: u64,
}

/// Full article, including its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub summary: ArticleSummary,
    pub body: String,
}

impl Article {
    /// Article identifier.
    pub fn id(&self) -> ArticleId {
        self.summary.article_id
    }

    /// Drop the body, keeping the collection view.
    pub fn into_summary(self) -> ArticleSummary {
        self.summary
    }
}

/// Unvalidated input for creating an article.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleDraft {
    pub author: String,
    pub title: String,
    pub body: String,
    pub topic: String,
    pub article_img_url: Option<String>,
}

/// Validation errors raised by [`NewArticle::try_from`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArticleValidationError {
    #[error(transparent)]
    Key(#[from] KeyValidationError),
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
}

/// Validated article ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
    pub author: Username,
    pub title: String,
    pub body: String,
    pub topic: TopicSlug,
    pub article_img_url: String,
}

fn require_text(value: String, field: &'static str) -> Result<String, ArticleValidationError> {
    if value.trim().is_empty() {
        Err(ArticleValidationError::EmptyField { field })
    } else {
        Ok(value)
    }
}

impl TryFrom<ArticleDraft> for NewArticle {
    type Error = ArticleValidationError;

    fn try_from(draft: ArticleDraft) -> Result<Self, Self::Error> {
        let ArticleDraft {
            author,
            title,
            body,
            topic,
            article_img_url,
        } = draft;

        let article_img_url = article_img_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ARTICLE_IMG_URL.to_owned());

        Ok(Self {
            author: Username::new(author)?,
            title: require_text(title, "title")?,
            body: require_text(body, "body")?,
            topic: TopicSlug::new(topic)?,
            article_img_url,
        })
    }
}
