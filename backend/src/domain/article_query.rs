//! Compiles raw collection query parameters into a validated [`ArticleQuery`].
//!
//! Sort keys come from a closed vocabulary so that no client-supplied text is
//! ever placed in a sort position. Storage adapters map each [`SortBy`]
//! variant onto a fixed column expression of their own.

use serde_json::json;

use super::{Error, TopicSlug};

/// Default page size for collection queries.
pub const DEFAULT_LIMIT: u32 = 10;
/// Default 1-based page number.
pub const DEFAULT_PAGE: u32 = 1;

/// Column an article collection can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortBy {
    Topic,
    #[default]
    CreatedAt,
    Votes,
    Author,
    Title,
    CommentCount,
}

impl SortBy {
    /// Every accepted sort key.
    pub const ALL: [Self; 6] = [
        Self::Topic,
        Self::CreatedAt,
        Self::Votes,
        Self::Author,
        Self::Title,
        Self::CommentCount,
    ];

    /// Wire name of the sort key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Topic => "topic",
            Self::CreatedAt => "created_at",
            Self::Votes => "votes",
            Self::Author => "author",
            Self::Title => "title",
            Self::CommentCount => "comment_count",
        }
    }

    /// Match a wire name exactly.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|candidate| candidate.as_str() == raw)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Match `asc`/`desc` case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if raw.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }

    /// Upper-case keyword for query builders.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Validated pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    limit: u32,
    page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            page: DEFAULT_PAGE,
        }
    }
}

impl PageRequest {
    /// Build a window, rejecting zero for either value.
    pub fn new(limit: u32, page: u32) -> Result<Self, QueryValidationError> {
        if limit == 0 {
            return Err(QueryValidationError::InvalidLimit {
                value: limit.to_string(),
            });
        }
        if page == 0 {
            return Err(QueryValidationError::InvalidPage {
                value: page.to_string(),
            });
        }
        Ok(Self { limit, page })
    }

    /// Parse optional raw values; `None` when neither was supplied.
    ///
    /// # Examples
    /// ```
    /// use news_backend::domain::article_query::PageRequest;
    ///
    /// assert_eq!(PageRequest::from_raw(None, None), Ok(None));
    /// let page = PageRequest::from_raw(Some("5"), Some("3")).expect("valid").expect("present");
    /// assert_eq!(page.offset(), 10);
    /// ```
    pub fn from_raw(
        limit: Option<&str>,
        page: Option<&str>,
    ) -> Result<Option<Self>, QueryValidationError> {
        if limit.is_none() && page.is_none() {
            return Ok(None);
        }
        let limit = match limit {
            Some(raw) => parse_positive(raw).ok_or_else(|| QueryValidationError::InvalidLimit {
                value: raw.to_owned(),
            })?,
            None => DEFAULT_LIMIT,
        };
        let page = match page {
            Some(raw) => parse_positive(raw).ok_or_else(|| QueryValidationError::InvalidPage {
                value: raw.to_owned(),
            })?,
            None => DEFAULT_PAGE,
        };
        Self::new(limit, page).map(Some)
    }

    /// Maximum number of rows in the page.
    pub fn limit(self) -> u32 {
        self.limit
    }

    /// 1-based page number.
    pub fn page(self) -> u32 {
        self.page
    }

    /// Rows to skip: `(page - 1) * limit`.
    pub fn offset(self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

fn parse_positive(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|value| *value > 0)
}

/// Raw, untyped collection query parameters as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawArticleQuery {
    pub topic: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub limit: Option<String>,
    pub page: Option<String>,
}

/// Raw pagination parameters for secondary collections such as comments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPageQuery {
    pub limit: Option<String>,
    pub page: Option<String>,
}

impl RawPageQuery {
    /// Validate into an optional window; `None` means "return everything".
    pub fn compile(&self) -> Result<Option<PageRequest>, QueryValidationError> {
        PageRequest::from_raw(self.limit.as_deref(), self.page.as_deref())
    }
}

/// Validated, normalised article collection query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArticleQuery {
    topic: Option<TopicSlug>,
    sort_by: SortBy,
    order: SortOrder,
    page: PageRequest,
}

impl ArticleQuery {
    /// Assemble a query from already-validated parts.
    pub fn new(
        topic: Option<TopicSlug>,
        sort_by: SortBy,
        order: SortOrder,
        page: PageRequest,
    ) -> Self {
        Self {
            topic,
            sort_by,
            order,
            page,
        }
    }

    /// Validate and normalise raw parameters.
    ///
    /// An empty `topic` counts as absent. The topic is not checked for
    /// existence here.
    ///
    /// # Examples
    /// ```
    /// use news_backend::domain::article_query::{ArticleQuery, RawArticleQuery, SortBy, SortOrder};
    ///
    /// let query = ArticleQuery::compile(RawArticleQuery {
    ///     sort_by: Some("votes".to_owned()),
    ///     order: Some("ASC".to_owned()),
    ///     ..RawArticleQuery::default()
    /// })
    /// .expect("valid query");
    /// assert_eq!(query.sort_by(), SortBy::Votes);
    /// assert_eq!(query.order(), SortOrder::Asc);
    /// assert_eq!(query.page().offset(), 0);
    /// ```
    pub fn compile(raw: RawArticleQuery) -> Result<Self, QueryValidationError> {
        let RawArticleQuery {
            topic,
            sort_by,
            order,
            limit,
            page,
        } = raw;

        let sort_by = match sort_by {
            Some(value) => {
                SortBy::parse(&value).ok_or(QueryValidationError::UnknownSortBy { value })?
            }
            None => SortBy::default(),
        };
        let order = match order {
            Some(value) => {
                SortOrder::parse(&value).ok_or(QueryValidationError::UnknownOrder { value })?
            }
            None => SortOrder::default(),
        };
        let page = PageRequest::from_raw(limit.as_deref(), page.as_deref())?.unwrap_or_default();
        let topic = topic.and_then(TopicSlug::for_lookup);

        Ok(Self::new(topic, sort_by, order, page))
    }

    /// Equality filter on the article topic, if any.
    pub fn topic(&self) -> Option<&TopicSlug> {
        self.topic.as_ref()
    }

    /// Primary sort key.
    pub fn sort_by(&self) -> SortBy {
        self.sort_by
    }

    /// Sort direction, applied to both the primary and the tie-break key.
    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Pagination window.
    pub fn page(&self) -> PageRequest {
        self.page
    }
}

/// Rejections raised while compiling a query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryValidationError {
    #[error("sort_by must be one of topic, created_at, votes, author, title, comment_count")]
    UnknownSortBy { value: String },
    #[error("order must be asc or desc")]
    UnknownOrder { value: String },
    #[error("limit must be a positive integer")]
    InvalidLimit { value: String },
    #[error("page must be a positive integer")]
    InvalidPage { value: String },
}

impl QueryValidationError {
    fn field(&self) -> &'static str {
        match self {
            Self::UnknownSortBy { .. } => "sort_by",
            Self::UnknownOrder { .. } => "order",
            Self::InvalidLimit { .. } => "limit",
            Self::InvalidPage { .. } => "page",
        }
    }

    fn value(&self) -> &str {
        match self {
            Self::UnknownSortBy { value }
            | Self::UnknownOrder { value }
            | Self::InvalidLimit { value }
            | Self::InvalidPage { value } => value,
        }
    }
}

impl From<QueryValidationError> for Error {
    fn from(err: QueryValidationError) -> Self {
        let details = json!({
            "field": err.field(),
            "value": err.value(),
            "code": "invalid_query_parameter",
        });
        Self::malformed_input(err.to_string()).with_details(details)
    }
}
