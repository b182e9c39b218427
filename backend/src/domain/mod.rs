//! Domain primitives, the error taxonomy and the services behind the
//! driving ports.
//!
//! Purpose: keep the query compiler, existence checks, aggregation and
//! mutation rules free of transport and storage concerns. Storage failures
//! enter the domain only as [`ports::StorageError`] and leave it only after
//! [`error_classifier::classify`].

pub mod aggregation;
pub mod article;
pub mod article_query;
pub mod article_service;
pub mod comment;
pub mod comment_service;
pub mod directory_service;
pub mod error;
pub mod error_classifier;
pub mod existence;
pub mod identifiers;
pub mod ports;
pub mod topic;
pub mod trace_id;
pub mod user;
pub mod votes;

pub use self::aggregation::ArticlePage;
pub use self::article::{
    Article, ArticleDraft, ArticleSummary, ArticleValidationError, DEFAULT_ARTICLE_IMG_URL,
    NewArticle,
};
pub use self::article_service::ArticleService;
pub use self::comment::{Comment, CommentDraft, CommentValidationError, NewComment};
pub use self::comment_service::CommentService;
pub use self::directory_service::DirectoryService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identifiers::{
    ArticleId, CommentId, IdentifierValidationError, KeyValidationError, TopicSlug, Username,
};
pub use self::topic::Topic;
pub use self::trace_id::TraceId;
pub use self::user::User;
pub use self::votes::VoteDelta;
