//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters and
//! report raw [`StorageError`]s. Driving ports (`*Query`, `*Command`) are
//! implemented by domain services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod article_repository;
mod articles_command;
mod articles_query;
mod comment_repository;
mod comments_command;
mod directory_query;
mod storage_error;
mod topic_repository;
mod user_repository;

#[cfg(test)]
pub use article_repository::MockArticleRepository;
pub use article_repository::ArticleRepository;
#[cfg(test)]
pub use articles_command::MockArticlesCommand;
pub use articles_command::{ArticlesCommand, FixtureArticlesCommand};
#[cfg(test)]
pub use articles_query::MockArticlesQuery;
pub use articles_query::{ArticlesQuery, FixtureArticlesQuery};
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::CommentRepository;
#[cfg(test)]
pub use comments_command::MockCommentsCommand;
pub use comments_command::{CommentsCommand, FixtureCommentsCommand};
#[cfg(test)]
pub use directory_query::{MockTopicsQuery, MockUsersQuery};
pub use directory_query::{FixtureDirectoryQuery, TopicsQuery, UsersQuery};
pub use storage_error::{StorageError, StorageErrorCode};
#[cfg(test)]
pub use topic_repository::MockTopicRepository;
pub use topic_repository::TopicRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;
