//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL through `diesel-async` and a `bb8` connection pool.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types.
//! - **Internal models**: row structs (`models.rs`) and the schema
//!   (`schema.rs`) never leave this module.
//! - **One error shape**: every failure becomes a
//!   [`StorageError`](crate::domain::ports::StorageError) carrying the
//!   PostgreSQL condition, left for the domain classifier to interpret.
//!
//! # Example
//!
//! ```ignore
//! use news_backend::outbound::persistence::{DbPool, DieselArticleRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/nc_news")).await?;
//! let articles = DieselArticleRepository::new(pool);
//! ```

mod diesel_article_repository;
mod diesel_comment_repository;
mod diesel_error_mapping;
mod diesel_topic_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_article_repository::DieselArticleRepository;
pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_topic_repository::DieselTopicRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
