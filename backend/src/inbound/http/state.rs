//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    ArticleRepository, ArticlesCommand, ArticlesQuery, CommentRepository, CommentsCommand,
    FixtureArticlesCommand, FixtureArticlesQuery, FixtureCommentsCommand, FixtureDirectoryQuery,
    TopicRepository, TopicsQuery, UserRepository, UsersQuery,
};
use crate::domain::{ArticleService, CommentService, DirectoryService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub articles: Arc<dyn ArticlesQuery>,
    pub article_commands: Arc<dyn ArticlesCommand>,
    pub comment_commands: Arc<dyn CommentsCommand>,
    pub topics: Arc<dyn TopicsQuery>,
    pub users: Arc<dyn UsersQuery>,
}

impl HttpState {
    /// State backed by fixture ports: every collection is empty and every
    /// lookup is not found.
    ///
    /// # Examples
    /// ```
    /// use news_backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::fixtures();
    /// let _topics = state.topics.clone();
    /// ```
    pub fn fixtures() -> Self {
        Self {
            articles: Arc::new(FixtureArticlesQuery),
            article_commands: Arc::new(FixtureArticlesCommand),
            comment_commands: Arc::new(FixtureCommentsCommand),
            topics: Arc::new(FixtureDirectoryQuery),
            users: Arc::new(FixtureDirectoryQuery),
        }
    }

    /// Wire the domain services over one set of repositories.
    pub fn from_repositories<A, C, T, U>(
        articles: Arc<A>,
        comments: Arc<C>,
        topics: Arc<T>,
        users: Arc<U>,
    ) -> Self
    where
        A: ArticleRepository + 'static,
        C: CommentRepository + 'static,
        T: TopicRepository + 'static,
        U: UserRepository + 'static,
    {
        let article_service = ArticleService::new(
            Arc::clone(&articles),
            Arc::clone(&comments),
            Arc::clone(&topics),
            Arc::clone(&users),
        );
        let directory = DirectoryService::new(topics, users);
        Self {
            articles: Arc::new(article_service.clone()),
            article_commands: Arc::new(article_service),
            comment_commands: Arc::new(CommentService::new(comments)),
            topics: Arc::new(directory.clone()),
            users: Arc::new(directory),
        }
    }
}
