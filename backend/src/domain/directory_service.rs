//! Directory service implementing the topic and user read ports.

use std::sync::Arc;

use async_trait::async_trait;

use super::error_classifier::classify;
use super::existence::not_found;
use super::ports::{TopicRepository, TopicsQuery, UserRepository, UsersQuery};
use super::{Error, Topic, User, Username};

/// Read-only access to topics and users.
pub struct DirectoryService<T, U> {
    topics: Arc<T>,
    users: Arc<U>,
}

impl<T, U> Clone for DirectoryService<T, U> {
    fn clone(&self) -> Self {
        Self {
            topics: Arc::clone(&self.topics),
            users: Arc::clone(&self.users),
        }
    }
}

impl<T, U> DirectoryService<T, U> {
    /// Create a service over the topic and user repositories.
    pub fn new(topics: Arc<T>, users: Arc<U>) -> Self {
        Self { topics, users }
    }
}

#[async_trait]
impl<T, U> TopicsQuery for DirectoryService<T, U>
where
    T: TopicRepository,
    U: UserRepository,
{
    async fn list_topics(&self) -> Result<Vec<Topic>, Error> {
        self.topics.list().await.map_err(classify)
    }
}

#[async_trait]
impl<T, U> UsersQuery for DirectoryService<T, U>
where
    T: TopicRepository,
    U: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.users.list().await.map_err(classify)
    }

    async fn get_user(&self, username: &Username) -> Result<User, Error> {
        self.users
            .find(username)
            .await
            .map_err(classify)?
            .ok_or_else(|| not_found("user", username))
    }
}
