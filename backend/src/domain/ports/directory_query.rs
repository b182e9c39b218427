//! Driving ports for the read-only topic and user directories.

use async_trait::async_trait;

use crate::domain::existence::not_found;
use crate::domain::{Error, Topic, User, Username};

/// Use-case port for listing topics.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TopicsQuery: Send + Sync {
    /// Every topic.
    async fn list_topics(&self) -> Result<Vec<Topic>, Error>;
}

/// Use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every user.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// One user by username.
    async fn get_user(&self, username: &Username) -> Result<User, Error>;
}

/// Fixture directory used when no database is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDirectoryQuery;

#[async_trait]
impl TopicsQuery for FixtureDirectoryQuery {
    async fn list_topics(&self) -> Result<Vec<Topic>, Error> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl UsersQuery for FixtureDirectoryQuery {
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        Ok(Vec::new())
    }

    async fn get_user(&self, username: &Username) -> Result<User, Error> {
        Err(not_found("user", username))
    }
}
