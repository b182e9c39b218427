//! Port for reading users.

use async_trait::async_trait;

use crate::domain::{User, Username};

use super::StorageError;

/// Read-only access to users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Whether a user with this username exists.
    async fn exists(&self, username: &Username) -> Result<bool, StorageError>;

    /// All users ordered by username.
    async fn list(&self) -> Result<Vec<User>, StorageError>;

    /// Fetch a single user.
    async fn find(&self, username: &Username) -> Result<Option<User>, StorageError>;
}
