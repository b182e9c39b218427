//! User records. Users are read-only in this service.

use super::Username;

/// A registered user who can author articles and comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique username.
    pub username: Username,
    /// Display name.
    pub name: String,
    /// Avatar image location.
    pub avatar_url: String,
}
