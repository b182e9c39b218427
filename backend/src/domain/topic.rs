//! Topic records.

use super::TopicSlug;

/// A topic articles are filed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    /// Unique slug.
    pub slug: TopicSlug,
    /// Free-text description.
    pub description: String,
}
