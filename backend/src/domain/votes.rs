//! Signed vote increments.

/// Signed amount to add to a vote tally.
///
/// Zero is a valid increment and leaves the tally unchanged. Tallies have no
/// lower bound and may go negative.
///
/// # Examples
/// ```
/// use news_backend::domain::VoteDelta;
///
/// assert_eq!(VoteDelta::new(-30).apply(10), Some(-20));
/// assert_eq!(VoteDelta::new(1).apply(i32::MAX), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoteDelta(i32);

impl VoteDelta {
    /// Wrap a signed increment.
    pub fn new(delta: i32) -> Self {
        Self(delta)
    }

    /// Underlying increment.
    pub fn get(self) -> i32 {
        self.0
    }

    /// Apply the increment to a tally, returning `None` on overflow.
    pub fn apply(self, votes: i32) -> Option<i32> {
        votes.checked_add(self.0)
    }
}

impl From<i32> for VoteDelta {
    fn from(value: i32) -> Self {
        Self(value)
    }
}
