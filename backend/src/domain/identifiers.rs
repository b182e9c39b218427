//! Validated identifiers for articles, comments, topics and users.

use std::fmt;
use std::str::FromStr;

/// Validation errors for numeric record identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierValidationError {
    /// The raw identifier was empty.
    #[error("identifier must not be empty")]
    Empty,
    /// The raw identifier contained something other than ASCII digits.
    #[error("identifier must contain only digits")]
    NotNumeric,
    /// The identifier was zero or does not fit a 32-bit signed integer.
    #[error("identifier must be between 1 and {max}", max = i32::MAX)]
    OutOfRange,
}

/// Validation errors for textual keys such as slugs and usernames.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyValidationError {
    /// The key was blank.
    #[error("{field} must not be empty")]
    Empty {
        /// Name of the key being validated.
        field: &'static str,
    },
}

fn parse_record_id(raw: &str) -> Result<i32, IdentifierValidationError> {
    if raw.is_empty() {
        return Err(IdentifierValidationError::Empty);
    }
    if !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(IdentifierValidationError::NotNumeric);
    }
    match raw.parse::<i32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(IdentifierValidationError::OutOfRange),
    }
}

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(i32);

        impl $name {
            /// Wrap a stored identifier, rejecting non-positive values.
            pub fn new(value: i32) -> Result<Self, IdentifierValidationError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(IdentifierValidationError::OutOfRange)
                }
            }

            /// Underlying integer value.
            pub fn get(self) -> i32 {
                self.0
            }
        }

        impl FromStr for $name {
            type Err = IdentifierValidationError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                parse_record_id(raw).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id! {
    /// Identifier of an article.
    ///
    /// # Examples
    /// ```
    /// use news_backend::domain::ArticleId;
    ///
    /// let id: ArticleId = "12".parse().expect("valid id");
    /// assert_eq!(id.get(), 12);
    /// assert!("12a".parse::<ArticleId>().is_err());
    /// ```
    ArticleId
}

record_id! {
    /// Identifier of a comment.
    CommentId
}

macro_rules! text_key {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            /// Validate and wrap the key.
            pub fn new(value: impl Into<String>) -> Result<Self, KeyValidationError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(KeyValidationError::Empty { field: $field });
                }
                Ok(Self(value))
            }

            /// Wrap a client-supplied key used only to look a row up. Only
            /// the empty string is treated as absent; anything else is kept
            /// verbatim so storage decides whether it exists.
            pub fn for_lookup(value: impl Into<String>) -> Option<Self> {
                let value = value.into();
                (!value.is_empty()).then_some(Self(value))
            }

            /// Borrow the key as a string slice.
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

text_key! {
    /// Unique slug naming a topic.
    TopicSlug, "topic"
}

text_key! {
    /// Unique username keying a user.
    Username, "username"
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("1", 1)]
    #[case("0042", 42)]
    #[case("2147483647", i32::MAX)]
    fn parses_positive_digit_strings(#[case] raw: &str, #[case] expected: i32) {
        let id: ArticleId = raw.parse().expect("valid identifier");
        assert_eq!(id.get(), expected);
    }

    #[rstest]
    #[case("", IdentifierValidationError::Empty)]
    #[case("abc", IdentifierValidationError::NotNumeric)]
    #[case("-1", IdentifierValidationError::NotNumeric)]
    #[case("1.5", IdentifierValidationError::NotNumeric)]
    #[case(" 1", IdentifierValidationError::NotNumeric)]
    #[case("0", IdentifierValidationError::OutOfRange)]
    #[case("2147483648", IdentifierValidationError::OutOfRange)]
    fn rejects_malformed_identifiers(
        #[case] raw: &str,
        #[case] expected: IdentifierValidationError,
    ) {
        assert_eq!(raw.parse::<CommentId>(), Err(expected));
    }

    #[rstest]
    fn new_rejects_non_positive_values() {
        assert!(ArticleId::new(0).is_err());
        assert!(CommentId::new(-4).is_err());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn text_keys_reject_blank_values(#[case] raw: &str) {
        assert!(TopicSlug::new(raw).is_err());
        assert!(Username::new(raw).is_err());
    }

    #[rstest]
    #[case("", None)]
    #[case("  ", Some("  "))]
    #[case("mitch", Some("mitch"))]
    fn lookup_keys_only_drop_empty_values(#[case] raw: &str, #[case] expected: Option<&str>) {
        let key = TopicSlug::for_lookup(raw);
        assert_eq!(key.as_ref().map(TopicSlug::as_str), expected);
    }

    #[rstest]
    fn text_key_error_names_the_field() {
        let err = Username::new("").expect_err("blank username");
        assert_eq!(err.to_string(), "username must not be empty");
    }
}
