//! Raw failure vocabulary shared by every repository port.
//!
//! Repository adapters report failures as [`StorageError`] without deciding
//! what they mean to a caller. Only [`crate::domain::error_classifier`]
//! interprets them.

use std::fmt;

use super::define_port_error;

/// Storage-engine error condition, modelled on PostgreSQL SQLSTATE classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageErrorCode {
    /// `22P02`: a value could not be parsed as the column type.
    InvalidTextRepresentation,
    /// `23502`: a required column was null.
    NotNullViolation,
    /// `22003`: a numeric value does not fit its column.
    NumericValueOutOfRange,
    /// `23503`: a referenced row is missing.
    ForeignKeyViolation,
    /// `23505`: a unique key already exists.
    UniqueViolation,
    /// `23514`: a check constraint rejected the row.
    CheckViolation,
    /// Any other condition, carrying its SQLSTATE when known.
    Other(Option<String>),
}

impl StorageErrorCode {
    /// Map a five-character SQLSTATE onto a known condition.
    ///
    /// # Examples
    /// ```
    /// use news_backend::domain::ports::StorageErrorCode;
    ///
    /// assert_eq!(
    ///     StorageErrorCode::from_sqlstate("23503"),
    ///     StorageErrorCode::ForeignKeyViolation
    /// );
    /// ```
    pub fn from_sqlstate(sqlstate: &str) -> Self {
        match sqlstate {
            "22P02" => Self::InvalidTextRepresentation,
            "23502" => Self::NotNullViolation,
            "22003" => Self::NumericValueOutOfRange,
            "23503" => Self::ForeignKeyViolation,
            "23505" => Self::UniqueViolation,
            "23514" => Self::CheckViolation,
            other => Self::Other(Some(other.to_owned())),
        }
    }

    /// SQLSTATE for the condition, if known.
    pub fn sqlstate(&self) -> Option<&str> {
        match self {
            Self::InvalidTextRepresentation => Some("22P02"),
            Self::NotNullViolation => Some("23502"),
            Self::NumericValueOutOfRange => Some("22003"),
            Self::ForeignKeyViolation => Some("23503"),
            Self::UniqueViolation => Some("23505"),
            Self::CheckViolation => Some("23514"),
            Self::Other(code) => code.as_deref(),
        }
    }
}

impl fmt::Display for StorageErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sqlstate().unwrap_or("unknown"))
    }
}

define_port_error! {
    /// Errors raised by repository adapters.
    pub enum StorageError {
        /// The storage backend could not be reached.
        Connection { message: String } =>
            "storage connection failed: {message}",
        /// The storage engine rejected a statement.
        Database { code: StorageErrorCode, message: String } =>
            "storage statement failed [{code}]: {message}",
        /// A returned row could not be mapped onto a domain value.
        Decode { message: String } =>
            "storage row could not be decoded: {message}",
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("22P02", StorageErrorCode::InvalidTextRepresentation)]
    #[case("23502", StorageErrorCode::NotNullViolation)]
    #[case("22003", StorageErrorCode::NumericValueOutOfRange)]
    #[case("23503", StorageErrorCode::ForeignKeyViolation)]
    #[case("23505", StorageErrorCode::UniqueViolation)]
    #[case("23514", StorageErrorCode::CheckViolation)]
    fn known_sqlstates_round_trip(#[case] sqlstate: &str, #[case] expected: StorageErrorCode) {
        let code = StorageErrorCode::from_sqlstate(sqlstate);
        assert_eq!(code, expected);
        assert_eq!(code.sqlstate(), Some(sqlstate));
    }

    #[rstest]
    fn unknown_sqlstate_is_preserved() {
        let code = StorageErrorCode::from_sqlstate("40001");
        assert_eq!(code, StorageErrorCode::Other(Some("40001".to_owned())));
        assert_eq!(code.to_string(), "40001");
    }

    #[rstest]
    fn database_error_formats_code_and_message() {
        let err = StorageError::database(StorageErrorCode::ForeignKeyViolation, "fk broke");
        assert_eq!(err.to_string(), "storage statement failed [23503]: fk broke");
    }
}
