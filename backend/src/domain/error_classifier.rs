//! Single translation point from raw storage failures to domain errors.
//!
//! | Storage condition                                   | Kind            |
//! |-----------------------------------------------------|-----------------|
//! | invalid text representation, not-null, out-of-range | malformed input |
//! | foreign-key violation                               | not found       |
//! | anything else                                       | internal        |
//!
//! The storage diagnostic is logged here and never copied into the returned
//! error, so clients only ever see the fixed messages below.

use tracing::{error, warn};

use super::Error;
use super::ports::{StorageError, StorageErrorCode};

const BAD_REQUEST: &str = "Bad Request";
const NOT_FOUND: &str = "Not Found";
const INTERNAL: &str = "Internal Server Error";

/// Classify a storage failure.
///
/// # Examples
/// ```
/// use news_backend::domain::ErrorCode;
/// use news_backend::domain::error_classifier::classify;
/// use news_backend::domain::ports::{StorageError, StorageErrorCode};
///
/// let err = classify(StorageError::database(
///     StorageErrorCode::ForeignKeyViolation,
///     "insert or update on table \"comments\" violates foreign key constraint",
/// ));
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.message(), "Not Found");
/// ```
pub fn classify(failure: StorageError) -> Error {
    match &failure {
        StorageError::Database { code, .. } => match code {
            StorageErrorCode::InvalidTextRepresentation
            | StorageErrorCode::NotNullViolation
            | StorageErrorCode::NumericValueOutOfRange => {
                warn!(error = %failure, "storage rejected malformed input");
                Error::malformed_input(BAD_REQUEST)
            }
            StorageErrorCode::ForeignKeyViolation => {
                warn!(error = %failure, "storage reported a missing referenced row");
                Error::not_found(NOT_FOUND)
            }
            StorageErrorCode::UniqueViolation
            | StorageErrorCode::CheckViolation
            | StorageErrorCode::Other(_) => unclassified(&failure),
        },
        StorageError::Connection { .. } | StorageError::Decode { .. } => unclassified(&failure),
    }
}

fn unclassified(failure: &StorageError) -> Error {
    error!(error = %failure, "unclassified storage failure");
    Error::internal(INTERNAL)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::{ErrorCode, TraceId};

    fn database(code: StorageErrorCode) -> StorageError {
        StorageError::database(code, "relation \"articles\" leaked detail")
    }

    #[rstest]
    #[case(database(StorageErrorCode::InvalidTextRepresentation), ErrorCode::MalformedInput)]
    #[case(database(StorageErrorCode::NotNullViolation), ErrorCode::MalformedInput)]
    #[case(database(StorageErrorCode::NumericValueOutOfRange), ErrorCode::MalformedInput)]
    #[case(database(StorageErrorCode::ForeignKeyViolation), ErrorCode::NotFound)]
    #[case(database(StorageErrorCode::UniqueViolation), ErrorCode::Internal)]
    #[case(database(StorageErrorCode::CheckViolation), ErrorCode::Internal)]
    #[case(database(StorageErrorCode::Other(Some("40001".to_owned()))), ErrorCode::Internal)]
    #[case(database(StorageErrorCode::Other(None)), ErrorCode::Internal)]
    #[case(StorageError::connection("pool timed out"), ErrorCode::Internal)]
    #[case(StorageError::decode("negative count"), ErrorCode::Internal)]
    fn maps_storage_conditions_to_kinds(#[case] failure: StorageError, #[case] expected: ErrorCode) {
        assert_eq!(classify(failure).code(), expected);
    }

    #[rstest]
    #[case(database(StorageErrorCode::InvalidTextRepresentation))]
    #[case(database(StorageErrorCode::ForeignKeyViolation))]
    #[case(database(StorageErrorCode::UniqueViolation))]
    fn never_leaks_storage_diagnostics(#[case] failure: StorageError) {
        let err = classify(failure);
        assert!(!err.message().contains("relation"));
        assert!(err.details().is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn classified_errors_carry_the_request_trace_id() {
        let trace_id: TraceId = "00000000-0000-0000-0000-000000000001"
            .parse()
            .expect("valid UUID");
        let err = TraceId::scope(trace_id, async {
            classify(StorageError::connection("refused"))
        })
        .await;
        assert_eq!(err.trace_id(), Some(trace_id.to_string().as_str()));
    }
}
