//! Translation of Diesel and pool failures into [`StorageError`].
//!
//! Diesel only names a handful of PostgreSQL conditions. Invalid text
//! representation and numeric overflow arrive as unknown database errors, so
//! they are recognised from the server message.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{StorageError, StorageErrorCode};

use super::pool::PoolError;

pub(super) fn map_pool_error(error: PoolError) -> StorageError {
    StorageError::connection(error.into_message())
}

fn code_from_message(message: &str) -> StorageErrorCode {
    let lower = message.to_lowercase();
    if lower.contains("invalid input syntax") {
        StorageErrorCode::InvalidTextRepresentation
    } else if lower.contains("out of range") {
        StorageErrorCode::NumericValueOutOfRange
    } else {
        StorageErrorCode::Other(None)
    }
}

fn code_for(kind: &DatabaseErrorKind, message: &str) -> StorageErrorCode {
    match kind {
        DatabaseErrorKind::ForeignKeyViolation => StorageErrorCode::ForeignKeyViolation,
        DatabaseErrorKind::UniqueViolation => StorageErrorCode::UniqueViolation,
        DatabaseErrorKind::NotNullViolation => StorageErrorCode::NotNullViolation,
        DatabaseErrorKind::CheckViolation => StorageErrorCode::CheckViolation,
        _ => code_from_message(message),
    }
}

/// Map a Diesel failure, logging the raw diagnostic at debug level.
pub(super) fn map_diesel_error(error: DieselError, operation: &'static str) -> StorageError {
    match error {
        DieselError::DatabaseError(kind, info) => {
            let message = info.message().to_owned();
            debug!(
                ?kind,
                %message,
                constraint = ?info.constraint_name(),
                operation,
                "diesel statement failed"
            );
            match kind {
                DatabaseErrorKind::ClosedConnection | DatabaseErrorKind::UnableToSendCommand => {
                    StorageError::connection(message)
                }
                other => StorageError::database(code_for(&other, &message), message),
            }
        }
        DieselError::DeserializationError(err) => {
            debug!(error = %err, operation, "diesel row decoding failed");
            StorageError::decode(err.to_string())
        }
        other => {
            debug!(error = %other, operation, "diesel operation failed");
            StorageError::database(StorageErrorCode::Other(None), other.to_string())
        }
    }
}
