use crate::error::AppError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Utility for converting diesel errors into `AppError::Database`.
///
/// Every storage failure becomes a server error; the driver message is kept
/// intact as the source so callers see exactly what PostgreSQL reported.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error, tagging it with the failed operation.
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        if let DieselError::DatabaseError(kind, info) = &error {
            tracing::debug!(
                kind = Self::kind_name(kind),
                constraint = info.constraint_name().unwrap_or("-"),
                operation = %operation,
                "Database rejected statement"
            );
        }

        AppError::Database {
            operation: operation.to_string(),
            source: anyhow::Error::from(error),
        }
    }

    fn kind_name(kind: &DatabaseErrorKind) -> &'static str {
        match kind {
            DatabaseErrorKind::UniqueViolation => "unique_violation",
            DatabaseErrorKind::ForeignKeyViolation => "foreign_key_violation",
            DatabaseErrorKind::NotNullViolation => "not_null_violation",
            DatabaseErrorKind::CheckViolation => "check_violation",
            DatabaseErrorKind::ClosedConnection => "closed_connection",
            DatabaseErrorKind::SerializationFailure => "serialization_failure",
            DatabaseErrorKind::ReadOnlyTransaction => "read_only_transaction",
            _ => "unknown",
        }
    }
}
