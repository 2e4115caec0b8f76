use crate::config::error::ConfigError;
use diesel_async::pooled_connection::PoolError;
use thiserror::Error;

/// Application-wide error type that represents all possible errors in the system.
///
/// Storage failures keep the driver error as `source` so the HTTP layer can
/// surface its text verbatim.
#[derive(Error, Debug)]
pub enum AppError {
    /// Bad request error with descriptive message
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Database operation error with operation context
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool error
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Text of the innermost cause, or the error itself when it has none.
    pub fn root_message(&self) -> String {
        match self {
            AppError::BadRequest { message } => message.clone(),
            AppError::Database { source, .. }
            | AppError::Configuration { source, .. }
            | AppError::ConnectionPool { source }
            | AppError::Internal { source } => source.to_string(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<PoolError> for AppError {
    fn from(error: PoolError) -> Self {
        AppError::ConnectionPool {
            source: anyhow::Error::new(error),
        }
    }
}

impl From<bb8::RunError<PoolError>> for AppError {
    fn from(error: bb8::RunError<PoolError>) -> Self {
        AppError::ConnectionPool {
            source: anyhow::Error::new(error),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = match &error {
            ConfigError::ValidationError { field, .. } => field.clone(),
            _ => "configuration".to_string(),
        };
        AppError::Configuration {
            key,
            source: anyhow::Error::new(error),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_message_exposes_source_text() {
        let error = AppError::Database {
            operation: "list users".to_string(),
            source: anyhow::anyhow!("relation \"users\" does not exist"),
        };
        assert_eq!(error.root_message(), "relation \"users\" does not exist");
        assert_eq!(error.to_string(), "Database operation failed: list users");
    }

    #[test]
    fn test_root_message_bad_request() {
        let error = AppError::BadRequest {
            message: "EOF while parsing a value".to_string(),
        };
        assert_eq!(error.root_message(), "EOF while parsing a value");
    }

    #[test]
    fn test_config_error_keeps_field_as_key() {
        let error: AppError = ConfigError::validation("server.port", "Port must be set").into();
        match error {
            AppError::Configuration { key, .. } => assert_eq!(key, "server.port"),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_pool_error_maps_to_connection_pool() {
        let error: AppError = PoolError::ConnectionError(
            diesel::ConnectionError::BadConnection("connection refused".to_string()),
        )
        .into();
        match &error {
            AppError::ConnectionPool { .. } => {
                assert!(error.root_message().contains("connection refused"))
            }
            other => panic!("Expected ConnectionPool error, got {:?}", other),
        }
    }

    #[test]
    fn test_anyhow_maps_to_internal() {
        let error: AppError = anyhow::anyhow!("boom").into();
        assert!(matches!(error, AppError::Internal { .. }));
    }
}
