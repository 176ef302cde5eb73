// Error handling framework for the film store

use thiserror::Error;

/// Validation errors raised before a statement reaches the store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid field value for {field}: {reason}")]
    InvalidFieldValue { field: String, reason: String },
}

/// Database-specific errors
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Database health check failed: {0}")]
    HealthCheckFailed(String),

    #[error("Query execution failed: {0}")]
    QueryFailed(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Duplicate key violation: {0}")]
    DuplicateKey(String),

    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    #[error("Row mapping failed for column '{column}': {reason}")]
    RowMapping { column: String, reason: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl DatabaseError {
    /// True when the failure means the store could not be reached at all
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            DatabaseError::ConnectionFailed(_) | DatabaseError::HealthCheckFailed(_)
        )
    }

    /// True when the store rejected a statement
    pub fn is_query_error(&self) -> bool {
        matches!(
            self,
            DatabaseError::QueryFailed(_)
                | DatabaseError::DuplicateKey(_)
                | DatabaseError::ForeignKeyViolation(_)
                | DatabaseError::RowMapping { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound(_))
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DatabaseError::NotFound("Record not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    DatabaseError::DuplicateKey(db_err.message().to_string())
                } else if db_err.is_foreign_key_violation() {
                    DatabaseError::ForeignKeyViolation(db_err.message().to_string())
                } else {
                    DatabaseError::QueryFailed(db_err.message().to_string())
                }
            }
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_) => DatabaseError::ConnectionFailed(err.to_string()),
            sqlx::Error::ColumnNotFound(column) => DatabaseError::RowMapping {
                column,
                reason: "column missing from result set".to_string(),
            },
            sqlx::Error::ColumnDecode { index, source } => DatabaseError::RowMapping {
                column: index,
                reason: source.to_string(),
            },
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}
