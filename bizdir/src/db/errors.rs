use thiserror::Error;

/// Unified error type for store operations that application code can handle
#[derive(Error, Debug)]
pub enum DbError {
    /// Entity not found by the given filter
    #[error("Entity not found")]
    NotFound,

    /// Unique index violation, raised atomically by the store
    #[error("Unique constraint violation")]
    UniqueViolation {
        constraint: Option<String>,
        collection: Option<String>,
        message: String,
    },

    /// Document rejected by the store (not an object, missing or non-integer `id`, ...)
    #[error("Invalid document: {message}")]
    Validation { message: String },

    /// Catch-all for non-recoverable errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DbError {
    /// Build a unique violation for the named index of a collection
    pub fn unique_violation(collection: &str, constraint: &str) -> Self {
        DbError::UniqueViolation {
            constraint: Some(constraint.to_string()),
            collection: Some(collection.to_string()),
            message: format!("duplicate key in {collection} violates unique constraint \"{constraint}\""),
        }
    }
}

/// Convert from sqlx::Error using sqlx error categorization
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => DbError::NotFound,
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    let constraint = db_err.constraint().map(|s| s.to_string());
                    // Index names are prefixed with their collection, e.g. `reviews_userid_businessid_unique`
                    let collection = constraint
                        .as_deref()
                        .and_then(|c| c.split_once('_'))
                        .map(|(prefix, _)| prefix.to_string());

                    DbError::UniqueViolation {
                        constraint,
                        collection,
                        message: db_err.message().to_string(),
                    }
                } else if db_err.is_check_violation() {
                    DbError::Validation {
                        message: db_err.message().to_string(),
                    }
                } else {
                    DbError::Other(anyhow::Error::from(err))
                }
            }
            _ => DbError::Other(anyhow::Error::from(err)),
        }
    }
}

/// Documents that fail to (de)serialize are a programming or data error, not a client error
impl From<serde_json::Error> for DbError {
    fn from(err: serde_json::Error) -> Self {
        DbError::Other(anyhow::Error::from(err).context("document (de)serialization failed"))
    }
}

/// Type alias for store operation results
pub type Result<T> = std::result::Result<T, DbError>;
