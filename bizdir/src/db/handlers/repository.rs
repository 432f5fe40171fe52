//! Base repository trait for store operations.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Contains the Repository trait.
///
/// A repository is a typed data access layer over one collection of the document store. It
/// provides methods for creating, reading, updating, and deleting entities, as well as listing
/// them with simple filters.
use crate::db::errors::{DbError, Result};
use crate::db::store::Document;

/// Base repository trait providing common store operations
///
/// This trait has separate associated types for create requests, update requests, and responses.
#[async_trait::async_trait]
pub trait Repository {
    /// The request type for creating entities
    type CreateRequest;

    /// The request type for updating entities
    type UpdateRequest;

    /// The response/DTO type returned by operations
    type Response;

    /// The identifier type for lookups
    type Id: Send + Sync;

    /// The filter type for list operations
    type Filter: Send + Sync;

    /// Create a new entity
    async fn create(&self, request: &Self::CreateRequest) -> Result<Self::Response>;

    /// Get an entity by ID
    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Response>>;

    /// List entities with filtering and pagination
    async fn list(&self, filter: &Self::Filter) -> Result<Vec<Self::Response>>;

    /// Count entities matching a filter, ignoring its pagination
    async fn count(&self, filter: &Self::Filter) -> Result<i64>;

    /// Delete an entity by ID
    async fn delete(&self, id: Self::Id) -> Result<bool>;

    /// Update an entity by ID
    async fn update(&self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response>;
}

/// Serialize a typed model into a store document
pub(crate) fn to_document<T: Serialize>(value: &T) -> Result<Document> {
    match serde_json::to_value(value)? {
        Value::Object(document) => Ok(document),
        other => Err(DbError::Validation {
            message: format!("expected a JSON object, got {other}"),
        }),
    }
}

/// Deserialize a store document into a typed model
pub(crate) fn from_document<T: DeserializeOwned>(document: Document) -> Result<T> {
    Ok(serde_json::from_value(Value::Object(document))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        id: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    }

    #[test]
    fn test_document_conversion() {
        let document = to_document(&Sample { id: 3, caption: None }).unwrap();
        assert_eq!(document.len(), 1);
        assert_eq!(from_document::<Sample>(document).unwrap(), Sample { id: 3, caption: None });
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(matches!(to_document(&5), Err(DbError::Validation { .. })));
    }
}
