//! Document store adapter.
//!
//! The [`DocumentStore`] trait is the only way the application talks to persistence. It models a
//! document database: collections of JSON objects, each carrying an integer `id`, selected with
//! equality [`Filter`]s. Two implementations are provided:
//!
//! - [`memory::InMemoryStore`]: process-local, used by tests and `database.type: memory`
//! - [`postgres::PostgresStore`]: JSONB documents in PostgreSQL
//!
//! Both enforce the unique indexes declared by [`Collection::unique_indexes`] atomically, so two
//! concurrent writers cannot both insert the same id or the same unique key tuple.

use std::cmp::Ordering;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::db::errors::{DbError, Result};
use crate::types::Collection;

pub mod memory;
pub mod postgres;

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;

/// A stored JSON object
pub type Document = Map<String, Value>;

/// Handle shared by every request handler
pub type SharedStore = Arc<dyn DocumentStore>;

/// Conjunction of equality predicates over document fields.
///
/// An empty filter matches every document in a collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    predicates: Vec<(String, Value)>,
}

impl Filter {
    /// Filter matching every document
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter matching the document with the given id
    pub fn by_id(id: i64) -> Self {
        Self::all().eq("id", id)
    }

    /// Add an equality predicate on `field`
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.predicates.push((field.into(), value.into()));
        self
    }

    pub fn predicates(&self) -> &[(String, Value)] {
        &self.predicates
    }

    pub fn matches(&self, document: &Document) -> bool {
        self.predicates
            .iter()
            .all(|(field, expected)| document.get(field).is_some_and(|actual| values_equal(actual, expected)))
    }

    /// The filter as a JSON object, suitable for containment queries (`@>`)
    pub fn to_document(&self) -> Document {
        self.predicates.iter().cloned().collect()
    }
}

/// Descending ordering on a single document field, ties broken by lowest id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
}

impl Sort {
    pub fn desc(field: impl Into<String>) -> Self {
        Self { field: field.into() }
    }
}

/// Generic query interface to the external document store.
///
/// Every method is a single atomic request. Nothing here spans more than one call, so callers that
/// check and then write must rely on the unique indexes to catch races.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Documents matching `filter`, ordered by id ascending, after skipping `skip` of them.
    /// `limit: None` returns everything that remains.
    async fn find_page(&self, collection: Collection, filter: &Filter, skip: i64, limit: Option<i64>) -> Result<Vec<Document>>;

    /// Number of documents matching `filter`
    async fn count(&self, collection: Collection, filter: &Filter) -> Result<i64>;

    /// First document (by id) matching `filter`
    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>>;

    /// Document matching `filter` with the greatest value of the sort field
    async fn find_one_sorted(&self, collection: Collection, filter: &Filter, sort: &Sort) -> Result<Option<Document>>;

    /// Insert a new document. Fails with [`DbError::UniqueViolation`] when any unique index of the
    /// collection already holds the same key.
    async fn insert(&self, collection: Collection, document: Document) -> Result<Document>;

    /// Shallow-merge `patch` into the first document matching `filter` and return the result
    async fn update_one(&self, collection: Collection, filter: &Filter, patch: Document) -> Result<Option<Document>>;

    /// Delete the first document matching `filter`, returning whether one was found
    async fn delete_one(&self, collection: Collection, filter: &Filter) -> Result<bool>;

    /// Replace the document with the same id, inserting it when absent
    async fn upsert_by_id(&self, collection: Collection, document: Document) -> Result<()>;

    /// Release any resources held by the store
    async fn close(&self) {}
}

/// Extract the integer `id` of a document
pub fn document_id(document: &Document) -> Result<i64> {
    document.get("id").and_then(Value::as_i64).ok_or_else(|| DbError::Validation {
        message: "document must carry an integer `id`".to_string(),
    })
}

/// Equality that treats `5` and `5.0` as the same number, like document stores do
pub(crate) fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => x.as_f64() == y.as_f64(),
        },
        _ => a == b,
    }
}

/// Total order over JSON values used for sorted finds: null < bool < number < string < other
pub(crate) fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => x
                .as_f64()
                .unwrap_or(f64::NAN)
                .partial_cmp(&y.as_f64().unwrap_or(f64::NAN))
                .unwrap_or(Ordering::Equal),
        },
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(Filter::all().matches(&doc(json!({"id": 1}))));
        assert!(Filter::all().matches(&Document::new()));
    }

    #[test]
    fn test_filter_requires_every_predicate() {
        let filter = Filter::all().eq("userid", 5).eq("businessid", 2);
        assert!(filter.matches(&doc(json!({"id": 1, "userid": 5, "businessid": 2}))));
        assert!(!filter.matches(&doc(json!({"id": 1, "userid": 5, "businessid": 3}))));
        assert!(!filter.matches(&doc(json!({"id": 1, "userid": 5}))));
    }

    #[test]
    fn test_numbers_compare_by_value() {
        assert!(values_equal(&json!(5), &json!(5.0)));
        assert!(!values_equal(&json!(5), &json!("5")));
        assert_eq!(compare_values(&json!(10), &json!(9)), Ordering::Greater);
        assert_eq!(compare_values(&json!("a"), &json!(1)), Ordering::Greater);
    }

    #[test]
    fn test_filter_to_document() {
        let filter = Filter::all().eq("name", "Joe's").eq("address", "1 Main St");
        assert_eq!(Value::Object(filter.to_document()), json!({"name": "Joe's", "address": "1 Main St"}));
    }

    #[test]
    fn test_document_id() {
        assert_eq!(document_id(&doc(json!({"id": 4}))).unwrap(), 4);
        assert!(matches!(document_id(&doc(json!({"id": "4"}))), Err(DbError::Validation { .. })));
    }
}
