//! In-memory document store.
//!
//! Stores every collection in a `BTreeMap` keyed by id behind a single lock. All unique index
//! checks happen while the write lock is held, so they are atomic with the write they guard.
//! Suitable for tests and single-process deployments; data is lost on restart.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::instrument;

use super::{Document, DocumentStore, Filter, Sort, compare_values, document_id, values_equal};
use crate::db::errors::{DbError, Result};
use crate::types::Collection;

type Documents = BTreeMap<i64, Document>;

#[derive(Clone, Default)]
pub struct InMemoryStore {
    collections: Arc<RwLock<HashMap<Collection, Documents>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a unique index of `collection` that `candidate` would collide on.
    ///
    /// `replacing` is the id of the document being overwritten, which never conflicts with itself.
    /// Documents missing any indexed field are not indexed (sparse semantics).
    fn conflicting_index(collection: Collection, documents: &Documents, candidate: &Document, replacing: Option<i64>) -> Option<&'static str> {
        collection.unique_indexes().iter().find_map(|index| {
            let key: Option<Vec<&Value>> = index.fields.iter().map(|field| candidate.get(*field)).collect();
            let key = key?;

            let collides = documents.iter().filter(|(id, _)| Some(**id) != replacing).any(|(_, existing)| {
                index
                    .fields
                    .iter()
                    .zip(&key)
                    .all(|(field, value)| existing.get(*field).is_some_and(|v| values_equal(v, value)))
            });

            collides.then_some(index.name)
        })
    }

    fn first_match(documents: &Documents, filter: &Filter) -> Option<i64> {
        documents.iter().find(|(_, doc)| filter.matches(doc)).map(|(id, _)| *id)
    }
}

#[async_trait::async_trait]
impl DocumentStore for InMemoryStore {
    #[instrument(skip(self, filter), fields(collection = %collection), err)]
    async fn find_page(&self, collection: Collection, filter: &Filter, skip: i64, limit: Option<i64>) -> Result<Vec<Document>> {
        let collections = self.collections.read();
        let Some(documents) = collections.get(&collection) else {
            return Ok(Vec::new());
        };

        let matching = documents.values().filter(|doc| filter.matches(doc)).skip(skip.max(0) as usize);
        let page = match limit {
            Some(limit) => matching.take(limit.max(0) as usize).cloned().collect(),
            None => matching.cloned().collect(),
        };

        Ok(page)
    }

    #[instrument(skip(self, filter), fields(collection = %collection), err)]
    async fn count(&self, collection: Collection, filter: &Filter) -> Result<i64> {
        let collections = self.collections.read();
        let count = collections
            .get(&collection)
            .map(|documents| documents.values().filter(|doc| filter.matches(doc)).count())
            .unwrap_or(0);

        Ok(count as i64)
    }

    #[instrument(skip(self, filter), fields(collection = %collection), err)]
    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>> {
        let collections = self.collections.read();
        Ok(collections
            .get(&collection)
            .and_then(|documents| documents.values().find(|doc| filter.matches(doc)).cloned()))
    }

    #[instrument(skip(self, filter), fields(collection = %collection, sort = %sort.field), err)]
    async fn find_one_sorted(&self, collection: Collection, filter: &Filter, sort: &Sort) -> Result<Option<Document>> {
        let collections = self.collections.read();
        let Some(documents) = collections.get(&collection) else {
            return Ok(None);
        };

        let null = Value::Null;
        let key = |doc: &Document| doc.get(&sort.field).unwrap_or(&null).clone();
        let matching = documents.values().filter(|doc| filter.matches(doc));

        // Ties keep the lowest id, matching the natural order used elsewhere
        let best = matching.reduce(|best, doc| {
            if compare_values(&key(doc), &key(best)).is_gt() { doc } else { best }
        });

        Ok(best.cloned())
    }

    #[instrument(skip(self, document), fields(collection = %collection), err)]
    async fn insert(&self, collection: Collection, document: Document) -> Result<Document> {
        let id = document_id(&document)?;

        let mut collections = self.collections.write();
        let documents = collections.entry(collection).or_default();

        if let Some(index) = Self::conflicting_index(collection, documents, &document, None) {
            return Err(DbError::unique_violation(collection.as_str(), index));
        }

        documents.insert(id, document.clone());
        Ok(document)
    }

    #[instrument(skip(self, filter, patch), fields(collection = %collection), err)]
    async fn update_one(&self, collection: Collection, filter: &Filter, patch: Document) -> Result<Option<Document>> {
        let mut collections = self.collections.write();
        let Some(documents) = collections.get_mut(&collection) else {
            return Ok(None);
        };
        let Some(old_id) = Self::first_match(documents, filter) else {
            return Ok(None);
        };

        let mut updated = documents.get(&old_id).cloned().unwrap_or_default();
        updated.extend(patch);
        let new_id = document_id(&updated)?;

        if let Some(index) = Self::conflicting_index(collection, documents, &updated, Some(old_id)) {
            return Err(DbError::unique_violation(collection.as_str(), index));
        }

        documents.remove(&old_id);
        documents.insert(new_id, updated.clone());
        Ok(Some(updated))
    }

    #[instrument(skip(self, filter), fields(collection = %collection), err)]
    async fn delete_one(&self, collection: Collection, filter: &Filter) -> Result<bool> {
        let mut collections = self.collections.write();
        let Some(documents) = collections.get_mut(&collection) else {
            return Ok(false);
        };

        Ok(match Self::first_match(documents, filter) {
            Some(id) => documents.remove(&id).is_some(),
            None => false,
        })
    }

    #[instrument(skip(self, document), fields(collection = %collection), err)]
    async fn upsert_by_id(&self, collection: Collection, document: Document) -> Result<()> {
        let id = document_id(&document)?;

        let mut collections = self.collections.write();
        let documents = collections.entry(collection).or_default();

        if let Some(index) = Self::conflicting_index(collection, documents, &document, Some(id)) {
            return Err(DbError::unique_violation(collection.as_str(), index));
        }

        documents.insert(id, document);
        Ok(())
    }
}
