//! Sequential id allocation.
//!
//! New entities get `max(id) + 1` within their collection, or `1` for an empty collection. The
//! maximum is read fresh on every call; there is no cached counter. Two concurrent creations can
//! compute the same id, in which case the store's unique id index rejects the second insert.

use tracing::instrument;

use crate::db::errors::{DbError, Result};
use crate::db::store::{DocumentStore, Filter, Sort, document_id};
use crate::types::Collection;

/// Next free id in `collection`
#[instrument(skip(store), fields(collection = %collection), err)]
pub async fn next_id(store: &dyn DocumentStore, collection: Collection) -> Result<i64> {
    let latest = store.find_one_sorted(collection, &Filter::all(), &Sort::desc("id")).await?;

    match latest {
        Some(document) => {
            let max = document_id(&document)?;
            max.checked_add(1)
                .ok_or_else(|| DbError::Other(anyhow::anyhow!("id space of {collection} exhausted at {max}")))
        }
        None => Ok(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::InMemoryStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_empty_collection_starts_at_one() {
        let store = InMemoryStore::new();
        assert_eq!(next_id(&store, Collection::Businesses).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_next_id_follows_maximum() {
        let store = InMemoryStore::new();
        for id in [3, 7, 2] {
            let document = json!({"id": id, "userid": id, "businessid": 1});
            store
                .insert(Collection::Reviews, document.as_object().cloned().unwrap())
                .await
                .unwrap();
        }

        assert_eq!(next_id(&store, Collection::Reviews).await.unwrap(), 8);
        // Collections are independent
        assert_eq!(next_id(&store, Collection::Photos).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_exhausted_id_space_is_an_error() {
        let store = InMemoryStore::new();
        let document = json!({"id": i64::MAX, "userid": 1, "businessid": 1});
        store
            .upsert_by_id(Collection::Photos, document.as_object().cloned().unwrap())
            .await
            .unwrap();

        let err = next_id(&store, Collection::Photos).await.unwrap_err();
        assert!(matches!(err, DbError::Other(_)));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_below_maximum() {
        let store = InMemoryStore::new();
        for id in [1, 2, 3] {
            let document = json!({"id": id, "userid": 1, "businessid": 1});
            store
                .insert(Collection::Photos, document.as_object().cloned().unwrap())
                .await
                .unwrap();
        }
        store.delete_one(Collection::Photos, &Filter::by_id(2)).await.unwrap();

        assert_eq!(next_id(&store, Collection::Photos).await.unwrap(), 4);
    }
}
