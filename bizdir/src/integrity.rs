//! Referential integrity checks that guard writes.
//!
//! Handlers run these before touching the store, always in the same order:
//!
//! 1. existence of the referenced business ([`assert_business_exists`])
//! 2. uniqueness of the natural key ([`assert_no_duplicate_business`], [`assert_no_duplicate_review`])
//! 3. immutability of review linkage ([`assert_immutable_fields`])
//!
//! A failed check returns early, so no write is attempted. The checks are not atomic with the
//! write that follows; the store's unique indexes catch writers that race past them.

use tracing::instrument;

use crate::api::models::reviews::ReviewUpdate;
use crate::db::handlers::{Businesses, Repository, Reviews};
use crate::db::models::reviews::ReviewDBResponse;
use crate::db::store::DocumentStore;
use crate::errors::{Error, Result};
use crate::types::{BusinessId, UserId};

/// The business must exist before anything can reference it
#[instrument(skip(store), err)]
pub async fn assert_business_exists(store: &dyn DocumentStore, business_id: BusinessId) -> Result<()> {
    match Businesses::new(store).get_by_id(business_id).await? {
        Some(_) => Ok(()),
        None => Err(Error::not_found("Business")),
    }
}

/// A user may review each business at most once
#[instrument(skip(store), err)]
pub async fn assert_no_duplicate_review(store: &dyn DocumentStore, user_id: UserId, business_id: BusinessId) -> Result<()> {
    match Reviews::new(store).find_by_user_and_business(user_id, business_id).await? {
        Some(existing) => {
            tracing::debug!(review_id = existing.id, "Review already exists");
            Err(Error::Conflict {
                message: "Review already posted by this user for this business".to_string(),
            })
        }
        None => Ok(()),
    }
}

/// No two businesses may share a name and address
#[instrument(skip(store), err)]
pub async fn assert_no_duplicate_business(store: &dyn DocumentStore, name: &str, address: &str) -> Result<()> {
    match Businesses::new(store).find_by_name_and_address(name, address).await? {
        Some(existing) => {
            tracing::debug!(business_id = existing.id, "Business already exists");
            Err(Error::Conflict {
                message: "Business already exists with this name and address".to_string(),
            })
        }
        None => Ok(()),
    }
}

/// A review update may repeat the stored `userid`/`businessid`, never change them
pub fn assert_immutable_fields(existing: &ReviewDBResponse, patch: &ReviewUpdate) -> Result<()> {
    let business_changed = patch.business_id.is_some_and(|id| id != existing.business_id);
    let user_changed = patch.user_id.is_some_and(|id| id != existing.user_id);

    if business_changed || user_changed {
        return Err(Error::Forbidden {
            message: "Cannot change the business or user ID associated with this review".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::errors::DbError;
    use crate::db::store::InMemoryStore;
    use crate::test_utils::{seed_business, seed_review};
    use axum::http::StatusCode;

    fn stored_review() -> ReviewDBResponse {
        ReviewDBResponse {
            id: 1,
            user_id: 5,
            business_id: 2,
            dollars: 1,
            stars: 4,
            review: None,
        }
    }

    #[tokio::test]
    async fn test_business_exists() {
        let store = InMemoryStore::new();
        let err = assert_business_exists(&store, 2).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.user_message(), "Business not found");

        seed_business(&store, 2, 9, "Block 15").await;
        assert!(assert_business_exists(&store, 2).await.is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_review() {
        let store = InMemoryStore::new();
        seed_review(&store, 1, 5, 2).await;

        let err = assert_no_duplicate_review(&store, 5, 2).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        assert!(assert_no_duplicate_review(&store, 5, 3).await.is_ok());
        assert!(assert_no_duplicate_review(&store, 6, 2).await.is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_business() {
        let store = InMemoryStore::new();
        let business = seed_business(&store, 1, 9, "Block 15").await;

        let err = assert_no_duplicate_business(&store, &business.name, &business.address)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict { .. }));

        assert!(assert_no_duplicate_business(&store, &business.name, "elsewhere").await.is_ok());
    }

    #[test]
    fn test_immutable_fields() {
        let existing = stored_review();

        assert!(assert_immutable_fields(&existing, &ReviewUpdate::default()).is_ok());

        // Repeating the stored values is allowed
        let same = ReviewUpdate {
            user_id: Some(5),
            business_id: Some(2),
            stars: Some(1),
            ..Default::default()
        };
        assert!(assert_immutable_fields(&existing, &same).is_ok());

        let moved = ReviewUpdate {
            business_id: Some(3),
            ..Default::default()
        };
        let err = assert_immutable_fields(&existing, &moved).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);

        let reassigned = ReviewUpdate {
            user_id: Some(6),
            ..Default::default()
        };
        assert!(matches!(assert_immutable_fields(&existing, &reassigned), Err(Error::Forbidden { .. })));
    }

    #[tokio::test]
    async fn test_store_failures_propagate() {
        let store = InMemoryStore::new();
        // A document the typed model cannot read surfaces as an internal error, not a 404
        let broken = serde_json::json!({"id": 4, "name": "half a business"});
        store
            .insert(crate::types::Collection::Businesses, broken.as_object().cloned().unwrap())
            .await
            .unwrap();

        let err = assert_business_exists(&store, 4).await.unwrap_err();
        assert!(matches!(err, Error::Database(DbError::Other(_))));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
