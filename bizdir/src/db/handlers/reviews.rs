//! Repository for reviews.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::{Repository, from_document, to_document},
    models::reviews::{ReviewCreateDBRequest, ReviewDBResponse, ReviewUpdateDBRequest},
    store::{DocumentStore, Filter},
};
use crate::types::{BusinessId, Collection, ReviewId, UserId};
use tracing::instrument;

const COLLECTION: Collection = Collection::Reviews;

/// Filter for listing reviews
#[derive(Debug, Clone, Default)]
pub struct ReviewFilter {
    pub skip: i64,
    pub limit: Option<i64>,
    pub user_id: Option<UserId>,
}

impl ReviewFilter {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self {
            skip,
            limit: Some(limit),
            user_id: None,
        }
    }

    /// Every review written by `user_id`, unpaged
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            ..Default::default()
        }
    }

    fn to_store_filter(&self) -> Filter {
        match self.user_id {
            Some(user_id) => Filter::all().eq("userid", user_id),
            None => Filter::all(),
        }
    }
}

pub struct Reviews<'s> {
    store: &'s dyn DocumentStore,
}

impl<'s> Reviews<'s> {
    pub fn new(store: &'s dyn DocumentStore) -> Self {
        Self { store }
    }

    /// The review a user has left for a business, if any
    #[instrument(skip(self), err)]
    pub async fn find_by_user_and_business(&self, user_id: UserId, business_id: BusinessId) -> Result<Option<ReviewDBResponse>> {
        let filter = Filter::all().eq("userid", user_id).eq("businessid", business_id);
        self.store
            .find_one(COLLECTION, &filter)
            .await?
            .map(from_document)
            .transpose()
    }
}

#[async_trait::async_trait]
impl<'s> Repository for Reviews<'s> {
    type CreateRequest = ReviewCreateDBRequest;
    type UpdateRequest = ReviewUpdateDBRequest;
    type Response = ReviewDBResponse;
    type Id = ReviewId;
    type Filter = ReviewFilter;

    #[instrument(skip(self, request), fields(review_id = request.id, business_id = request.business_id), err)]
    async fn create(&self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let document = self.store.insert(COLLECTION, to_document(request)?).await?;
        from_document(document)
    }

    #[instrument(skip(self), fields(review_id = id), err)]
    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Response>> {
        self.store
            .find_one(COLLECTION, &Filter::by_id(id))
            .await?
            .map(from_document)
            .transpose()
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let documents = self
            .store
            .find_page(COLLECTION, &filter.to_store_filter(), filter.skip, filter.limit)
            .await?;

        documents.into_iter().map(from_document).collect()
    }

    #[instrument(skip(self, filter), err)]
    async fn count(&self, filter: &Self::Filter) -> Result<i64> {
        self.store.count(COLLECTION, &filter.to_store_filter()).await
    }

    #[instrument(skip(self), fields(review_id = id), err)]
    async fn delete(&self, id: Self::Id) -> Result<bool> {
        self.store.delete_one(COLLECTION, &Filter::by_id(id)).await
    }

    #[instrument(skip(self, request), fields(review_id = id), err)]
    async fn update(&self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let document = self
            .store
            .update_one(COLLECTION, &Filter::by_id(id), to_document(request)?)
            .await?
            .ok_or(DbError::NotFound)?;

        from_document(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::InMemoryStore;

    fn review(id: ReviewId, user_id: UserId, business_id: BusinessId) -> ReviewCreateDBRequest {
        ReviewCreateDBRequest {
            id,
            user_id,
            business_id,
            dollars: 2,
            stars: 4,
            review: Some("Great pizza".to_string()),
        }
    }

    #[tokio::test]
    async fn test_one_review_per_user_and_business() {
        let store = InMemoryStore::new();
        let repo = Reviews::new(&store);

        repo.create(&review(1, 5, 2)).await.unwrap();
        assert!(matches!(repo.create(&review(2, 5, 2)).await, Err(DbError::UniqueViolation { .. })));
        repo.create(&review(2, 5, 3)).await.unwrap();

        let found = repo.find_by_user_and_business(5, 3).await.unwrap();
        assert_eq!(found.map(|r| r.id), Some(2));
        assert!(repo.find_by_user_and_business(6, 2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_keeps_linkage() {
        let store = InMemoryStore::new();
        let repo = Reviews::new(&store);
        repo.create(&review(1, 5, 2)).await.unwrap();

        let updated = repo
            .update(
                1,
                &ReviewUpdateDBRequest {
                    stars: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.stars, 1);
        assert_eq!(updated.dollars, 2);
        assert_eq!(updated.user_id, 5);
        assert_eq!(updated.business_id, 2);
        assert_eq!(updated.review.as_deref(), Some("Great pizza"));
    }

    #[tokio::test]
    async fn test_list_for_user() {
        let store = InMemoryStore::new();
        let repo = Reviews::new(&store);
        repo.create(&review(1, 5, 2)).await.unwrap();
        repo.create(&review(2, 6, 2)).await.unwrap();
        repo.create(&review(3, 5, 4)).await.unwrap();

        let reviews = repo.list(&ReviewFilter::for_user(5)).await.unwrap();
        assert_eq!(reviews.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(repo.count(&ReviewFilter::default()).await.unwrap(), 3);
        assert!(repo.list(&ReviewFilter::for_user(99)).await.unwrap().is_empty());
    }
}
