//! Repository for photos.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::{Repository, from_document, to_document},
    models::photos::{PhotoCreateDBRequest, PhotoDBResponse, PhotoUpdateDBRequest},
    store::{DocumentStore, Filter},
};
use crate::types::{Collection, PhotoId, UserId};
use tracing::instrument;

const COLLECTION: Collection = Collection::Photos;

/// Filter for listing photos
#[derive(Debug, Clone, Default)]
pub struct PhotoFilter {
    pub skip: i64,
    pub limit: Option<i64>,
    pub user_id: Option<UserId>,
}

impl PhotoFilter {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self {
            skip,
            limit: Some(limit),
            user_id: None,
        }
    }

    /// Every photo uploaded by `user_id`, unpaged
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

pub struct Photos<'s> {
    store: &'s dyn DocumentStore,
}

impl<'s> Photos<'s> {
    pub fn new(store: &'s dyn DocumentStore) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl<'s> Repository for Photos<'s> {
    type CreateRequest = PhotoCreateDBRequest;
    type UpdateRequest = PhotoUpdateDBRequest;
    type Response = PhotoDBResponse;
    type Id = PhotoId;
    type Filter = PhotoFilter;

    #[instrument(skip(self, request), fields(photo_id = request.id, business_id = request.business_id), err)]
    async fn create(&self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let document = self.store.insert(COLLECTION, to_document(request)?).await?;
        from_document(document)
    }

    #[instrument(skip(self), fields(photo_id = id), err)]
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

    #[instrument(skip(self), fields(photo_id = id), err)]
    async fn delete(&self, id: Self::Id) -> Result<bool> {
        self.store.delete_one(COLLECTION, &Filter::by_id(id)).await
    }

    #[instrument(skip(self, request), fields(photo_id = id), err)]
    async fn update(&self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let document = self
            .store
            .update_one(COLLECTION, &Filter::by_id(id), to_document(request)?)
            .await?
            .ok_or(DbError::NotFound)?;

        from_document(document)
    }
}
