//! Repository for businesses.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::{Repository, from_document, to_document},
    models::businesses::{BusinessCreateDBRequest, BusinessDBResponse, BusinessUpdateDBRequest},
    store::{DocumentStore, Filter},
};
use crate::types::{BusinessId, Collection, UserId};
use tracing::instrument;

const COLLECTION: Collection = Collection::Businesses;

/// Filter for listing businesses
#[derive(Debug, Clone, Default)]
pub struct BusinessFilter {
    pub skip: i64,
    pub limit: Option<i64>,
    pub owner_id: Option<UserId>,
}

impl BusinessFilter {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self {
            skip,
            limit: Some(limit),
            owner_id: None,
        }
    }

    /// Every business owned by `owner_id`, unpaged
    pub fn for_owner(owner_id: UserId) -> Self {
        Self {
            owner_id: Some(owner_id),
            ..Default::default()
        }
    }

    fn to_store_filter(&self) -> Filter {
        match self.owner_id {
            Some(owner_id) => Filter::all().eq("ownerid", owner_id),
            None => Filter::all(),
        }
    }
}

pub struct Businesses<'s> {
    store: &'s dyn DocumentStore,
}

impl<'s> Businesses<'s> {
    pub fn new(store: &'s dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Look up a business by its natural key
    #[instrument(skip(self, name, address), err)]
    pub async fn find_by_name_and_address(&self, name: &str, address: &str) -> Result<Option<BusinessDBResponse>> {
        let filter = Filter::all().eq("name", name).eq("address", address);
        self.store
            .find_one(COLLECTION, &filter)
            .await?
            .map(from_document)
            .transpose()
    }
}

#[async_trait::async_trait]
impl<'s> Repository for Businesses<'s> {
    type CreateRequest = BusinessCreateDBRequest;
    type UpdateRequest = BusinessUpdateDBRequest;
    type Response = BusinessDBResponse;
    type Id = BusinessId;
    type Filter = BusinessFilter;

    #[instrument(skip(self, request), fields(business_id = request.id, name = %request.name), err)]
    async fn create(&self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let document = self.store.insert(COLLECTION, to_document(request)?).await?;
        from_document(document)
    }

    #[instrument(skip(self), fields(business_id = id), err)]
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

    #[instrument(skip(self), fields(business_id = id), err)]
    async fn delete(&self, id: Self::Id) -> Result<bool> {
        self.store.delete_one(COLLECTION, &Filter::by_id(id)).await
    }

    #[instrument(skip(self, request), fields(business_id = id), err)]
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

    fn business(id: BusinessId, owner_id: UserId, name: &str) -> BusinessCreateDBRequest {
        BusinessCreateDBRequest {
            id,
            owner_id,
            name: name.to_string(),
            address: format!("{id} Main St"),
            city: "Corvallis".to_string(),
            state: "OR".to_string(),
            zip: "97330".to_string(),
            phone: "541-555-0100".to_string(),
            category: "Restaurant".to_string(),
            subcategory: "Pizza".to_string(),
            website: None,
            email: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = InMemoryStore::new();
        let repo = Businesses::new(&store);

        let created = repo.create(&business(1, 4, "Block 15")).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.owner_id, 4);
        assert_eq!(created.website, None);

        let fetched = repo.get_by_id(1).await.unwrap();
        assert_eq!(fetched, Some(created));
        assert_eq!(repo.get_by_id(2).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_name_and_address_rejected() {
        let store = InMemoryStore::new();
        let repo = Businesses::new(&store);

        repo.create(&business(1, 4, "Block 15")).await.unwrap();
        let mut duplicate = business(2, 5, "Block 15");
        duplicate.address = "1 Main St".to_string();

        let result = repo.create(&duplicate).await;
        assert!(matches!(result, Err(DbError::UniqueViolation { .. })));
        assert_eq!(repo.count(&BusinessFilter::default()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_by_owner_and_paging() {
        let store = InMemoryStore::new();
        let repo = Businesses::new(&store);
        for id in 1..=5 {
            repo.create(&business(id, if id % 2 == 0 { 7 } else { 8 }, &format!("Shop {id}")))
                .await
                .unwrap();
        }

        let owned = repo.list(&BusinessFilter::for_owner(7)).await.unwrap();
        assert_eq!(owned.iter().map(|b| b.id).collect::<Vec<_>>(), vec![2, 4]);
        assert_eq!(repo.count(&BusinessFilter::for_owner(8)).await.unwrap(), 3);

        let page = repo.list(&BusinessFilter::new(2, 2)).await.unwrap();
        assert_eq!(page.iter().map(|b| b.id).collect::<Vec<_>>(), vec![3, 4]);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = InMemoryStore::new();
        let repo = Businesses::new(&store);
        repo.create(&business(1, 4, "Block 15")).await.unwrap();

        let update = BusinessUpdateDBRequest {
            phone: Some("541-555-0199".to_string()),
            ..Default::default()
        };
        let updated = repo.update(1, &update).await.unwrap();
        assert_eq!(updated.phone, "541-555-0199");
        assert_eq!(updated.name, "Block 15");

        assert!(matches!(repo.update(9, &update).await, Err(DbError::NotFound)));

        assert!(repo.delete(1).await.unwrap());
        assert!(!repo.delete(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_by_name_and_address() {
        let store = InMemoryStore::new();
        let repo = Businesses::new(&store);
        repo.create(&business(1, 4, "Block 15")).await.unwrap();

        let found = repo.find_by_name_and_address("Block 15", "1 Main St").await.unwrap();
        assert_eq!(found.map(|b| b.id), Some(1));
        assert!(repo.find_by_name_and_address("Block 15", "2 Main St").await.unwrap().is_none());
    }
}
