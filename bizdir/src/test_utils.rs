//! Test utilities shared by the unit and handler tests.

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{Value, json};

use crate::config::{Config, DatabaseConfig, SeedConfig};
use crate::db::handlers::{Businesses, Photos, Repository, Reviews};
use crate::db::models::{
    businesses::{BusinessCreateDBRequest, BusinessDBResponse},
    photos::{PhotoCreateDBRequest, PhotoDBResponse},
    reviews::{ReviewCreateDBRequest, ReviewDBResponse},
};
use crate::db::store::{DocumentStore, InMemoryStore, SharedStore};
use crate::types::{BusinessId, PhotoId, ReviewId, UserId};

pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        database: DatabaseConfig::Memory,
        seed: SeedConfig {
            enabled: false,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// A test server over a fresh in-memory store, along with a handle to that store for seeding and
/// asserting on stored state
pub async fn create_test_app() -> (TestServer, SharedStore) {
    create_test_app_with_config(create_test_config()).await
}

pub async fn create_test_app_with_config(config: Config) -> (TestServer, SharedStore) {
    let store: SharedStore = Arc::new(InMemoryStore::new());
    let app = crate::Application::new_with_store(config, store.clone())
        .await
        .expect("Failed to create application");

    (app.into_test_server(), store)
}

/// Store a business directly, bypassing the API. The address is derived from the id so that
/// seeded businesses never collide on name and address.
pub async fn seed_business(store: &dyn DocumentStore, id: BusinessId, owner_id: UserId, name: &str) -> BusinessDBResponse {
    let request = BusinessCreateDBRequest {
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
    };

    Businesses::new(store).create(&request).await.expect("Failed to seed business")
}

pub async fn seed_review(store: &dyn DocumentStore, id: ReviewId, user_id: UserId, business_id: BusinessId) -> ReviewDBResponse {
    let request = ReviewCreateDBRequest {
        id,
        user_id,
        business_id,
        dollars: 2,
        stars: 4,
        review: None,
    };

    Reviews::new(store).create(&request).await.expect("Failed to seed review")
}

pub async fn seed_photo(store: &dyn DocumentStore, id: PhotoId, user_id: UserId, business_id: BusinessId) -> PhotoDBResponse {
    let request = PhotoCreateDBRequest {
        id,
        user_id,
        business_id,
        caption: None,
    };

    Photos::new(store).create(&request).await.expect("Failed to seed photo")
}

/// A complete, valid business creation body
pub fn business_body(name: &str, address: &str) -> Value {
    json!({
        "ownerid": 4,
        "name": name,
        "address": address,
        "city": "Portland",
        "state": "OR",
        "zip": "97204",
        "phone": "503-555-0115",
        "category": "Restaurant",
        "subcategory": "Brewpub",
        "website": "http://example.com",
    })
}
