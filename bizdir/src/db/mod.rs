//! Persistence layer.
//!
//! All data lives in a document store reached through the [`store::DocumentStore`] trait. Typed
//! repositories sit on top of it and follow the Repository pattern, converting between the typed
//! models in [`models`] and raw JSON documents.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (API request handlers)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (db::handlers - typed CRUD over one collection)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   Models    │  (db::models - stored document shapes)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │    Store    │  (db::store - in-memory or PostgreSQL JSONB)
//! └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`store`]: The document store trait and its implementations
//! - [`handlers`]: Repository implementations for CRUD operations
//! - [`models`]: Typed document structures
//! - [`sequence`]: Sequential id allocation
//! - [`errors`]: Store-specific error types
//!
//! ## Example Usage
//!
//! ```ignore
//! use bizdir::db::handlers::{Businesses, Repository};
//!
//! async fn example(store: &dyn DocumentStore) -> bizdir::db::errors::Result<()> {
//!     let repo = Businesses::new(store);
//!     if let Some(business) = repo.get_by_id(3).await? {
//!         println!("Found business: {}", business.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Consistency
//!
//! There are no transactions. Each store call is atomic on its own, and the unique indexes
//! declared in [`crate::types::Collection::unique_indexes`] are what stop two concurrent writers
//! from creating the same key.
//!
//! # Migrations
//!
//! The PostgreSQL schema is managed by SQLx migrations in the `migrations/` directory, exposed
//! through [`crate::migrator`].

pub mod errors;
pub mod handlers;
pub mod models;
pub mod sequence;
pub mod store;
