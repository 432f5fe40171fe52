//! Stored document models.
//!
//! These structs are the typed shape of documents in each collection. Field names are renamed to
//! the lowercase keys used on the wire and in the store (`ownerid`, `userid`, `businessid`).
//!
//! Each entity has three models:
//!
//! - `*CreateDBRequest`: a complete new document, id already allocated
//! - `*UpdateDBRequest`: a partial patch; absent fields are left untouched
//! - `*DBResponse`: a document read back from the store
//!
//! API models in [`crate::api::models`] convert into the request types, and the response types
//! convert into API responses.

pub mod businesses;
pub mod photos;
pub mod reviews;
