//! Repository implementations for store access.
//!
//! Each repository wraps a borrowed [`DocumentStore`](crate::db::store::DocumentStore) and
//! implements the [`Repository`] trait for one collection:
//!
//! - [`Businesses`]: Business listings, unique by name and address
//! - [`Reviews`]: Reviews, one per user and business
//! - [`Photos`]: Photos attached to businesses
//!
//! Repositories are cheap to construct, so handlers build one per request:
//!
//! ```ignore
//! let repo = Reviews::new(state.store.as_ref());
//! let review = repo.get_by_id(id).await?;
//! ```

pub mod businesses;
pub mod photos;
pub mod repository;
pub mod reviews;

pub use businesses::Businesses;
pub use photos::Photos;
pub use repository::Repository;
pub use reviews::Reviews;
