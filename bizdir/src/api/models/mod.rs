//! API request and response data models.
//!
//! These structures define the public API contract. They are distinct from the stored document
//! models in [`crate::db::models`], which lets the wire and storage representations evolve
//! independently even though they currently share field names.
//!
//! - Request bodies (`*Create`, `*Update`) implement [`Validate`](crate::api::extract::Validate)
//!   and are extracted with [`ValidatedJson`](crate::api::extract::ValidatedJson). Integer fields
//!   accept JSON numbers or numeric strings.
//! - Responses derive `ToSchema` for the OpenAPI document.
//!
//! # Model Categories
//!
//! - [`businesses`], [`reviews`], [`photos`]: entity bodies, write responses and list pages
//! - [`users`]: per-user listings
//! - [`pagination`]: page computation and the list envelope metadata

pub mod businesses;
pub mod pagination;
pub mod photos;
pub mod reviews;
pub mod users;
