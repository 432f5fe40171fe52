//! API layer for HTTP request handling and data models.
//!
//! This module contains the REST API implementation, organized into:
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures for API communication
//! - **[`extract`]**: Body extraction and validation
//!
//! # API Structure
//!
//! - **Businesses** (`/businesses/*`): Business listings, unique by name and address
//! - **Reviews** (`/reviews/*`): One review per user and business
//! - **Photos** (`/photos/*`): Photos attached to businesses
//! - **Users** (`/users/{userid}/*`): Everything a user owns, unpaged
//!
//! # OpenAPI Documentation
//!
//! All endpoints are documented with OpenAPI annotations using `utoipa`.
//! API documentation is available at `/docs` when the server is running.

pub mod extract;
pub mod handlers;
pub mod models;
