//! API response models for per-user listings.
//!
//! Users are not stored; these are unpaged views of the other collections filtered by the
//! referencing user id.

use super::businesses::BusinessResponse;
use super::photos::PhotoResponse;
use super::reviews::ReviewResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Every business owned by a user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserBusinesses {
    pub businesses: Vec<BusinessResponse>,
}

/// Every review written by a user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserReviews {
    pub reviews: Vec<ReviewResponse>,
}

/// Every photo uploaded by a user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserPhotos {
    pub photos: Vec<PhotoResponse>,
}
