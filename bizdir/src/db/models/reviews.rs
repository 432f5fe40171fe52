//! Database models for reviews.

use crate::api::models::reviews::{ReviewCreate, ReviewUpdate};
use crate::types::{BusinessId, ReviewId, UserId};
use serde::{Deserialize, Serialize};

/// Database request for creating a new review
#[derive(Debug, Clone, Serialize)]
pub struct ReviewCreateDBRequest {
    pub id: ReviewId,
    #[serde(rename = "userid")]
    pub user_id: UserId,
    #[serde(rename = "businessid")]
    pub business_id: BusinessId,
    pub dollars: i64,
    pub stars: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
}

impl ReviewCreateDBRequest {
    pub fn new(id: ReviewId, create: ReviewCreate) -> Self {
        Self {
            id,
            user_id: create.user_id,
            business_id: create.business_id,
            dollars: create.dollars,
            stars: create.stars,
            review: create.review,
        }
    }
}

/// Database request for updating a review.
///
/// Only the rating fields and text are mutable; `userid` and `businessid` are fixed at creation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReviewUpdateDBRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dollars: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stars: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
}

impl From<ReviewUpdate> for ReviewUpdateDBRequest {
    fn from(update: ReviewUpdate) -> Self {
        Self {
            dollars: update.dollars,
            stars: update.stars,
            review: update.review,
        }
    }
}

/// Database response for a review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewDBResponse {
    pub id: ReviewId,
    #[serde(rename = "userid")]
    pub user_id: UserId,
    #[serde(rename = "businessid")]
    pub business_id: BusinessId,
    pub dollars: i64,
    pub stars: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
}
