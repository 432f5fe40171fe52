//! API request/response models for reviews.

use super::pagination::Page;
use crate::api::extract::Validate;
use crate::db::models::reviews::ReviewDBResponse;
use crate::types::{BusinessId, Collection, ReviewId, UserId};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use utoipa::ToSchema;

/// Request body for posting a review. A user may review each business once.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewCreate {
    #[serde(rename = "userid")]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[schema(value_type = i64, example = 5)]
    pub user_id: UserId,
    /// Business being reviewed; must exist
    #[serde(rename = "businessid")]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[schema(value_type = i64, example = 2)]
    pub business_id: BusinessId,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[schema(value_type = i64, example = 1)]
    pub dollars: i64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[schema(value_type = i64, example = 4)]
    pub stars: i64,
    #[serde(default)]
    #[schema(example = "Great beer, friendly staff")]
    pub review: Option<String>,
}

impl Validate for ReviewCreate {}

/// Request body for updating a review.
///
/// `userid` and `businessid` may be sent, but only if they match the stored review.
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ReviewUpdate {
    #[serde(rename = "userid")]
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(value_type = Option<i64>)]
    pub user_id: Option<UserId>,
    #[serde(rename = "businessid")]
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(value_type = Option<i64>)]
    pub business_id: Option<BusinessId>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(value_type = Option<i64>)]
    pub dollars: Option<i64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(value_type = Option<i64>)]
    pub stars: Option<i64>,
    #[serde(default)]
    pub review: Option<String>,
}

impl Validate for ReviewUpdate {}

/// Full review details returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReviewResponse {
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

impl From<ReviewDBResponse> for ReviewResponse {
    fn from(db: ReviewDBResponse) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            business_id: db.business_id,
            dollars: db.dollars,
            stars: db.stars,
            review: db.review,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReviewLinks {
    #[schema(example = "/reviews/7")]
    pub review: String,
    #[schema(example = "/businesses/2")]
    pub business: String,
}

/// Response to a review create or update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReviewWriteResponse {
    pub id: ReviewId,
    pub links: ReviewLinks,
}

impl ReviewWriteResponse {
    pub fn new(id: ReviewId, business_id: BusinessId) -> Self {
        Self {
            id,
            links: ReviewLinks {
                review: Collection::Reviews.entity_path(id),
                business: Collection::Businesses.entity_path(business_id),
            },
        }
    }
}

/// One page of reviews
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReviewPage {
    pub reviews: Vec<ReviewResponse>,
    #[serde(flatten)]
    pub page: Page,
}
