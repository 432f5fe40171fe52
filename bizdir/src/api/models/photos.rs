//! API request/response models for photos.

use super::pagination::Page;
use crate::api::extract::Validate;
use crate::db::models::photos::PhotoDBResponse;
use crate::types::{BusinessId, Collection, PhotoId, UserId};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use utoipa::ToSchema;

/// Request body for adding a photo to a business.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PhotoCreate {
    #[serde(rename = "userid")]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[schema(value_type = i64, example = 3)]
    pub user_id: UserId,
    /// Business the photo belongs to; must exist
    #[serde(rename = "businessid")]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[schema(value_type = i64, example = 2)]
    pub business_id: BusinessId,
    #[serde(default)]
    #[schema(example = "The patio in summer")]
    pub caption: Option<String>,
}

impl Validate for PhotoCreate {}

/// Request body for updating a photo.
///
/// A photo may be moved to another existing business. The uploading user cannot be changed and a
/// `userid` in the body is ignored.
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PhotoUpdate {
    #[serde(rename = "businessid")]
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(value_type = Option<i64>)]
    pub business_id: Option<BusinessId>,
    #[serde(default)]
    pub caption: Option<String>,
}

impl Validate for PhotoUpdate {}

/// Full photo details returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PhotoResponse {
    pub id: PhotoId,
    #[serde(rename = "userid")]
    pub user_id: UserId,
    #[serde(rename = "businessid")]
    pub business_id: BusinessId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl From<PhotoDBResponse> for PhotoResponse {
    fn from(db: PhotoDBResponse) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            business_id: db.business_id,
            caption: db.caption,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PhotoLinks {
    #[schema(example = "/photos/4")]
    pub photo: String,
    #[schema(example = "/businesses/2")]
    pub business: String,
}

/// Response to a photo create or update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PhotoWriteResponse {
    pub id: PhotoId,
    pub links: PhotoLinks,
}

impl PhotoWriteResponse {
    pub fn new(id: PhotoId, business_id: BusinessId) -> Self {
        Self {
            id,
            links: PhotoLinks {
                photo: Collection::Photos.entity_path(id),
                business: Collection::Businesses.entity_path(business_id),
            },
        }
    }
}

/// One page of photos
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PhotoPage {
    pub photos: Vec<PhotoResponse>,
    #[serde(flatten)]
    pub page: Page,
}
