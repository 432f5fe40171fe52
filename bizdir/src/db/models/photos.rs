//! Database models for photos.

use crate::api::models::photos::{PhotoCreate, PhotoUpdate};
use crate::types::{BusinessId, PhotoId, UserId};
use serde::{Deserialize, Serialize};

/// Database request for creating a new photo
#[derive(Debug, Clone, Serialize)]
pub struct PhotoCreateDBRequest {
    pub id: PhotoId,
    #[serde(rename = "userid")]
    pub user_id: UserId,
    #[serde(rename = "businessid")]
    pub business_id: BusinessId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl PhotoCreateDBRequest {
    pub fn new(id: PhotoId, create: PhotoCreate) -> Self {
        Self {
            id,
            user_id: create.user_id,
            business_id: create.business_id,
            caption: create.caption,
        }
    }
}

/// Database request for updating a photo
#[derive(Debug, Clone, Default, Serialize)]
pub struct PhotoUpdateDBRequest {
    #[serde(rename = "businessid", skip_serializing_if = "Option::is_none")]
    pub business_id: Option<BusinessId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl From<PhotoUpdate> for PhotoUpdateDBRequest {
    fn from(update: PhotoUpdate) -> Self {
        Self {
            business_id: update.business_id,
            caption: update.caption,
        }
    }
}

/// Database response for a photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoDBResponse {
    pub id: PhotoId,
    #[serde(rename = "userid")]
    pub user_id: UserId,
    #[serde(rename = "businessid")]
    pub business_id: BusinessId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}
