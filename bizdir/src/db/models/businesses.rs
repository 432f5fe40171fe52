//! Database models for businesses.

use crate::api::models::businesses::{BusinessCreate, BusinessUpdate};
use crate::types::{BusinessId, UserId};
use serde::{Deserialize, Serialize};

/// Database request for creating a new business
#[derive(Debug, Clone, Serialize)]
pub struct BusinessCreateDBRequest {
    pub id: BusinessId,
    #[serde(rename = "ownerid")]
    pub owner_id: UserId,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub phone: String,
    pub category: String,
    pub subcategory: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl BusinessCreateDBRequest {
    pub fn new(id: BusinessId, create: BusinessCreate) -> Self {
        Self {
            id,
            owner_id: create.owner_id,
            name: create.name,
            address: create.address,
            city: create.city,
            state: create.state,
            zip: create.zip,
            phone: create.phone,
            category: create.category,
            subcategory: create.subcategory,
            website: create.website,
            email: create.email,
        }
    }
}

/// Database request for updating a business. Only present fields are written.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BusinessUpdateDBRequest {
    #[serde(rename = "ownerid", skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<BusinessUpdate> for BusinessUpdateDBRequest {
    fn from(update: BusinessUpdate) -> Self {
        Self {
            owner_id: update.owner_id,
            name: update.name,
            address: update.address,
            city: update.city,
            state: update.state,
            zip: update.zip,
            phone: update.phone,
            category: update.category,
            subcategory: update.subcategory,
            website: update.website,
            email: update.email,
        }
    }
}

/// Database response for a business
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessDBResponse {
    pub id: BusinessId,
    #[serde(rename = "ownerid")]
    pub owner_id: UserId,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub phone: String,
    pub category: String,
    pub subcategory: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
