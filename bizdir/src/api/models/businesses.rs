//! API request/response models for businesses.

use super::pagination::Page;
use crate::api::extract::{Validate, ValidationErrors};
use crate::db::models::businesses::BusinessDBResponse;
use crate::types::{BusinessId, Collection, UserId};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use utoipa::ToSchema;

/// Request body for creating a new business.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BusinessCreate {
    /// User that owns the business. Numeric strings are accepted.
    #[serde(rename = "ownerid")]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[schema(value_type = i64, example = 4)]
    pub owner_id: UserId,
    #[schema(example = "Block 15")]
    pub name: String,
    #[schema(example = "300 SW Jefferson Ave")]
    pub address: String,
    #[schema(example = "Corvallis")]
    pub city: String,
    #[schema(example = "OR")]
    pub state: String,
    #[schema(example = "97333")]
    pub zip: String,
    #[schema(example = "541-758-2077")]
    pub phone: String,
    #[schema(example = "Restaurant")]
    pub category: String,
    #[schema(example = "Brewpub")]
    pub subcategory: String,
    #[serde(default)]
    #[schema(example = "http://block15.com")]
    pub website: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Validate for BusinessCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        errors.require_non_empty("name", &self.name);
        errors.require_non_empty("address", &self.address);
        errors.require_non_empty("city", &self.city);
        errors.require_non_empty("state", &self.state);
        errors.require_non_empty("zip", &self.zip);
        errors.require_non_empty("phone", &self.phone);
        errors.require_non_empty("category", &self.category);
        errors.require_non_empty("subcategory", &self.subcategory);
        errors.into_result()
    }
}

/// Request body for updating a business. All fields are optional;
/// only provided fields will be updated.
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct BusinessUpdate {
    #[serde(rename = "ownerid")]
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(value_type = Option<i64>)]
    pub owner_id: Option<UserId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Validate for BusinessUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        // Required fields may be left out of an update, but not blanked
        for (field, value) in [
            ("name", &self.name),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("zip", &self.zip),
            ("phone", &self.phone),
            ("category", &self.category),
            ("subcategory", &self.subcategory),
        ] {
            if let Some(value) = value {
                errors.require_non_empty(field, value);
            }
        }
        errors.into_result()
    }
}

/// Full business details returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BusinessResponse {
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

impl From<BusinessDBResponse> for BusinessResponse {
    fn from(db: BusinessDBResponse) -> Self {
        Self {
            id: db.id,
            owner_id: db.owner_id,
            name: db.name,
            address: db.address,
            city: db.city,
            state: db.state,
            zip: db.zip,
            phone: db.phone,
            category: db.category,
            subcategory: db.subcategory,
            website: db.website,
            email: db.email,
        }
    }
}

/// Links returned after writing a business
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BusinessLinks {
    #[schema(example = "/businesses/3")]
    pub business: String,
}

/// Response to a business create or update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BusinessWriteResponse {
    pub id: BusinessId,
    pub links: BusinessLinks,
}

impl BusinessWriteResponse {
    pub fn new(id: BusinessId) -> Self {
        Self {
            id,
            links: BusinessLinks {
                business: Collection::Businesses.entity_path(id),
            },
        }
    }
}

/// One page of businesses
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BusinessPage {
    pub businesses: Vec<BusinessResponse>,
    #[serde(flatten)]
    pub page: Page,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body() -> serde_json::Value {
        json!({
            "ownerid": "4",
            "name": "Block 15",
            "address": "300 SW Jefferson Ave",
            "city": "Corvallis",
            "state": "OR",
            "zip": "97333",
            "phone": "541-758-2077",
            "category": "Restaurant",
            "subcategory": "Brewpub"
        })
    }

    #[test]
    fn test_owner_id_accepts_numeric_string() {
        let create: BusinessCreate = serde_json::from_value(body()).unwrap();
        assert_eq!(create.owner_id, 4);
        assert!(create.validate().is_ok());
    }

    #[test]
    fn test_missing_field_fails_to_parse() {
        let mut value = body();
        value.as_object_mut().unwrap().remove("phone");
        assert!(serde_json::from_value::<BusinessCreate>(value).is_err());
    }

    #[test]
    fn test_blank_required_field_is_invalid() {
        let mut value = body();
        value["city"] = json!("  ");
        let create: BusinessCreate = serde_json::from_value(value).unwrap();
        let err = create.validate().unwrap_err();
        assert_eq!(err.to_string(), "city: must not be empty");
    }

    #[test]
    fn test_update_rejects_blank_but_allows_absent() {
        assert!(BusinessUpdate::default().validate().is_ok());
        let update = BusinessUpdate {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_write_response_shape() {
        let response = BusinessWriteResponse::new(3);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"id": 3, "links": {"business": "/businesses/3"}})
        );
    }
}
