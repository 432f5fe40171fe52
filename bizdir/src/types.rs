//! Common type definitions shared across the API and store layers.
//!
//! # ID Types
//!
//! Every stored entity is identified by a sequential integer allocated on creation (see
//! [`crate::db::sequence`]). Type aliases keep signatures readable:
//!
//! - [`BusinessId`]: Business identifier
//! - [`ReviewId`]: Review identifier
//! - [`PhotoId`]: Photo identifier
//! - [`UserId`]: Bare user identifier; users are not stored, only referenced
//!
//! # Collections
//!
//! [`Collection`] names the document collections in the store and carries the unique indexes each
//! one enforces.

use serde::{Deserialize, Serialize};
use std::fmt;

// Type aliases for IDs
pub type BusinessId = i64;
pub type ReviewId = i64;
pub type PhotoId = i64;
pub type UserId = i64;

/// A named collection of documents in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Businesses,
    Reviews,
    Photos,
}

/// A unique index over one or more document fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniqueIndex {
    pub name: &'static str,
    pub fields: &'static [&'static str],
}

const BUSINESS_INDEXES: &[UniqueIndex] = &[
    UniqueIndex {
        name: "businesses_id_unique",
        fields: &["id"],
    },
    UniqueIndex {
        name: "businesses_name_address_unique",
        fields: &["name", "address"],
    },
];

const REVIEW_INDEXES: &[UniqueIndex] = &[
    UniqueIndex {
        name: "reviews_id_unique",
        fields: &["id"],
    },
    UniqueIndex {
        name: "reviews_userid_businessid_unique",
        fields: &["userid", "businessid"],
    },
];

const PHOTO_INDEXES: &[UniqueIndex] = &[UniqueIndex {
    name: "photos_id_unique",
    fields: &["id"],
}];

impl Collection {
    /// Collection name as used in storage and in URL paths
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Businesses => "businesses",
            Collection::Reviews => "reviews",
            Collection::Photos => "photos",
        }
    }

    /// Relative path of the collection endpoint, e.g. `/businesses`
    pub fn path(&self) -> String {
        format!("/{}", self.as_str())
    }

    /// Relative path of a single entity, e.g. `/businesses/3`
    pub fn entity_path(&self, id: i64) -> String {
        format!("/{}/{}", self.as_str(), id)
    }

    /// Unique indexes the store must enforce for this collection
    pub fn unique_indexes(&self) -> &'static [UniqueIndex] {
        match self {
            Collection::Businesses => BUSINESS_INDEXES,
            Collection::Reviews => REVIEW_INDEXES,
            Collection::Photos => PHOTO_INDEXES,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
