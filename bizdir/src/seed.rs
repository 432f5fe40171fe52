//! Startup seeding from JSON data files.
//!
//! Each collection is seeded from `<data_dir>/<collection>.json`, a JSON array of documents in
//! the wire shape (`{"id": 1, "ownerid": 4, "name": ...}`). Documents are upserted by id, so
//! seeding the same files twice leaves the store unchanged, and documents created through the API
//! with other ids are kept. A missing file is skipped with a warning.

use anyhow::Context;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{info, instrument, warn};

use crate::config::SeedConfig;
use crate::db::handlers::repository::to_document;
use crate::db::models::{businesses::BusinessDBResponse, photos::PhotoDBResponse, reviews::ReviewDBResponse};
use crate::db::store::DocumentStore;
use crate::types::Collection;

/// Number of documents upserted per collection
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub businesses: usize,
    pub reviews: usize,
    pub photos: usize,
}

/// Upsert every seed file found in the configured directory
#[instrument(skip_all, fields(data_dir = %config.data_dir.display()), err)]
pub async fn seed_store(store: &dyn DocumentStore, config: &SeedConfig) -> anyhow::Result<SeedReport> {
    if !config.enabled {
        info!("Seeding disabled");
        return Ok(SeedReport::default());
    }

    let dir = config.data_dir.as_path();
    let report = SeedReport {
        businesses: seed_collection::<BusinessDBResponse>(store, Collection::Businesses, dir).await?,
        reviews: seed_collection::<ReviewDBResponse>(store, Collection::Reviews, dir).await?,
        photos: seed_collection::<PhotoDBResponse>(store, Collection::Photos, dir).await?,
    };

    info!(
        businesses = report.businesses,
        reviews = report.reviews,
        photos = report.photos,
        "Seeded store"
    );
    Ok(report)
}

/// Parse `<dir>/<collection>.json` as typed records and upsert each by id
async fn seed_collection<T>(store: &dyn DocumentStore, collection: Collection, dir: &Path) -> anyhow::Result<usize>
where
    T: DeserializeOwned + Serialize,
{
    let path = dir.join(format!("{collection}.json"));
    let contents = match tokio::fs::read_to_string(&path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "Seed file not found, skipping");
            return Ok(0);
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to read seed file {}", path.display())),
    };

    let records: Vec<T> =
        serde_json::from_str(&contents).with_context(|| format!("Invalid seed data in {}", path.display()))?;

    for record in &records {
        let document = to_document(record)?;
        store
            .upsert_by_id(collection, document)
            .await
            .with_context(|| format!("Failed to seed {collection}"))?;
    }

    Ok(records.len())
}
