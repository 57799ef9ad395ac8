//! Access to the pavilion and review tables.
//! Views only ever see `dyn PavilionStore`, so the backing store can be the hosted
//! table store, the local SQLite file, the server's JSON API or a test mock.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::pavilion::Pavilion;
use crate::models::review::{NewReview, Review};

pub mod api_client;
#[cfg(feature = "ssr")]
pub mod rest;
#[cfg(feature = "ssr")]
pub mod sqlite;

pub use api_client::ApiClient;

#[async_trait(?Send)]
pub trait PavilionStore: Send + Sync {
    /// All pavilions ordered by id.
    async fn list_pavilions(&self) -> Result<Vec<Pavilion>, StoreError>;

    /// `Ok(None)` when no pavilion has this id.
    async fn get_pavilion(&self, id: i64) -> Result<Option<Pavilion>, StoreError>;

    /// Reviews newest first (creation time, then id, both descending).
    /// `None` lists reviews for every pavilion.
    async fn list_reviews(&self, pavilion_id: Option<i64>) -> Result<Vec<Review>, StoreError>;

    /// Stores a review and returns it as stored.
    async fn insert_review(&self, record: &NewReview) -> Result<Review, StoreError>;
}

#[cfg(feature = "ssr")]
pub type SharedStore = std::sync::Arc<dyn PavilionStore>;

/// Opens the store described by `config`.
#[cfg(feature = "ssr")]
pub async fn connect(config: &crate::config::StoreConfig) -> Result<SharedStore, StoreError> {
    use crate::config::StoreConfig;
    use leptos::logging::log;
    use std::sync::Arc;

    match config {
        StoreConfig::Remote { base_url, api_key, timeout_secs } => {
            log!("[STORE] Using hosted table store at {}", base_url);
            let store = rest::RestStore::new(base_url, api_key, *timeout_secs)?;
            Ok(Arc::new(store))
        }
        StoreConfig::Local { db_path, seed_file } => {
            log!("[STORE] Using local SQLite store at {}", db_path);
            let store = sqlite::SqliteStore::new(db_path)?;
            store.create_schema().await?;
            if let Some(seed_file) = seed_file {
                let count = store.seed_from_file(seed_file).await?;
                log!("[STORE] Seeded {} pavilions from {}", count, seed_file.display());
            }
            Ok(Arc::new(store))
        }
    }
}
