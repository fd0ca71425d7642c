//! Application state.

use std::sync::Arc;

use folio_gallery::Gallery;
use folio_storage::{InMemoryStore, ObjectStore, R2Client};
use tracing::{info, warn};

use crate::config::{ApiConfig, StorageBackend};
use crate::error::ApiResult;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub storage: Arc<dyn ObjectStore>,
    pub gallery: Arc<Gallery>,
}

impl AppState {
    /// Create application state from config: builds the store and loads the
    /// manifest once.
    pub async fn new(config: ApiConfig) -> ApiResult<Self> {
        let storage: Arc<dyn ObjectStore> = match config.storage_backend {
            StorageBackend::R2 => {
                let client = R2Client::from_env()?;
                info!("Using R2 bucket {}", client.bucket());
                Arc::new(client)
            }
            StorageBackend::Memory => {
                warn!("Using in-memory storage, objects are lost on restart");
                Arc::new(InMemoryStore::new())
            }
        };

        if config.auth_key_secret.is_none() {
            warn!("AUTH_KEY_SECRET is not set, storage routes will reject every request");
        }

        let gallery = Gallery::load(&config.manifest_path).await;

        Ok(Self::from_parts(config, storage, gallery))
    }

    /// Assemble state from already-built parts.
    pub fn from_parts(config: ApiConfig, storage: Arc<dyn ObjectStore>, gallery: Gallery) -> Self {
        Self {
            config,
            storage,
            gallery: Arc::new(gallery),
        }
    }
}
