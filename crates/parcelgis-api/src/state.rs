use std::sync::{Arc, OnceLock};

use parcelgis_core::config::ServiceConfig;
use parcelgis_core::error::{ParcelError, Result};
use parcelgis_geo::TransformEngine;
use parcelgis_store::memory::MemoryCandidateStore;
use parcelgis_store::ports::CandidateStore;
use parcelgis_store::postgres::PostgresStore;

/// Everything a request needs: configuration, the candidate store and the
/// projection cache. Built once by initialization, shared read-only.
pub struct ServiceContext {
    pub config: ServiceConfig,
    pub store: Arc<dyn CandidateStore>,
    pub transforms: TransformEngine,
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ServiceContext {
    /// Connect the candidate store and warm the projection cache.
    pub async fn initialize(config: ServiceConfig) -> Result<Self> {
        let store: Arc<dyn CandidateStore> = match &config.database_url {
            Some(url) => {
                tracing::info!("DATABASE_URL found, connecting to PostGIS...");
                let store = PostgresStore::connect(url).await?;
                tracing::info!("Connected to PostGIS");
                Arc::new(store)
            }
            None => {
                tracing::info!("Using in-memory candidate store (set DATABASE_URL for PostGIS)");
                Arc::new(MemoryCandidateStore::new())
            }
        };

        let transforms = TransformEngine::new();
        transforms.warm(config.source_crs)?;

        Ok(Self {
            config,
            store,
            transforms,
        })
    }

    /// Build a context over an existing store, for tests and embedding.
    pub fn with_store(config: ServiceConfig, store: Arc<dyn CandidateStore>) -> Self {
        Self {
            config,
            store,
            transforms: TransformEngine::new(),
        }
    }
}

/// Shared handler state holding the service context once initialization
/// has published it.
#[derive(Default)]
pub struct AppState {
    context: OnceLock<Arc<ServiceContext>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish the initialized context. Initialization runs once; a second
    /// call keeps the first context.
    pub fn install(&self, context: Arc<ServiceContext>) {
        if self.context.set(context).is_err() {
            tracing::warn!("service context installed twice, keeping the first");
        }
    }

    /// The context, or `NotReady` while initialization is still running.
    pub fn ready(&self) -> Result<Arc<ServiceContext>> {
        self.context.get().cloned().ok_or(ParcelError::NotReady)
    }
}
