//! In-memory candidate store for development and testing.
//!
//! Lock access uses `RwLock::unwrap()` intentionally. Lock poisoning only
//! occurs when another thread panicked while holding the lock, which is an
//! unrecoverable state. Production deployments use the PostGIS backend.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use geo::{Intersects, Polygon, Within};
use parcelgis_core::error::Result;
use parcelgis_core::models::CandidateDocument;

use crate::ports::CandidateStore;

/// In-memory implementation of [`CandidateStore`].
///
/// Documents are grouped by table name and returned in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryCandidateStore {
    tables: Arc<RwLock<HashMap<String, Vec<CandidateDocument>>>>,
}

impl MemoryCandidateStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed one document into a table.
    pub fn insert(&self, table: &str, document: CandidateDocument) {
        let mut tables = self.tables.write().unwrap();
        tables.entry(table.to_string()).or_default().push(document);
    }

    fn fetch_matching<F>(&self, table: &str, keep: F) -> Vec<CandidateDocument>
    where
        F: Fn(&CandidateDocument) -> bool,
    {
        let tables = self.tables.read().unwrap();
        tables
            .get(table)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| keep(document))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl CandidateStore for MemoryCandidateStore {
    async fn fetch_intersecting(
        &self,
        table: &str,
        window: &Polygon<f64>,
    ) -> Result<Vec<CandidateDocument>> {
        Ok(self.fetch_matching(table, |document| document.geometry.intersects(window)))
    }

    async fn fetch_within(
        &self,
        table: &str,
        window: &Polygon<f64>,
    ) -> Result<Vec<CandidateDocument>> {
        Ok(self.fetch_matching(table, |document| document.geometry.is_within(window)))
    }
}
