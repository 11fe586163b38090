//! PostGIS candidate store adapter.

use std::time::Duration;

use async_trait::async_trait;
use geo::Polygon;
use serde_json::Value;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use parcelgis_core::error::{ParcelError, Result};
use parcelgis_core::models::CandidateDocument;

use crate::ports::CandidateStore;

/// Candidate store backed by one PostGIS table per candidate set.
///
/// Tables carry an `id` column, a WGS84 `geometry` column and a JSONB
/// `properties` column. Table names come from configuration, never from
/// request input.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect and probe the database. Connection and probe failures both
    /// surface as [`ParcelError::StoreUnavailable`] so callers can answer
    /// retry-later.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await
            .map_err(|e| unavailable(format!("failed to connect to database: {}", e)))?;

        // Test connection by executing a simple query
        sqlx::query("SELECT 1")
            .fetch_one(&pool)
            .await
            .map_err(|e| unavailable(format!("connection test failed: {}", e)))?;

        Ok(Self { pool })
    }

    async fn fetch(
        &self,
        table: &str,
        window: &Polygon<f64>,
        predicate: &str,
    ) -> Result<Vec<CandidateDocument>> {
        let window_json =
            serde_json::to_string(&geojson::Geometry::new(geojson::Value::from(window)))
                .map_err(|e| {
                    ParcelError::Internal(format!("search window is not serializable: {}", e))
                })?;

        let query = format!(
            r#"
            SELECT id::text AS id, ST_AsGeoJSON(geometry) AS geometry, properties
            FROM {}
            WHERE {}
            ORDER BY id
            "#,
            table, predicate
        );

        let rows = sqlx::query(&query)
            .bind(window_json)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| unavailable(format!("query against '{}' failed: {}", table, e)))?;

        rows.into_iter().map(|row| decode_row(&row, table)).collect()
    }
}

#[async_trait]
impl CandidateStore for PostgresStore {
    async fn fetch_intersecting(
        &self,
        table: &str,
        window: &Polygon<f64>,
    ) -> Result<Vec<CandidateDocument>> {
        self.fetch(
            table,
            window,
            "ST_Intersects(geometry, ST_GeomFromGeoJSON($1))",
        )
        .await
    }

    async fn fetch_within(
        &self,
        table: &str,
        window: &Polygon<f64>,
    ) -> Result<Vec<CandidateDocument>> {
        self.fetch(table, window, "ST_Within(geometry, ST_GeomFromGeoJSON($1))")
            .await
    }
}

fn decode_row(row: &PgRow, table: &str) -> Result<CandidateDocument> {
    let id: Option<String> = row
        .try_get("id")
        .map_err(|e| corrupt_row(table, &e.to_string()))?;

    let geometry_text: String = row
        .try_get("geometry")
        .map_err(|e| corrupt_row(table, &e.to_string()))?;
    let geometry: geojson::Geometry = serde_json::from_str(&geometry_text)
        .map_err(|e| corrupt_row(table, &e.to_string()))?;
    let geometry = geo::Geometry::<f64>::try_from(geometry)
        .map_err(|e| corrupt_row(table, &e.to_string()))?;

    let properties: Option<Value> = row
        .try_get("properties")
        .map_err(|e| corrupt_row(table, &e.to_string()))?;
    let properties = properties
        .and_then(|value| value.as_object().cloned())
        .unwrap_or_default();

    Ok(CandidateDocument::new(
        id.map(Value::String),
        geometry,
        properties,
    ))
}

fn unavailable(reason: String) -> ParcelError {
    ParcelError::StoreUnavailable { reason }
}

fn corrupt_row(table: &str, detail: &str) -> ParcelError {
    ParcelError::Internal(format!("row from '{}' is not decodable: {}", table, detail))
}
