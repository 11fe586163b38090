use async_trait::async_trait;
use geo::Polygon;
use parcelgis_core::error::Result;
use parcelgis_core::models::CandidateDocument;

/// Port for candidate geometry lookups backing the spatial joins.
///
/// The window is a coarse geographic filter polygon in WGS84 degrees;
/// adapters return matching documents in a stable fetch order with their
/// geometry still geographic.
#[async_trait]
pub trait CandidateStore: Send + Sync {
    /// Candidates whose geometry intersects the window (enrichment mode).
    async fn fetch_intersecting(
        &self,
        table: &str,
        window: &Polygon<f64>,
    ) -> Result<Vec<CandidateDocument>>;

    /// Candidates lying entirely inside the window (weighted mode).
    async fn fetch_within(
        &self,
        table: &str,
        window: &Polygon<f64>,
    ) -> Result<Vec<CandidateDocument>>;
}
