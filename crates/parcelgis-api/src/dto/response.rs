use serde::Serialize;
use serde_json::Value;

use parcelgis_core::crs::CrsId;
use parcelgis_core::models::{DescriptorPair, EnrichmentRecord, GeometryDescriptor};

/// One coordinate record, tagged with the CRS it is expressed in.
#[derive(Debug, Serialize)]
pub struct CentroidRecord {
    pub crs: CrsId,
    #[serde(rename = "isReprojected")]
    pub is_reprojected: bool,
    pub coords: [f64; 2],
}

/// Descriptors of one geometry in the response layout: area and perimeter
/// in the target (legal) CRS, centroid and envelope center as
/// `[source, target]` records.
#[derive(Debug, Serialize)]
pub struct GisEntry {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub area: f64,
    pub perimeter: f64,
    pub centroid: [CentroidRecord; 2],
    pub center: [CentroidRecord; 2],
}

impl GisEntry {
    pub fn from_pair(id: Option<Value>, pair: &DescriptorPair) -> Self {
        Self {
            id,
            area: pair.target.area,
            perimeter: pair.target.perimeter,
            centroid: [centroid_record(&pair.source), centroid_record(&pair.target)],
            center: [center_record(&pair.source), center_record(&pair.target)],
        }
    }
}

fn centroid_record(descriptor: &GeometryDescriptor) -> CentroidRecord {
    CentroidRecord {
        crs: descriptor.crs,
        is_reprojected: descriptor.is_reprojected,
        coords: descriptor.centroid,
    }
}

fn center_record(descriptor: &GeometryDescriptor) -> CentroidRecord {
    CentroidRecord {
        crs: descriptor.crs,
        is_reprojected: descriptor.is_reprojected,
        coords: descriptor.center,
    }
}

/// Response of the descriptor endpoint.
#[derive(Debug, Serialize)]
pub struct GisInfoResponse {
    pub aggregated: GisEntry,
    pub details: Vec<GisEntry>,
}

/// Response of the enrichment endpoint.
#[derive(Debug, Serialize)]
pub struct NaturaResponse {
    pub natura2000: Vec<EnrichmentRecord>,
}

/// Response of the weighted-average endpoint. `soc` is null when no cell
/// overlaps the parcel.
#[derive(Debug, Serialize)]
pub struct SocResponse {
    pub soc: Option<f64>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
