//! Stored geometries fetched for spatial joins.

use geo::Geometry;
use serde::Serialize;
use serde_json::{Map, Value};

/// Property keys stripped from candidate bags before they are echoed back:
/// store-side bookkeeping, not payload.
const RESERVED_PROPERTY_KEYS: [&str; 2] = ["crs", "version"];

/// A raw document returned by a candidate store fetch, geometry still in
/// geographic coordinates.
#[derive(Debug, Clone)]
pub struct CandidateDocument {
    pub id: Option<Value>,
    pub geometry: Geometry<f64>,
    pub properties: Map<String, Value>,
}

impl CandidateDocument {
    pub fn new(id: Option<Value>, geometry: Geometry<f64>, properties: Map<String, Value>) -> Self {
        Self {
            id,
            geometry,
            properties,
        }
    }
}

/// A candidate prepared for one spatial join.
///
/// Constructed once from a [`CandidateDocument`] with the reprojected
/// geometry and (in weighted mode) the numeric value extracted up front;
/// never mutated afterwards and discarded after aggregation.
#[derive(Debug, Clone)]
pub struct SpatialCandidate {
    pub id: Option<Value>,
    pub geometry: Geometry<f64>,
    /// Numeric value under the configured attribute, when present.
    pub value: Option<f64>,
    pub properties: Map<String, Value>,
}

impl SpatialCandidate {
    /// Build from a fetched document and its reprojected geometry.
    /// `value_attribute` selects the numeric property for weighted mode;
    /// pass `None` in enrichment mode.
    pub fn from_document(
        document: CandidateDocument,
        reprojected: Geometry<f64>,
        value_attribute: Option<&str>,
    ) -> Self {
        let value = value_attribute
            .and_then(|attr| document.properties.get(attr))
            .and_then(Value::as_f64);
        Self {
            id: document.id,
            geometry: reprojected,
            value,
            properties: document.properties,
        }
    }

    /// The candidate's property bag minus reserved bookkeeping keys.
    pub fn cleaned_properties(&self) -> Map<String, Value> {
        self.properties
            .iter()
            .filter(|(key, _)| !RESERVED_PROPERTY_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

/// One record of the proximity-enrichment result.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichmentRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub intersects: bool,
    #[serde(rename = "minDistance")]
    pub min_distance: f64,
    /// Intersection area, or length for line work; absent when the
    /// candidate is within range but does not intersect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intersection: Option<f64>,
    #[serde(rename = "wktType")]
    pub wkt_type: String,
    pub properties: Map<String, Value>,
}
