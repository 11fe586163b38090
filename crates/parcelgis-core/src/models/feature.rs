//! Parsed request features.
//!
//! Geometries use the `geo` crate's closed variant tree directly, so every
//! downstream consumer (reprojection, descriptors, joins) matches on the
//! same exhaustive enum.

use geo::Geometry;
use serde_json::{Map, Value};

/// A single parsed GeoJSON feature with its property bag.
///
/// The geometry is in the source CRS (WGS84 degrees) until reprojected;
/// reprojection always produces a new geometry.
#[derive(Debug, Clone)]
pub struct ParcelFeature {
    /// Document identifier, taken from the GeoJSON `id` member or a foreign
    /// `_id` member. Echoed back in responses, `null` when absent.
    pub id: Option<Value>,
    pub geometry: Geometry<f64>,
    pub properties: Map<String, Value>,
}

impl ParcelFeature {
    pub fn new(geometry: Geometry<f64>, properties: Map<String, Value>) -> Self {
        Self {
            id: None,
            geometry,
            properties,
        }
    }

    pub fn with_id(mut self, id: Value) -> Self {
        self.id = Some(id);
        self
    }

    /// Identifier used in error messages and logs.
    pub fn display_id(&self) -> String {
        match &self.id {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "<anonymous>".to_string(),
        }
    }
}

/// An ordered sequence of features processed in one request.
#[derive(Debug, Clone)]
pub struct ParcelCollection {
    pub features: Vec<ParcelFeature>,
}

impl ParcelCollection {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
