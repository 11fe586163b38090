//! EPSG coordinate reference system identifiers and declaration parsing.
//!
//! Features declare their legal CRS in `properties` under `legal_crs`
//! (preferred) or `crs`, shaped `{"type": "EPSG", "properties": {"code": 2154}}`.
//! Only EPSG-coded systems are supported; anything else is rejected before
//! geometry work starts.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{ParcelError, Result};
use crate::models::{ParcelCollection, ParcelFeature};

/// An EPSG coordinate reference system identifier.
///
/// Serializes as the `EPSG:<code>` string used in responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CrsId(u32);

impl CrsId {
    /// WGS84 geographic coordinates, the CRS of all incoming GeoJSON.
    pub const WGS84: CrsId = CrsId(4326);

    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    pub fn code(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CrsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.0)
    }
}

impl Serialize for CrsId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of parsing a feature's CRS declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrsDeclaration {
    /// A well-formed EPSG declaration.
    Resolved(CrsId),
    /// Neither `legal_crs` nor `crs` is present in the properties.
    Missing,
    /// A declaration is present but is not usable (non-EPSG authority,
    /// missing or non-numeric code).
    Unsupported(String),
}

impl CrsDeclaration {
    /// Parse the declaration from a feature property bag, preferring
    /// `legal_crs` over `crs`.
    pub fn from_properties(properties: &Map<String, Value>) -> Self {
        let declaration = properties
            .get("legal_crs")
            .or_else(|| properties.get("crs"));
        let Some(declaration) = declaration else {
            return CrsDeclaration::Missing;
        };

        match declaration.get("type").and_then(Value::as_str) {
            Some("EPSG") => {}
            Some(other) => {
                return CrsDeclaration::Unsupported(format!(
                    "authority '{}' is not EPSG",
                    other
                ))
            }
            None => return CrsDeclaration::Unsupported("declaration has no type".to_string()),
        }

        match declaration
            .get("properties")
            .and_then(|p| p.get("code"))
            .and_then(Value::as_u64)
        {
            Some(code) if u32::try_from(code).is_ok() => {
                CrsDeclaration::Resolved(CrsId(code as u32))
            }
            Some(code) => {
                CrsDeclaration::Unsupported(format!("EPSG code {} is out of range", code))
            }
            None => CrsDeclaration::Unsupported("declaration has no numeric code".to_string()),
        }
    }

    /// Convert into a resolved id, or the corresponding request error.
    /// `feature` identifies the feature in error messages.
    pub fn into_result(self, feature: &str) -> Result<CrsId> {
        match self {
            CrsDeclaration::Resolved(id) => Ok(id),
            CrsDeclaration::Missing => Err(ParcelError::MissingCrs {
                feature: feature.to_string(),
            }),
            CrsDeclaration::Unsupported(reason) => Err(ParcelError::UnsupportedCrs { reason }),
        }
    }
}

/// Resolve the declared CRS of a single feature.
pub fn resolve_feature(feature: &ParcelFeature) -> Result<CrsId> {
    CrsDeclaration::from_properties(&feature.properties).into_result(&feature.display_id())
}

/// Resolve the common CRS of a collection. Every member must carry a
/// declaration and all declarations must agree.
pub fn resolve_collection(collection: &ParcelCollection) -> Result<CrsId> {
    let mut resolved: Option<CrsId> = None;
    for (index, feature) in collection.features.iter().enumerate() {
        let label = feature
            .id
            .as_ref()
            .map(|_| feature.display_id())
            .unwrap_or_else(|| format!("#{}", index));
        let crs = CrsDeclaration::from_properties(&feature.properties).into_result(&label)?;
        match resolved {
            None => resolved = Some(crs),
            Some(first) if first != crs => {
                return Err(ParcelError::MixedCrs { first, second: crs });
            }
            Some(_) => {}
        }
    }
    resolved.ok_or_else(|| ParcelError::MalformedInput {
        reason: "feature collection is empty".to_string(),
    })
}
