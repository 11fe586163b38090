//! Geometry descriptor records.

use serde::Serialize;

use crate::crs::CrsId;

/// Planar metrics of one geometry under one CRS.
///
/// Produced once per geometry per CRS of interest and never mutated. The
/// `crs` field is bookkeeping only: the math is always planar over whatever
/// coordinates the geometry carries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeometryDescriptor {
    pub area: f64,
    pub perimeter: f64,
    pub centroid: [f64; 2],
    pub center: [f64; 2],
    pub crs: CrsId,
    #[serde(rename = "isReprojected")]
    pub is_reprojected: bool,
}

/// Descriptors of the same geometry in its source and target CRS.
///
/// The source descriptor always comes first; responses rely on this
/// `[source, target]` ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptorPair {
    pub source: GeometryDescriptor,
    pub target: GeometryDescriptor,
}

impl DescriptorPair {
    pub fn new(source: GeometryDescriptor, target: GeometryDescriptor) -> Self {
        debug_assert!(!source.is_reprojected && target.is_reprojected);
        Self { source, target }
    }
}
