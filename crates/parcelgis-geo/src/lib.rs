//! ParcelGIS Geo - reprojection, descriptors and spatial aggregation
//!
//! The CPU-bound planar engines: EPSG reprojection with a cached projection
//! context per CRS, geometry descriptors (area, perimeter, centroid,
//! envelope center), coarse geographic buffering, and the two spatial-join
//! aggregation modes (proximity enrichment and area-weighted averaging).

pub mod aggregate;
pub mod buffer;
pub mod descriptor;
pub mod spatial;
pub mod transform;

pub use transform::TransformEngine;
