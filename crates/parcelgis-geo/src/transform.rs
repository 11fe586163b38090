//! EPSG-to-EPSG reprojection over geometry trees.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use geo::{BoundingRect, Coord, Geometry, MapCoords};
use proj4rs::proj::Proj;
use proj4rs::transform::transform;

use parcelgis_core::crs::CrsId;
use parcelgis_core::error::{ParcelError, Result};

/// Reprojects geometry trees between EPSG coordinate systems.
///
/// Projection contexts are parsed once per CRS and cached, so the per-point
/// transform cost is O(1) amortized. The projection primitive exchanges
/// radians on geographic CRSs; the engine converts at the boundary so
/// callers always see degrees on the geographic side and linear units on
/// the projected side. The cache lock is only held for map reads and
/// inserts, never across a transform.
pub struct TransformEngine {
    projections: RwLock<HashMap<CrsId, Arc<Proj>>>,
}

impl TransformEngine {
    pub fn new() -> Self {
        Self {
            projections: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve and cache the projection context for `crs` ahead of traffic.
    pub fn warm(&self, crs: CrsId) -> Result<()> {
        self.projection(crs).map(|_| ())
    }

    /// Reproject `geometry` from `from` to `to`, producing a new geometry
    /// with the same structure (ring closure, winding, multiplicities).
    ///
    /// Same-CRS calls short-circuit to a clone before any projection
    /// context is touched; geometries without coordinates pass through
    /// unchanged.
    pub fn reproject(
        &self,
        geometry: &Geometry<f64>,
        from: CrsId,
        to: CrsId,
    ) -> Result<Geometry<f64>> {
        if from == to {
            return Ok(geometry.clone());
        }
        if geometry.bounding_rect().is_none() {
            return Ok(geometry.clone());
        }

        let source = self.projection(from)?;
        let target = self.projection(to)?;
        let source_is_latlong = source.is_latlong();
        let target_is_latlong = target.is_latlong();

        geometry.try_map_coords(|coord| {
            let mut point = if source_is_latlong {
                (coord.x.to_radians(), coord.y.to_radians(), 0.0)
            } else {
                (coord.x, coord.y, 0.0)
            };
            transform(&source, &target, &mut point).map_err(|e| ParcelError::Projection {
                crs: to,
                reason: e.to_string(),
            })?;
            let (x, y) = if target_is_latlong {
                (point.0.to_degrees(), point.1.to_degrees())
            } else {
                (point.0, point.1)
            };
            if !(x.is_finite() && y.is_finite()) {
                return Err(ParcelError::Projection {
                    crs: to,
                    reason: format!(
                        "coordinate ({}, {}) falls outside the CRS domain",
                        coord.x, coord.y
                    ),
                });
            }
            Ok(Coord { x, y })
        })
    }

    fn projection(&self, crs: CrsId) -> Result<Arc<Proj>> {
        if let Some(projection) = self.projections.read().unwrap().get(&crs) {
            return Ok(Arc::clone(projection));
        }
        let built = Arc::new(build_projection(crs)?);
        let mut cache = self.projections.write().unwrap();
        let entry = cache.entry(crs).or_insert(built);
        Ok(Arc::clone(entry))
    }
}

impl Default for TransformEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn build_projection(crs: CrsId) -> Result<Proj> {
    let code = u16::try_from(crs.code()).map_err(|_| no_definition(crs))?;
    Proj::from_epsg_code(code).map_err(|_| no_definition(crs))
}

fn no_definition(crs: CrsId) -> ParcelError {
    ParcelError::UnsupportedCrs {
        reason: format!("no projection definition for {}", crs),
    }
}
