//! Buffer construction for spatial queries.
//!
//! Store lookups happen in WGS84 degree space, so metric distances are
//! converted with the spherical approximation `degrees(meters / R)`. The
//! window is the envelope expanded on all sides, a strict superset of the
//! round buffer it stands in for; exact inclusion is decided later with
//! projected coordinates.

use geo::{BoundingRect, Geometry, Polygon, Rect};

use parcelgis_core::error::{ParcelError, Result};

/// Mean earth radius in meters, matching the degree conversion used by the
/// stored geometries.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Coarse query window around a WGS84 geometry, expanded by `meters`
/// converted to degrees.
pub fn search_window(geometry: &Geometry<f64>, meters: f64) -> Result<Polygon<f64>> {
    let margin = (meters / EARTH_RADIUS_M).to_degrees();
    Ok(expand_envelope(geometry, margin)?.to_polygon())
}

/// Expand a raster cell to its full footprint: a cell is stored as its
/// center (or a shrunken shape) and covers a `resolution`-sized square.
pub fn cell_square(cell: &Geometry<f64>, resolution: f64) -> Result<Polygon<f64>> {
    Ok(expand_envelope(cell, resolution / 2.0)?.to_polygon())
}

/// Buffer a geometry in projected coordinates. Areal geometry gets a true
/// offset polygon with miter joins; anything else falls back to envelope
/// expansion.
pub fn planar_buffer(geometry: &Geometry<f64>, distance: f64) -> Result<Geometry<f64>> {
    match geometry {
        Geometry::Polygon(polygon) => Ok(Geometry::MultiPolygon(geo_buffer::buffer_polygon(
            polygon, distance,
        ))),
        Geometry::MultiPolygon(polygons) => Ok(Geometry::MultiPolygon(
            geo_buffer::buffer_multi_polygon(polygons, distance),
        )),
        Geometry::Rect(rect) => Ok(Geometry::MultiPolygon(geo_buffer::buffer_polygon(
            &rect.to_polygon(),
            distance,
        ))),
        Geometry::Triangle(triangle) => Ok(Geometry::MultiPolygon(geo_buffer::buffer_polygon(
            &triangle.to_polygon(),
            distance,
        ))),
        other => Ok(Geometry::Polygon(
            expand_envelope(other, distance)?.to_polygon(),
        )),
    }
}

fn expand_envelope(geometry: &Geometry<f64>, margin: f64) -> Result<Rect<f64>> {
    let envelope = geometry.bounding_rect().ok_or_else(|| {
        ParcelError::Internal("geometry without coordinates cannot be buffered".to_string())
    })?;
    Ok(Rect::new(
        (envelope.min().x - margin, envelope.min().y - margin),
        (envelope.max().x + margin, envelope.max().y + margin),
    ))
}
