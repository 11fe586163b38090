//! Planar distance and overlap measures between a parcel and stored
//! candidates, evaluated on reprojected coordinates.

use geo::algorithm::line_measures::{metric_spaces::Euclidean, Distance, Length};
use geo::{Area, BooleanOps, Geometry, LineString, MultiLineString, MultiPolygon, Polygon};

/// Euclidean distance between two geometries. Zero when they touch or
/// overlap.
pub fn planar_distance(a: &Geometry<f64>, b: &Geometry<f64>) -> f64 {
    Euclidean.distance(a, b)
}

/// Area shared by two geometries. Zero unless both have an areal part.
pub fn overlap_area(a: &Geometry<f64>, b: &Geometry<f64>) -> f64 {
    match (as_multipolygon(a), as_multipolygon(b)) {
        (Some(a), Some(b)) => a.intersection(&b).unsigned_area(),
        _ => 0.0,
    }
}

/// Size of the intersection between a parcel and a candidate: the shared
/// area when there is one, otherwise the length of the shared section.
/// Degenerate contacts (corner touches, crossing lines) measure zero.
pub fn intersection_metric(parcel: &Geometry<f64>, candidate: &Geometry<f64>) -> f64 {
    match (as_multipolygon(parcel), as_multipolygon(candidate)) {
        (Some(parcel), Some(candidate)) => {
            let area = parcel.intersection(&candidate).unsigned_area();
            if area > 0.0 {
                area
            } else {
                line_length(&parcel.clip(&boundary_lines(&candidate), false))
            }
        }
        (Some(parcel), None) => as_lines(candidate)
            .map(|lines| line_length(&parcel.clip(&lines, false)))
            .unwrap_or(0.0),
        (None, Some(candidate)) => as_lines(parcel)
            .map(|lines| line_length(&candidate.clip(&lines, false)))
            .unwrap_or(0.0),
        (None, None) => 0.0,
    }
}

/// WKT-style type name, reported alongside enrichment records.
pub fn wkt_type(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "POINT",
        Geometry::MultiPoint(_) => "MULTIPOINT",
        Geometry::Line(_) | Geometry::LineString(_) => "LINESTRING",
        Geometry::MultiLineString(_) => "MULTILINESTRING",
        Geometry::Polygon(_) | Geometry::Rect(_) | Geometry::Triangle(_) => "POLYGON",
        Geometry::MultiPolygon(_) => "MULTIPOLYGON",
        Geometry::GeometryCollection(_) => "GEOMETRYCOLLECTION",
    }
}

fn as_multipolygon(geometry: &Geometry<f64>) -> Option<MultiPolygon<f64>> {
    match geometry {
        Geometry::Polygon(polygon) => Some(MultiPolygon(vec![polygon.clone()])),
        Geometry::MultiPolygon(polygons) => Some(polygons.clone()),
        Geometry::Rect(rect) => Some(MultiPolygon(vec![rect.to_polygon()])),
        Geometry::Triangle(triangle) => Some(MultiPolygon(vec![triangle.to_polygon()])),
        Geometry::GeometryCollection(collection) => {
            let parts: Vec<Polygon<f64>> = collection
                .0
                .iter()
                .filter_map(as_multipolygon)
                .flat_map(|multi| multi.0)
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(MultiPolygon(parts))
            }
        }
        _ => None,
    }
}

fn as_lines(geometry: &Geometry<f64>) -> Option<MultiLineString<f64>> {
    match geometry {
        Geometry::Line(line) => Some(MultiLineString(vec![LineString::from(*line)])),
        Geometry::LineString(line) => Some(MultiLineString(vec![line.clone()])),
        Geometry::MultiLineString(lines) => Some(lines.clone()),
        Geometry::GeometryCollection(collection) => {
            let parts: Vec<LineString<f64>> = collection
                .0
                .iter()
                .filter_map(as_lines)
                .flat_map(|multi| multi.0)
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(MultiLineString(parts))
            }
        }
        _ => None,
    }
}

fn boundary_lines(polygons: &MultiPolygon<f64>) -> MultiLineString<f64> {
    let mut rings = Vec::new();
    for polygon in &polygons.0 {
        rings.push(polygon.exterior().clone());
        rings.extend(polygon.interiors().iter().cloned());
    }
    MultiLineString(rings)
}

fn line_length(lines: &MultiLineString<f64>) -> f64 {
    lines.0.iter().map(|line| Euclidean.length(line)).sum()
}
