//! Geometry descriptors: planar area, perimeter, centroid, envelope center.
//!
//! All math is planar over whatever coordinates the geometry carries; the
//! CRS argument is a bookkeeping label. Descriptors are computed once with
//! the native coordinates and once with the reprojected ones, yielding a
//! `[source, target]` pair.

use geo::algorithm::line_measures::{metric_spaces::Euclidean, Length};
use geo::{Area, BoundingRect, Centroid, Geometry, LineString, Polygon};

use parcelgis_core::crs::CrsId;
use parcelgis_core::error::{ParcelError, Result};
use parcelgis_core::models::{DescriptorPair, GeometryDescriptor};

/// Compute the descriptor of `geometry` under the given CRS label.
pub fn describe(
    geometry: &Geometry<f64>,
    crs: CrsId,
    is_reprojected: bool,
) -> Result<GeometryDescriptor> {
    let centroid = geometry.centroid().ok_or_else(undescribable)?;
    let envelope = geometry.bounding_rect().ok_or_else(undescribable)?;
    let center = envelope.center();

    Ok(GeometryDescriptor {
        area: geometry.unsigned_area(),
        perimeter: perimeter(geometry),
        centroid: [centroid.x(), centroid.y()],
        center: [center.x, center.y],
        crs,
        is_reprojected,
    })
}

/// Descriptors of the same geometry before and after reprojection.
pub fn describe_pair(
    source: &Geometry<f64>,
    source_crs: CrsId,
    target: &Geometry<f64>,
    target_crs: CrsId,
) -> Result<DescriptorPair> {
    Ok(DescriptorPair::new(
        describe(source, source_crs, false)?,
        describe(target, target_crs, true)?,
    ))
}

/// Sum of all ring and line lengths. Zero-dimensional geometry contributes
/// nothing; polygon interiors count like shapely's `length`.
pub fn perimeter(geometry: &Geometry<f64>) -> f64 {
    match geometry {
        Geometry::Point(_) | Geometry::MultiPoint(_) => 0.0,
        Geometry::Line(line) => Euclidean.length(&LineString::from(*line)),
        Geometry::LineString(line) => Euclidean.length(line),
        Geometry::MultiLineString(lines) => {
            lines.0.iter().map(|line| Euclidean.length(line)).sum()
        }
        Geometry::Polygon(polygon) => polygon_perimeter(polygon),
        Geometry::MultiPolygon(polygons) => polygons.0.iter().map(polygon_perimeter).sum(),
        Geometry::Rect(rect) => polygon_perimeter(&rect.to_polygon()),
        Geometry::Triangle(triangle) => polygon_perimeter(&triangle.to_polygon()),
        Geometry::GeometryCollection(collection) => collection.0.iter().map(perimeter).sum(),
    }
}

fn polygon_perimeter(polygon: &Polygon<f64>) -> f64 {
    Euclidean.length(polygon.exterior())
        + polygon
            .interiors()
            .iter()
            .map(|ring| Euclidean.length(ring))
            .sum::<f64>()
}

fn undescribable() -> ParcelError {
    ParcelError::Internal("geometry without coordinates cannot be described".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{point, polygon, GeometryCollection};

    fn square(x0: f64, y0: f64, size: f64) -> Polygon<f64> {
        polygon![
            (x: x0, y: y0),
            (x: x0 + size, y: y0),
            (x: x0 + size, y: y0 + size),
            (x: x0, y: y0 + size),
        ]
    }

    #[test]
    fn square_centroid_equals_envelope_center() {
        let descriptor = describe(
            &Geometry::Polygon(square(0.0, 0.0, 10.0)),
            CrsId::new(2154),
            true,
        )
        .unwrap();

        assert_eq!(descriptor.centroid, [5.0, 5.0]);
        assert_eq!(descriptor.center, [5.0, 5.0]);
        assert!((descriptor.area - 100.0).abs() < 1e-9);
        assert!((descriptor.perimeter - 40.0).abs() < 1e-9);
        assert_eq!(descriptor.crs, CrsId::new(2154));
        assert!(descriptor.is_reprojected);
    }

    #[test]
    fn asymmetric_polygon_centroid_differs_from_envelope_center() {
        let l_shape = polygon![
            (x: 0.0, y: 0.0),
            (x: 2.0, y: 0.0),
            (x: 2.0, y: 1.0),
            (x: 1.0, y: 1.0),
            (x: 1.0, y: 2.0),
            (x: 0.0, y: 2.0),
        ];
        let descriptor = describe(&Geometry::Polygon(l_shape), CrsId::new(2154), true).unwrap();

        assert_eq!(descriptor.center, [1.0, 1.0]);
        assert!((descriptor.centroid[0] - 2.5 / 3.0).abs() < 1e-9);
        assert!((descriptor.centroid[1] - 2.5 / 3.0).abs() < 1e-9);
        assert!((descriptor.area - 3.0).abs() < 1e-9);
    }

    #[test]
    fn holes_subtract_area_and_add_perimeter() {
        let with_hole = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]),
            vec![LineString::from(vec![
                (1.0, 1.0),
                (3.0, 1.0),
                (3.0, 3.0),
                (1.0, 3.0),
                (1.0, 1.0),
            ])],
        );
        let descriptor = describe(&Geometry::Polygon(with_hole), CrsId::new(2154), true).unwrap();

        assert!((descriptor.area - 12.0).abs() < 1e-9);
        assert!((descriptor.perimeter - 24.0).abs() < 1e-9);
    }

    #[test]
    fn line_descriptor_uses_length_weighted_centroid() {
        let line = Geometry::LineString(LineString::from(vec![(0.0, 0.0), (2.0, 0.0)]));
        let descriptor = describe(&line, CrsId::new(2154), false).unwrap();

        assert_eq!(descriptor.centroid, [1.0, 0.0]);
        assert_eq!(descriptor.center, [1.0, 0.0]);
        assert_eq!(descriptor.area, 0.0);
        assert!((descriptor.perimeter - 2.0).abs() < 1e-9);
    }

    #[test]
    fn point_descriptor_falls_back_to_the_point_itself() {
        let descriptor = describe(
            &Geometry::Point(point! { x: 7.0, y: -3.0 }),
            CrsId::WGS84,
            false,
        )
        .unwrap();

        assert_eq!(descriptor.centroid, [7.0, -3.0]);
        assert_eq!(descriptor.center, [7.0, -3.0]);
        assert_eq!(descriptor.area, 0.0);
        assert_eq!(descriptor.perimeter, 0.0);
    }

    #[test]
    fn collection_descriptor_covers_the_combined_geometry() {
        let collection = Geometry::GeometryCollection(GeometryCollection(vec![
            Geometry::Polygon(square(0.0, 0.0, 1.0)),
            Geometry::Polygon(square(2.0, 0.0, 2.0)),
        ]));
        let descriptor = describe(&collection, CrsId::new(2154), true).unwrap();

        assert!((descriptor.area - 5.0).abs() < 1e-9);
        assert!((descriptor.perimeter - 12.0).abs() < 1e-9);
        // Combined-geometry centroid, not the average of member centroids.
        assert!((descriptor.centroid[0] - 2.5).abs() < 1e-9);
        assert!((descriptor.centroid[1] - 0.9).abs() < 1e-9);
        assert_eq!(descriptor.center, [2.0, 1.0]);
    }

    #[test]
    fn mixed_dimension_collection_centroid_follows_highest_dimension() {
        let collection = Geometry::GeometryCollection(GeometryCollection(vec![
            Geometry::Polygon(square(0.0, 0.0, 1.0)),
            Geometry::Point(point! { x: 10.0, y: 10.0 }),
        ]));
        let descriptor = describe(&collection, CrsId::new(2154), true).unwrap();

        assert_eq!(descriptor.centroid, [0.5, 0.5]);
        assert_eq!(descriptor.center, [5.0, 5.0]);
        assert!((descriptor.area - 1.0).abs() < 1e-9);
    }
}
