//! Full geometry pipeline on a real payload: parse, resolve the CRS,
//! reproject and compare descriptors against hand-computed references.

use parcelgis_core::crs::{self, CrsId};
use parcelgis_core::input;
use parcelgis_geo::{descriptor, TransformEngine};
use serde_json::json;

const WEB_MERCATOR: CrsId = CrsId::new(3857);

/// 0.001 deg of longitude at the equator maps to 111.3194908 m in
/// EPSG:3857 (20037508.342789244 / 180 / 1000).
const MERCATOR_STEP_M: f64 = 111.319_490_8;

fn equator_square() -> serde_json::Value {
    json!({
        "type": "Feature",
        "properties": {
            "legal_crs": { "type": "EPSG", "properties": { "code": 3857 } }
        },
        "geometry": {
            "type": "Polygon",
            "coordinates": [[
                [0.0, 0.0], [0.001, 0.0], [0.001, 0.001], [0.0, 0.001], [0.0, 0.0]
            ]]
        }
    })
}

#[test]
fn equator_square_metrics_match_the_mercator_reference() {
    let feature = input::parse_feature(&equator_square()).unwrap();
    let crs = crs::resolve_feature(&feature).unwrap();
    assert_eq!(crs, WEB_MERCATOR);

    let engine = TransformEngine::new();
    let projected = engine
        .reproject(&feature.geometry, CrsId::WGS84, crs)
        .unwrap();
    let pair =
        descriptor::describe_pair(&feature.geometry, CrsId::WGS84, &projected, crs).unwrap();

    assert!((pair.target.area - MERCATOR_STEP_M * MERCATOR_STEP_M).abs() < 0.1);
    assert!((pair.target.perimeter - 4.0 * MERCATOR_STEP_M).abs() < 0.01);
    assert!((pair.source.area - 1e-6).abs() < 1e-12);

    assert_eq!(pair.source.crs, CrsId::WGS84);
    assert!(!pair.source.is_reprojected);
    assert_eq!(pair.target.crs, WEB_MERCATOR);
    assert!(pair.target.is_reprojected);

    // The projected centroid sits halfway along the projected edges.
    assert!((pair.target.centroid[0] - MERCATOR_STEP_M / 2.0).abs() < 0.01);
    assert!((pair.target.center[0] - MERCATOR_STEP_M / 2.0).abs() < 0.01);
}

#[test]
fn descriptor_pair_keeps_source_coordinates_untouched() {
    let feature = input::parse_feature(&equator_square()).unwrap();
    let engine = TransformEngine::new();
    let projected = engine
        .reproject(&feature.geometry, CrsId::WGS84, WEB_MERCATOR)
        .unwrap();
    let pair = descriptor::describe_pair(
        &feature.geometry,
        CrsId::WGS84,
        &projected,
        WEB_MERCATOR,
    )
    .unwrap();

    assert!((pair.source.centroid[0] - 0.0005).abs() < 1e-12);
    assert!((pair.source.centroid[1] - 0.0005).abs() < 1e-12);
    assert_eq!(pair.source.centroid, pair.source.center);
}
