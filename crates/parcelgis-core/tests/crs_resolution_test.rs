//! Request-level CRS resolution: parse a GeoJSON body, then resolve the
//! declared CRS the way the services do.

use parcelgis_core::crs::{self, CrsId};
use parcelgis_core::input;
use parcelgis_core::ParcelError;
use serde_json::json;

fn feature(declaration: serde_json::Value) -> serde_json::Value {
    json!({
        "type": "Feature",
        "geometry": {
            "type": "Polygon",
            "coordinates": [[[2.35, 48.85], [2.36, 48.85], [2.36, 48.86], [2.35, 48.86], [2.35, 48.85]]]
        },
        "properties": declaration
    })
}

#[test]
fn single_feature_resolves_declared_crs() {
    let body = feature(json!({
        "legal_crs": { "type": "EPSG", "properties": { "code": 2154 } }
    }));
    let parsed = input::parse_feature(&body).unwrap();
    assert_eq!(crs::resolve_feature(&parsed).unwrap(), CrsId::new(2154));
}

#[test]
fn collection_with_mixed_declarations_fails() {
    let body = json!({
        "type": "FeatureCollection",
        "features": [
            feature(json!({ "legal_crs": { "type": "EPSG", "properties": { "code": 2154 } } })),
            feature(json!({ "legal_crs": { "type": "EPSG", "properties": { "code": 3857 } } })),
        ]
    });
    let parsed = input::parse_collection(&body).unwrap();
    let err = crs::resolve_collection(&parsed).unwrap_err();
    assert!(matches!(err, ParcelError::MixedCrs { .. }));
}

#[test]
fn collection_member_without_declaration_fails() {
    let body = json!({
        "type": "FeatureCollection",
        "features": [
            feature(json!({ "legal_crs": { "type": "EPSG", "properties": { "code": 2154 } } })),
            feature(json!({ "cadastral_ref": "ABC-123" })),
        ]
    });
    let parsed = input::parse_collection(&body).unwrap();
    let err = crs::resolve_collection(&parsed).unwrap_err();
    assert!(matches!(err, ParcelError::MissingCrs { .. }));
}

#[test]
fn legal_crs_wins_over_plain_crs_per_feature() {
    let body = feature(json!({
        "crs": { "type": "EPSG", "properties": { "code": 4326 } },
        "legal_crs": { "type": "EPSG", "properties": { "code": 25832 } }
    }));
    let parsed = input::parse_feature(&body).unwrap();
    assert_eq!(crs::resolve_feature(&parsed).unwrap(), CrsId::new(25832));
}
