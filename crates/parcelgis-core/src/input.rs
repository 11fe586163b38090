//! Strict GeoJSON request parsing.
//!
//! Requests arrive as raw JSON bodies: the descriptor service expects a
//! `FeatureCollection`, the join services a single `Feature`. Anything else
//! is rejected before any geometry work, as is a feature without a geometry
//! or with a geometry carrying no coordinates at all.

use geo::BoundingRect;
use geojson::GeoJson;
use serde_json::Value;

use crate::error::{ParcelError, Result};
use crate::models::{ParcelCollection, ParcelFeature};

/// Parse a request body as a GeoJSON FeatureCollection.
pub fn parse_collection(body: &Value) -> Result<ParcelCollection> {
    match parse_geojson(body)? {
        GeoJson::FeatureCollection(collection) => {
            if collection.features.is_empty() {
                return Err(malformed("feature collection is empty"));
            }
            let features = collection
                .features
                .into_iter()
                .enumerate()
                .map(|(index, feature)| convert_feature(feature, index))
                .collect::<Result<Vec<_>>>()?;
            Ok(ParcelCollection { features })
        }
        other => Err(ParcelError::WrongFeatureType {
            expected: "FeatureCollection",
            got: type_name(&other).to_string(),
        }),
    }
}

/// Parse a request body as a single GeoJSON Feature.
pub fn parse_feature(body: &Value) -> Result<ParcelFeature> {
    match parse_geojson(body)? {
        GeoJson::Feature(feature) => convert_feature(feature, 0),
        other => Err(ParcelError::WrongFeatureType {
            expected: "Feature",
            got: type_name(&other).to_string(),
        }),
    }
}

fn parse_geojson(body: &Value) -> Result<GeoJson> {
    GeoJson::from_json_value(body.clone())
        .map_err(|e| malformed(format!("not a valid GeoJSON document: {}", e)))
}

fn convert_feature(feature: geojson::Feature, index: usize) -> Result<ParcelFeature> {
    let id = feature_id(&feature);

    let Some(geometry) = feature.geometry else {
        return Err(malformed(format!("feature #{} has no geometry", index)));
    };
    let geometry = geo::Geometry::<f64>::try_from(geometry)
        .map_err(|e| malformed(format!("feature #{} has an invalid geometry: {}", index, e)))?;
    if geometry.bounding_rect().is_none() {
        return Err(malformed(format!(
            "feature #{} has a geometry without coordinates",
            index
        )));
    }

    let properties = feature.properties.unwrap_or_default();
    let mut parsed = ParcelFeature::new(geometry, properties);
    if let Some(id) = id {
        parsed = parsed.with_id(id);
    }
    Ok(parsed)
}

/// The standard GeoJSON `id` member, or the foreign `_id` member that
/// store-exported documents carry.
fn feature_id(feature: &geojson::Feature) -> Option<Value> {
    match &feature.id {
        Some(geojson::feature::Id::String(s)) => return Some(Value::String(s.clone())),
        Some(geojson::feature::Id::Number(n)) => return Some(Value::Number(n.clone())),
        None => {}
    }
    feature
        .foreign_members
        .as_ref()
        .and_then(|members| members.get("_id"))
        .cloned()
}

fn type_name(document: &GeoJson) -> &'static str {
    match document {
        GeoJson::Feature(_) => "Feature",
        GeoJson::FeatureCollection(_) => "FeatureCollection",
        GeoJson::Geometry(_) => "Geometry",
    }
}

fn malformed(reason: impl Into<String>) -> ParcelError {
    ParcelError::MalformedInput {
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn square_feature(code: u64) -> Value {
        json!({
            "type": "Feature",
            "_id": "parcel-7",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]
            },
            "properties": {
                "legal_crs": { "type": "EPSG", "properties": { "code": code } }
            }
        })
    }

    #[test]
    fn parses_single_feature_with_foreign_id() {
        let feature = parse_feature(&square_feature(2154)).unwrap();
        assert_eq!(feature.id, Some(json!("parcel-7")));
        assert!(matches!(feature.geometry, geo::Geometry::Polygon(_)));
        assert!(feature.properties.contains_key("legal_crs"));
    }

    #[test]
    fn parses_feature_collection_in_order() {
        let body = json!({
            "type": "FeatureCollection",
            "features": [square_feature(2154), square_feature(2154)]
        });
        let collection = parse_collection(&body).unwrap();
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn collection_endpoint_rejects_single_feature() {
        let err = parse_collection(&square_feature(2154)).unwrap_err();
        assert!(matches!(
            err,
            ParcelError::WrongFeatureType { expected: "FeatureCollection", .. }
        ));
    }

    #[test]
    fn feature_endpoint_rejects_collection() {
        let body = json!({ "type": "FeatureCollection", "features": [square_feature(2154)] });
        let err = parse_feature(&body).unwrap_err();
        assert!(matches!(
            err,
            ParcelError::WrongFeatureType { expected: "Feature", .. }
        ));
    }

    #[test]
    fn rejects_non_geojson_body() {
        let err = parse_feature(&json!({ "hello": "world" })).unwrap_err();
        assert!(matches!(err, ParcelError::MalformedInput { .. }));
    }

    #[test]
    fn rejects_feature_without_geometry() {
        let body = json!({ "type": "Feature", "geometry": null, "properties": {} });
        let err = parse_feature(&body).unwrap_err();
        assert!(matches!(err, ParcelError::MalformedInput { .. }));
    }

    #[test]
    fn rejects_empty_geometry() {
        let body = json!({
            "type": "Feature",
            "geometry": { "type": "GeometryCollection", "geometries": [] },
            "properties": {}
        });
        let err = parse_feature(&body).unwrap_err();
        assert!(matches!(err, ParcelError::MalformedInput { .. }));
    }

    #[test]
    fn rejects_empty_collection() {
        let body = json!({ "type": "FeatureCollection", "features": [] });
        let err = parse_collection(&body).unwrap_err();
        assert!(matches!(err, ParcelError::MalformedInput { .. }));
    }
}
