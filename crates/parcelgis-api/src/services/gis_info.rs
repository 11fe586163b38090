use geo::{Geometry, GeometryCollection};
use serde_json::Value;

use parcelgis_core::{crs, input};
use parcelgis_geo::descriptor;

use crate::dto::{GisEntry, GisInfoResponse};
use crate::error::ApiError;
use crate::state::ServiceContext;

/// Service computing per-feature and aggregate geometry descriptors.
pub struct GisInfoService;

impl GisInfoService {
    /// Reproject every feature of the collection into its declared legal
    /// CRS and describe each geometry plus the combined collection.
    pub async fn execute(
        context: &ServiceContext,
        body: &Value,
    ) -> Result<GisInfoResponse, ApiError> {
        let collection = input::parse_collection(body)?;
        let target_crs = crs::resolve_collection(&collection)?;
        let source_crs = context.config.source_crs;

        let mut details = Vec::with_capacity(collection.len());
        let mut sources = Vec::with_capacity(collection.len());
        let mut targets = Vec::with_capacity(collection.len());

        for feature in &collection.features {
            let reprojected =
                context
                    .transforms
                    .reproject(&feature.geometry, source_crs, target_crs)?;
            let pair = descriptor::describe_pair(
                &feature.geometry,
                source_crs,
                &reprojected,
                target_crs,
            )?;
            details.push(GisEntry::from_pair(feature.id.clone(), &pair));
            sources.push(feature.geometry.clone());
            targets.push(reprojected);
        }

        // The aggregate covers the combined collection, not an average of
        // per-feature descriptors.
        let combined_source = Geometry::GeometryCollection(GeometryCollection(sources));
        let combined_target = Geometry::GeometryCollection(GeometryCollection(targets));
        let aggregated = descriptor::describe_pair(
            &combined_source,
            source_crs,
            &combined_target,
            target_crs,
        )?;

        tracing::info!(features = details.len(), "features processed");

        Ok(GisInfoResponse {
            aggregated: GisEntry::from_pair(None, &aggregated),
            details,
        })
    }
}
