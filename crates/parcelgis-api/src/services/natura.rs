use serde_json::Value;

use parcelgis_core::error::ParcelError;
use parcelgis_core::{crs, input};
use parcelgis_geo::{aggregate, buffer};

use crate::dto::{NaturaParams, NaturaResponse};
use crate::error::ApiError;
use crate::state::ServiceContext;

/// Safety margin added to the coarse store filter so candidates sitting
/// right at the search distance survive the degree approximation.
const COARSE_MARGIN_M: f64 = 100.0;

/// Service enriching a parcel with nearby protected areas.
pub struct NaturaService;

impl NaturaService {
    pub async fn execute(
        context: &ServiceContext,
        params: &NaturaParams,
        body: &Value,
    ) -> Result<NaturaResponse, ApiError> {
        let feature = input::parse_feature(body)?;
        let target_crs = crs::resolve_feature(&feature)?;
        let source_crs = context.config.source_crs;

        let search_distance = params
            .search
            .unwrap_or(context.config.natura.default_search_distance);
        if !(search_distance >= 0.0) {
            return Err(ParcelError::MalformedInput {
                reason: "search distance must be a non-negative number".to_string(),
            }
            .into());
        }

        let window =
            buffer::search_window(&feature.geometry, search_distance + COARSE_MARGIN_M)?;
        let documents = context
            .store
            .fetch_intersecting(&context.config.natura.table, &window)
            .await?;

        let parcel = context
            .transforms
            .reproject(&feature.geometry, source_crs, target_crs)?;
        let records = aggregate::enrich_candidates(
            &context.transforms,
            &parcel,
            source_crs,
            target_crs,
            documents,
            search_distance,
        )?;

        tracing::info!(candidates = records.len(), "natura2000 features processed");

        Ok(NaturaResponse {
            natura2000: records,
        })
    }
}
