use serde_json::Value;

use parcelgis_core::{crs, input};
use parcelgis_geo::{aggregate, buffer};

use crate::dto::SocResponse;
use crate::error::ApiError;
use crate::state::ServiceContext;

/// Service computing the area-weighted soil value over a parcel.
pub struct SocService;

impl SocService {
    pub async fn execute(context: &ServiceContext, body: &Value) -> Result<SocResponse, ApiError> {
        let feature = input::parse_feature(body)?;
        let target_crs = crs::resolve_feature(&feature)?;
        let source_crs = context.config.source_crs;
        let settings = &context.config.soc;

        let window = buffer::search_window(&feature.geometry, settings.resolution)?;
        let documents = context.store.fetch_within(&settings.table, &window).await?;
        let fetched = documents.len();

        let parcel = context
            .transforms
            .reproject(&feature.geometry, source_crs, target_crs)?;
        let soc = aggregate::weighted_average(
            &context.transforms,
            &parcel,
            source_crs,
            target_crs,
            documents,
            settings.resolution,
            &settings.value_attribute,
        )?;

        tracing::info!(cells = fetched, "soc cells processed");

        Ok(SocResponse { soc })
    }
}
