use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::Value;

use crate::dto::GisInfoResponse;
use crate::error::ApiError;
use crate::services::GisInfoService;
use crate::state::AppState;

pub async fn gis_info(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<GisInfoResponse>, ApiError> {
    tracing::info!("Processing descriptor request");

    let context = state.ready()?;
    let result = GisInfoService::execute(&context, &body).await?;

    Ok(Json(result))
}
