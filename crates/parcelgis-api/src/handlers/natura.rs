use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::Value;

use crate::dto::{NaturaParams, NaturaResponse};
use crate::error::ApiError;
use crate::services::NaturaService;
use crate::state::AppState;

pub async fn natura_info(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NaturaParams>,
    Json(body): Json<Value>,
) -> Result<Json<NaturaResponse>, ApiError> {
    tracing::info!(search = ?params.search, "Processing enrichment request");

    let context = state.ready()?;
    let result = NaturaService::execute(&context, &params, &body).await?;

    Ok(Json(result))
}
