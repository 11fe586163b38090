use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::Value;

use crate::dto::SocResponse;
use crate::error::ApiError;
use crate::services::SocService;
use crate::state::AppState;

pub async fn soc_info(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<SocResponse>, ApiError> {
    tracing::info!("Processing weighted-average request");

    let context = state.ready()?;
    let result = SocService::execute(&context, &body).await?;

    Ok(Json(result))
}
