use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use parcelgis_core::error::ParcelError;

/// Unified API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Validation errors answer 400 with the error text; readiness and store
/// outages answer 503 so callers know to retry; everything else is logged
/// in full and answered with a generic 500.
impl From<ParcelError> for ApiError {
    fn from(err: ParcelError) -> Self {
        match &err {
            ParcelError::MalformedInput { .. }
            | ParcelError::WrongFeatureType { .. }
            | ParcelError::MissingCrs { .. }
            | ParcelError::MixedCrs { .. }
            | ParcelError::UnsupportedCrs { .. } => Self::bad_request(err.to_string()),
            ParcelError::NotReady => Self::unavailable(err.to_string()),
            ParcelError::StoreUnavailable { .. } => {
                tracing::error!(error = %err, "Geometry store unavailable");
                Self::unavailable("The geometry store is unavailable, please retry later")
            }
            ParcelError::Projection { .. }
            | ParcelError::ConfigInvalid { .. }
            | ParcelError::Internal(_) => {
                tracing::error!(error = %err, "Unexpected error occurred");
                Self::internal("Unexpected error occurred")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parcelgis_core::crs::CrsId;

    #[test]
    fn validation_errors_map_to_bad_request() {
        let err = ApiError::from(ParcelError::MixedCrs {
            first: CrsId::new(2154),
            second: CrsId::new(25832),
        });
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message.contains("EPSG:2154"));
    }

    #[test]
    fn readiness_and_store_errors_map_to_service_unavailable() {
        let not_ready = ApiError::from(ParcelError::NotReady);
        assert_eq!(not_ready.status, StatusCode::SERVICE_UNAVAILABLE);

        let store = ApiError::from(ParcelError::StoreUnavailable {
            reason: "connection refused".to_string(),
        });
        assert_eq!(store.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_ne!(not_ready.message, store.message);
    }

    #[test]
    fn internal_faults_do_not_leak_details() {
        let err = ApiError::from(ParcelError::Internal("stack trace".to_string()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message.contains("stack trace"));
    }
}
