//! Error types for ParcelGIS

use thiserror::Error;

use crate::crs::CrsId;

#[derive(Debug, Error)]
pub enum ParcelError {
    // Readiness
    #[error("The service is loading and is temporarily unavailable.")]
    NotReady,

    // Input validation errors
    #[error("Malformed input: {reason}")]
    MalformedInput { reason: String },

    #[error("Wrong feature type: expected {expected}, got {got}")]
    WrongFeatureType { expected: &'static str, got: String },

    #[error("Feature {feature} has no CRS declaration; specify one under 'crs' or 'legal_crs'")]
    MissingCrs { feature: String },

    #[error("Features declare different CRS: {first} and {second}")]
    MixedCrs { first: CrsId, second: CrsId },

    #[error("Unsupported CRS declaration: {reason}")]
    UnsupportedCrs { reason: String },

    // Projection errors
    #[error("Projection to {crs} failed: {reason}")]
    Projection { crs: CrsId, reason: String },

    // Store errors
    #[error("Geometry store unavailable: {reason}")]
    StoreUnavailable { reason: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // Unexpected faults
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, ParcelError>;
