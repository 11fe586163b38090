//! ParcelGIS Core - domain models, CRS resolution, input parsing and configuration
//!
//! This crate contains the request-level domain logic shared by the ParcelGIS
//! services: parsed feature models, EPSG declaration handling, strict GeoJSON
//! input parsing and the environment-backed service configuration.

pub mod config;
pub mod crs;
pub mod error;
pub mod input;
pub mod models;

pub use error::{ParcelError, Result};
