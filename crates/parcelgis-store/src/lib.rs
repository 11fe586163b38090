//! ParcelGIS Store - candidate geometry ports and adapters
//!
//! Defines the candidate store port consumed by the spatial joins and
//! provides the PostGIS adapter plus an in-memory adapter for development
//! and tests.

pub mod memory;
pub mod ports;
pub mod postgres;
