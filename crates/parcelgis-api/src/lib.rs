//! ParcelGIS API - HTTP surface of the parcel geometry services
//!
//! Serves the descriptor, enrichment and weighted-average endpoints over
//! axum. Requests are rejected with 503 until the background
//! initialization has published the service context.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
