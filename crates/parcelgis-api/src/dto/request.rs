use serde::Deserialize;

/// Query parameters of the enrichment endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct NaturaParams {
    /// Search radius override in meters; the configured default applies
    /// when absent.
    pub search: Option<f64>,
}
