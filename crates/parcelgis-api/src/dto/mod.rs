mod request;
mod response;

pub use request::NaturaParams;
pub use response::{CentroidRecord, GisEntry, GisInfoResponse, HealthResponse, NaturaResponse, SocResponse};
