mod gis_info;
mod natura;
mod soc;

pub use gis_info::GisInfoService;
pub use natura::NaturaService;
pub use soc::SocService;
