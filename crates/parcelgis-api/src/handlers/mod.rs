mod gis_info;
mod health;
mod natura;
mod soc;

pub use gis_info::gis_info;
pub use health::health_check;
pub use natura::natura_info;
pub use soc::soc_info;
