//! Service configuration, read once from the environment at startup.
//!
//! Nothing here is re-read per request: the API binary loads a
//! [`ServiceConfig`] during initialization and shares it read-only.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use crate::crs::CrsId;
use crate::error::{ParcelError, Result};

/// Settings for the area-weighted (SOC) service.
#[derive(Debug, Clone)]
pub struct SocSettings {
    /// Store table/collection holding the raster cells.
    pub table: String,
    /// Cell resolution in meters.
    pub resolution: f64,
    /// Property key carrying the numeric cell value.
    pub value_attribute: String,
}

/// Settings for the proximity-enrichment (Natura 2000) service.
#[derive(Debug, Clone)]
pub struct NaturaSettings {
    /// Store table/collection holding the protected-area geometries.
    pub table: String,
    /// Default search radius in meters, overridable per request.
    pub default_search_distance: f64,
}

/// Process-wide configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    /// Postgres DSN; `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// The CRS all incoming GeoJSON coordinates are expressed in.
    pub source_crs: CrsId,
    pub soc: SocSettings,
    pub natura: NaturaSettings,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            database_url: None,
            source_crs: CrsId::WGS84,
            soc: SocSettings {
                table: "soc".to_string(),
                resolution: 500.0,
                value_attribute: "soc".to_string(),
            },
            natura: NaturaSettings {
                table: "natura2000".to_string(),
                default_search_distance: 100.0,
            },
        }
    }
}

impl ServiceConfig {
    /// Read configuration from the environment, falling back to defaults
    /// for anything unset. Invalid values fail startup.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(raw) = env::var("PARCELGIS_PORT") {
            config.port = parse_var("PARCELGIS_PORT", &raw)?;
        }
        if let Ok(url) = env::var("DATABASE_URL") {
            config.database_url = Some(url);
        }
        if let Ok(table) = env::var("PARCELGIS_SOC_TABLE") {
            config.soc.table = table;
        }
        if let Ok(raw) = env::var("PARCELGIS_SOC_RESOLUTION") {
            config.soc.resolution = parse_var("PARCELGIS_SOC_RESOLUTION", &raw)?;
        }
        if let Ok(attribute) = env::var("PARCELGIS_SOC_ATTRIBUTE") {
            config.soc.value_attribute = attribute;
        }
        if let Ok(table) = env::var("PARCELGIS_NATURA_TABLE") {
            config.natura.table = table;
        }
        if let Ok(raw) = env::var("PARCELGIS_NATURA_SEARCH_DISTANCE") {
            config.natura.default_search_distance =
                parse_var("PARCELGIS_NATURA_SEARCH_DISTANCE", &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.soc.resolution <= 0.0 {
            return Err(invalid("PARCELGIS_SOC_RESOLUTION", "must be positive"));
        }
        if self.natura.default_search_distance < 0.0 {
            return Err(invalid(
                "PARCELGIS_NATURA_SEARCH_DISTANCE",
                "must not be negative",
            ));
        }
        Ok(())
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e| invalid(key, format!("'{}' ({})", raw, e)))
}

fn invalid(key: &str, reason: impl Into<String>) -> ParcelError {
    ParcelError::ConfigInvalid {
        key: key.to_string(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 7] = [
        "PARCELGIS_PORT",
        "DATABASE_URL",
        "PARCELGIS_SOC_TABLE",
        "PARCELGIS_SOC_RESOLUTION",
        "PARCELGIS_SOC_ATTRIBUTE",
        "PARCELGIS_NATURA_TABLE",
        "PARCELGIS_NATURA_SEARCH_DISTANCE",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn defaults_apply_without_environment() {
        clear_env();
        let config = ServiceConfig::from_env().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url, None);
        assert_eq!(config.source_crs, CrsId::WGS84);
        assert_eq!(config.soc.table, "soc");
        assert_eq!(config.soc.resolution, 500.0);
        assert_eq!(config.natura.default_search_distance, 100.0);
    }

    #[test]
    #[serial]
    fn environment_overrides_defaults() {
        clear_env();
        env::set_var("PARCELGIS_PORT", "9000");
        env::set_var("PARCELGIS_SOC_RESOLUTION", "250");
        env::set_var("PARCELGIS_NATURA_SEARCH_DISTANCE", "2000");
        env::set_var("PARCELGIS_NATURA_TABLE", "protected_areas");

        let config = ServiceConfig::from_env().unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.soc.resolution, 250.0);
        assert_eq!(config.natura.default_search_distance, 2000.0);
        assert_eq!(config.natura.table, "protected_areas");
        clear_env();
    }

    #[test]
    #[serial]
    fn invalid_numeric_value_fails_startup() {
        clear_env();
        env::set_var("PARCELGIS_SOC_RESOLUTION", "five-hundred");
        let err = ServiceConfig::from_env().unwrap_err();
        assert!(matches!(
            err,
            ParcelError::ConfigInvalid { ref key, .. } if key == "PARCELGIS_SOC_RESOLUTION"
        ));
        clear_env();
    }

    #[test]
    #[serial]
    fn non_positive_resolution_is_rejected() {
        clear_env();
        env::set_var("PARCELGIS_SOC_RESOLUTION", "0");
        assert!(ServiceConfig::from_env().is_err());
        clear_env();
    }
}
