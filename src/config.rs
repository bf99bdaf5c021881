//! Configuration module
//!
//! Reads `config.toml` (default: `~/.config/station-desk/config.toml`).
//! Every section is optional; missing values fall back to defaults.
//!
//! ```toml
//! [logging]
//! level = "debug"
//! format = "json"
//!
//! [[stations]]
//! id = "STATION-001"
//! name = "Alexanderplatz Charging Hub"
//! postal_code = "10178"
//! address = "Alexanderplatz 1"
//! latitude = 52.5219
//! longitude = 13.4132
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{OperationalStation, PostalCode, StationId, StationStatus};
use crate::shared::errors::ConfigError;

/// `<config_dir>/station-desk/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("station-desk")
        .join("config.toml")
}

// ── Logging ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

// ── Station seeds ───────────────────────────────────────────────

/// A station declared in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationSeed {
    pub id: String,
    pub name: String,
    pub postal_code: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// `available` (default) or `in_use`
    #[serde(default)]
    pub status: Option<String>,
}

impl StationSeed {
    pub fn new(id: &str, name: &str, postal_code: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            postal_code: postal_code.to_string(),
            address: None,
            latitude: None,
            longitude: None,
            status: None,
        }
    }

    pub fn to_station(&self) -> Result<OperationalStation, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidStation {
            id: self.id.clone(),
            reason,
        };

        let id = StationId::new(self.id.as_str()).map_err(|e| invalid(e.to_string()))?;
        let postal_code =
            PostalCode::new(self.postal_code.as_str()).map_err(|e| invalid(e.to_string()))?;
        if self.name.trim().is_empty() {
            return Err(invalid("name cannot be empty".to_string()));
        }

        let mut station = OperationalStation::new(id, self.name.trim(), postal_code);
        if let Some(address) = self.address.as_deref().filter(|a| !a.trim().is_empty()) {
            station = station.with_address(address.trim());
        }
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => station = station.with_coordinates(lat, lon),
            (None, None) => {}
            _ => return Err(invalid("latitude and longitude must be given together".to_string())),
        }
        if let Some(status) = &self.status {
            let status = status
                .parse::<StationStatus>()
                .map_err(|e| invalid(e.to_string()))?;
            station
                .apply_feed_status(status)
                .map_err(|e| invalid(e.to_string()))?;
        }

        Ok(station)
    }
}

// ── AppConfig ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub stations: Vec<StationSeed>,
}

impl Default for AppConfig {
    /// A handful of Berlin stations so the console is usable without a file
    fn default() -> Self {
        let mut alex = StationSeed::new("STATION-001", "Alexanderplatz Charging Hub", "10178");
        alex.address = Some("Alexanderplatz 1".to_string());
        alex.latitude = Some(52.5219);
        alex.longitude = Some(13.4132);

        let mut mitte = StationSeed::new("STATION-002", "Mitte Station", "10178");
        mitte.address = Some("Karl-Liebknecht-Str. 8".to_string());

        let mut kreuzberg = StationSeed::new("STATION-003", "Kreuzberg Station", "10785");
        kreuzberg.address = Some("Potsdamer Str. 96".to_string());

        Self {
            logging: LoggingConfig::default(),
            stations: vec![alex, mitte, kreuzberg],
        }
    }
}

impl AppConfig {
    /// Read and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Every seed must build a valid station and ids must be unique.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.seed_stations().map(|_| ())
    }

    pub fn seed_stations(&self) -> Result<Vec<OperationalStation>, ConfigError> {
        let mut seen = HashSet::new();
        self.stations
            .iter()
            .map(|seed| {
                let station = seed.to_station()?;
                if !seen.insert(station.id.clone()) {
                    return Err(ConfigError::DuplicateStation(station.id.to_string()));
                }
                Ok(station)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.seed_stations().unwrap().len(), 3);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg.logging.format, LogFormat::Pretty);
        assert_eq!(cfg.stations.len(), 3);
    }

    #[test]
    fn parses_logging_and_stations() {
        let cfg = AppConfig::from_toml(
            r#"
            [logging]
            level = "debug"
            format = "json"

            [[stations]]
            id = "BERLIN-1"
            name = "Tempelhof"
            postal_code = "12101"
            latitude = 52.47
            longitude = 13.40

            [[stations]]
            id = "BERLIN-2"
            name = "Wedding"
            postal_code = "13353"
            status = "in_use"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.logging.format, LogFormat::Json);

        let stations = cfg.seed_stations().unwrap();
        assert_eq!(stations.len(), 2);
        assert!(stations[0].coordinates.is_some());
        assert_eq!(stations[1].status(), StationStatus::InUse);
    }

    #[test]
    fn invalid_postal_code_is_reported() {
        let err = AppConfig::from_toml(
            r#"
            [[stations]]
            id = "HAMBURG-1"
            name = "Hafen"
            postal_code = "20095"
            "#,
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("HAMBURG-1"));
        assert!(msg.contains("Berlin"));
    }

    #[test]
    fn defective_seed_status_is_refused() {
        let mut seed = StationSeed::new("STATION-9", "Broken", "10115");
        seed.status = Some("defective".to_string());
        assert!(seed.to_station().is_err());
    }

    #[test]
    fn half_coordinates_are_refused() {
        let mut seed = StationSeed::new("STATION-9", "Somewhere", "10115");
        seed.latitude = Some(52.5);
        assert!(seed.to_station().is_err());
    }

    #[test]
    fn duplicate_ids_are_refused() {
        let cfg = AppConfig {
            logging: LoggingConfig::default(),
            stations: vec![
                StationSeed::new("STATION-1", "A", "10115"),
                StationSeed::new("STATION-1", "B", "10117"),
            ],
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::DuplicateStation(id)) if id == "STATION-1"
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = std::env::temp_dir().join("station-desk-does-not-exist.toml");
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn default_path_ends_with_app_dir() {
        let path = default_config_path();
        assert!(path.ends_with("station-desk/config.toml"));
    }
}
