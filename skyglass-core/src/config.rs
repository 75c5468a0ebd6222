use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf, time::Duration};

use crate::location::PositionOptions;
use crate::model::Coordinates;

/// Where `skyglass here` gets its coordinates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationSourceKind {
    /// Approximate position from IP geolocation.
    Ip,
    /// Coordinates stored in this file.
    Fixed,
    /// The user turned location off.
    Disabled,
}

impl LocationSourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationSourceKind::Ip => "ip",
            LocationSourceKind::Fixed => "fixed",
            LocationSourceKind::Disabled => "disabled",
        }
    }

    pub const fn all() -> &'static [LocationSourceKind] {
        &[LocationSourceKind::Ip, LocationSourceKind::Fixed, LocationSourceKind::Disabled]
    }
}

impl std::fmt::Display for LocationSourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `[location]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    pub source: Option<LocationSourceKind>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub high_accuracy: bool,
    pub timeout_ms: u64,
    pub max_cached_age_ms: u64,
    /// Override for the IP geolocation endpoint.
    pub ip_lookup_url: Option<String>,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            source: None,
            latitude: None,
            longitude: None,
            high_accuracy: true,
            timeout_ms: 10_000,
            max_cached_age_ms: 300_000,
            ip_lookup_url: None,
        }
    }
}

impl LocationConfig {
    pub fn position_options(&self) -> PositionOptions {
        PositionOptions {
            high_accuracy: self.high_accuracy,
            timeout: Duration::from_millis(self.timeout_ms),
            maximum_age: Duration::from_millis(self.max_cached_age_ms),
        }
    }

    /// Stored coordinates, if both halves are present.
    pub fn fixed_coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
///
/// [location]
/// source = "fixed"
/// latitude = 48.85
/// longitude = 2.35
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// OpenWeatherMap API key.
    pub api_key: Option<String>,

    /// Override for the OpenWeatherMap base URL.
    pub base_url: Option<String>,

    /// Transport timeout for weather requests. No timeout when absent.
    pub request_timeout_secs: Option<u64>,

    pub location: LocationConfig,
}

impl Config {
    /// Returns the API key, if one is configured and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|key| !key.is_empty())
    }

    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key().ok_or_else(|| {
            anyhow!(
                "No OpenWeatherMap API key configured.\n\
                 Hint: run `skyglass configure` and enter your API key."
            )
        })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn set_fixed_location(&mut self, coords: Coordinates) {
        self.location.source = Some(LocationSourceKind::Fixed);
        self.location.latitude = Some(coords.latitude);
        self.location.longitude = Some(coords.longitude);
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skyglass", "skyglass")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
