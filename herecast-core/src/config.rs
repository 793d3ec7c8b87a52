use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

use crate::model::Coordinates;

/// Environment variable holding the OpenWeather API key. Wins over the file.
pub const API_KEY_ENV: &str = "HERECAST_API_KEY";
/// Environment overrides for the default location.
pub const LATITUDE_ENV: &str = "HERECAST_LAT";
pub const LONGITUDE_ENV: &str = "HERECAST_LON";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
///
/// [location]
/// lat = 60.17
/// lon = 24.94
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// OpenWeather API key. Absent or empty means the screen degrades to a
    /// fixed error state without touching the network.
    pub api_key: Option<String>,

    /// Default coordinates used when the platform has no location service.
    pub location: Option<Coordinates>,
}

/// Values read from the process environment at startup.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub api_key: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl EnvOverrides {
    /// Read overrides from the process environment. Unset variables are
    /// simply absent; set-but-unparseable coordinates are an error.
    pub fn from_process() -> Result<Self> {
        let api_key = env::var(API_KEY_ENV).ok().filter(|v| !v.is_empty());

        let latitude = parse_env_f64(LATITUDE_ENV)?;
        let longitude = parse_env_f64(LONGITUDE_ENV)?;

        Ok(Self { api_key, latitude, longitude })
    }
}

fn parse_env_f64(name: &str) -> Result<Option<f64>> {
    match env::var(name) {
        Ok(raw) if !raw.is_empty() => {
            let value = raw
                .parse::<f64>()
                .with_context(|| format!("Failed to parse {name}={raw} as a number"))?;
            Ok(Some(value))
        }
        _ => Ok(None),
    }
}

impl Config {
    /// Load the config file and apply environment overrides on top.
    pub fn load() -> Result<Self> {
        let cfg = Self::from_file()?;
        Ok(cfg.with_overrides(EnvOverrides::from_process()?))
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn from_file() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Apply environment overrides; each present value wins over the file.
    pub fn with_overrides(mut self, env: EnvOverrides) -> Self {
        if env.api_key.is_some() {
            self.api_key = env.api_key;
        }
        if let (Some(lat), Some(lon)) = (env.latitude, env.longitude) {
            self.location = Some(Coordinates::new(lat, lon));
        }
        self
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "herecast", "herecast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// API key as the screen sees it; absence reads as empty.
    pub fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or("")
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key().is_empty()
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn set_location(&mut self, coordinates: Coordinates) {
        self.location = Some(coordinates);
    }
}
