use crate::error::{Error, Result};
use crate::gesture::series::{ms, Thresholds};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default maximum gap between taps of one series (ms)
pub const DEFAULT_TAP_SPEED_MS: f64 = 500.0;
/// Default maximum movement between taps of one series (px)
pub const DEFAULT_DISTANCE: f64 = 40.0;
/// Default debounce window of the exclusive dispatcher (ms)
pub const DEFAULT_XOR_SPEED_MS: f64 = 300.0;

/// Falls back to `default` for anything that is not a positive finite number.
pub fn coerce_threshold(raw: Option<f64>, default: f64) -> f64 {
    match raw {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => default,
    }
}

/// Parse a threshold from text, e.g. a command-line flag
pub fn parse_threshold(raw: &str, default: f64) -> f64 {
    coerce_threshold(raw.trim().parse().ok(), default)
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub tap: TapConfig,
    #[serde(default)]
    pub xor: XorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TapConfig {
    /// Max delay between taps of one series, in milliseconds
    #[serde(default = "default_tap_speed", deserialize_with = "lenient_tap_speed")]
    pub speed: f64,
    /// Max distance between taps of one series, in pixels
    #[serde(default = "default_distance", deserialize_with = "lenient_distance")]
    pub distance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct XorConfig {
    /// Debounce window before a lower click count commits, in milliseconds
    #[serde(default = "default_xor_speed", deserialize_with = "lenient_xor_speed")]
    pub speed: f64,
}

// Default value helpers
fn default_tap_speed() -> f64 {
    DEFAULT_TAP_SPEED_MS
}
fn default_distance() -> f64 {
    DEFAULT_DISTANCE
}
fn default_xor_speed() -> f64 {
    DEFAULT_XOR_SPEED_MS
}

/// Accepts integers, floats and numeric strings; anything else is `None`
fn lenient<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<f64>, D::Error> {
    let value = toml::Value::deserialize(deserializer)?;
    Ok(match value {
        toml::Value::Integer(i) => Some(i as f64),
        toml::Value::Float(f) => Some(f),
        toml::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_tap_speed<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<f64, D::Error> {
    Ok(coerce_threshold(lenient(d)?, DEFAULT_TAP_SPEED_MS))
}

fn lenient_distance<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<f64, D::Error> {
    Ok(coerce_threshold(lenient(d)?, DEFAULT_DISTANCE))
}

fn lenient_xor_speed<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<f64, D::Error> {
    Ok(coerce_threshold(lenient(d)?, DEFAULT_XOR_SPEED_MS))
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_TAP_SPEED_MS,
            distance: DEFAULT_DISTANCE,
        }
    }
}

impl Default for XorConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_XOR_SPEED_MS,
        }
    }
}

impl Config {
    /// Load configuration from the default location, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::from_path(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e}; using default configuration");
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Get the path to the config file
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tapgesture").join("config.toml"))
    }

    /// Save configuration to the default config file location
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().ok_or(Error::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let write_err = |source: std::io::Error| Error::ConfigWrite {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(write_err)
    }

    /// Series windows for tap detection
    pub fn thresholds(&self) -> Thresholds {
        Thresholds::coerce(Some(self.tap.speed), Some(self.tap.distance))
    }

    /// Debounce window for the exclusive dispatcher
    pub fn xor_speed(&self) -> Duration {
        ms(coerce_threshold(Some(self.xor.speed), DEFAULT_XOR_SPEED_MS))
    }
}
