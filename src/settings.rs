//! Runtime settings
//!
//! Loaded from a JSON file on native, or from LocalStorage on the web.
//! Every field has a default, so a partial file only overrides what it names.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::{TARGET_FPS, TOP_SCORES};
use crate::error::ConfigError;
use crate::platform::storage::KeyValueStorage;
use crate::tuning::Tuning;

/// Which score store backs the leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreBackend {
    /// Nothing survives a restart
    Memory,
    /// Versioned JSON document; `path` is the directory holding it
    /// (ignored on the web, where LocalStorage is used)
    Json { path: PathBuf },
    /// SQLite database file (native builds with the `sqlite` feature)
    Sqlite { path: PathBuf },
}

impl Default for StoreBackend {
    fn default() -> Self {
        StoreBackend::Json {
            path: PathBuf::from("data"),
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub store: StoreBackend,
    /// Run store calls on a worker thread (native only)
    pub threaded_store: bool,
    /// Target frames per second for the loop
    pub frame_rate: u32,
    /// Fixed seed for reproducible runs; random when absent
    pub seed: Option<u64>,
    /// Leaderboard size used for qualification and display
    pub top_scores: usize,
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store: StoreBackend::default(),
            threaded_store: true,
            frame_rate: TARGET_FPS,
            seed: None,
            top_scores: TOP_SCORES,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "asteroids_settings";

    /// Parse and validate a JSON document; `origin` names it in errors
    pub fn from_json(json: &str, origin: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json).map_err(|e| ConfigError::Malformed {
            path: origin.to_string(),
            reason: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_rate == 0 {
            return Err(ConfigError::OutOfRange {
                field: "frame_rate",
                value: 0.0,
            });
        }
        if self.top_scores == 0 {
            return Err(ConfigError::OutOfRange {
                field: "top_scores",
                value: 0.0,
            });
        }
        self.tuning.validate()
    }

    /// Target frame duration in seconds
    pub fn frame_time(&self) -> f32 {
        1.0 / self.frame_rate as f32
    }

    /// Load from a JSON file; a missing file yields defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let settings = Self::from_json(&json, &display)?;
                log::info!("Loaded settings from {display}");
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {display}, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Unreadable {
                path: display,
                source,
            }),
        }
    }

    /// Load from key/value storage (LocalStorage on the web)
    ///
    /// Unreadable or invalid data falls back to defaults; settings are not
    /// worth refusing to start over.
    pub fn load_from(storage: &impl KeyValueStorage) -> Self {
        match storage.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json, Self::STORAGE_KEY) {
                Ok(settings) => {
                    log::info!("Loaded settings from storage");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring stored settings: {e}");
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Settings storage unavailable: {e}");
                Self::default()
            }
        }
    }
}
