//! Error types for configuration and score storage.
//!
//! Gameplay never produces errors: simulation invariants are enforced with
//! assertions at construction. Only the collaborators around the core
//! (configuration loading, score stores) report failures through these types.

use std::fmt;

/// Failure reported by a score-store backend.
#[derive(Debug)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    Io(std::io::Error),
    /// Stored data could not be decoded.
    Corrupt {
        /// Storage key or path that held the bad data.
        key: String,
        /// Decoder message.
        reason: String,
    },
    /// Player name is empty or longer than the allowed maximum.
    InvalidName {
        /// Character count of the rejected name.
        len: usize,
    },
    /// Backend-specific failure (database driver, browser storage).
    Backend(String),
    /// The worker thread that owned the store has exited.
    WorkerGone,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "storage I/O failed: {e}"),
            Self::Corrupt { key, reason } => write!(f, "corrupt score data in {key}: {reason}"),
            Self::InvalidName { len } => write!(
                f,
                "player name must be 1..={} characters, got {len}",
                crate::consts::MAX_NAME_LENGTH
            ),
            Self::Backend(msg) => write!(f, "score backend error: {msg}"),
            Self::WorkerGone => write!(f, "score worker has shut down"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(all(feature = "sqlite", not(target_arch = "wasm32")))]
impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Backend(e.to_string())
    }
}

/// Invalid tuning or settings, detected at startup.
#[derive(Debug)]
pub enum ConfigError {
    /// A numeric parameter is outside its allowed range.
    OutOfRange {
        /// Parameter name as it appears in the config file.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
    /// The settings file exists but could not be read.
    Unreadable {
        path: String,
        source: std::io::Error,
    },
    /// The settings file is not valid JSON for [`crate::Settings`].
    Malformed {
        path: String,
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { field, value } => {
                write!(f, "config value {field} = {value} is out of range")
            }
            Self::Unreadable { path, source } => write!(f, "cannot read config {path}: {source}"),
            Self::Malformed { path, reason } => write!(f, "malformed config {path}: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unreadable { source, .. } => Some(source),
            _ => None,
        }
    }
}
