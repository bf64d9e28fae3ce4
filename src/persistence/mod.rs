//! Local score persistence
//!
//! Features:
//! - Versioned JSON envelope
//! - Works over any [`KeyValueStorage`] (LocalStorage on web, files on native)
//! - Corruption detection: unreadable data is moved to `<key>.bak` and
//!   the board starts empty

#[cfg(all(feature = "sqlite", not(target_arch = "wasm32")))]
pub mod sqlite;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::highscores::{HighScore, ScoreStore, now_ms, rank, validate_name};
use crate::platform::storage::KeyValueStorage;

/// Current envelope format
pub const ENVELOPE_VERSION: u32 = 1;

/// Default storage key for the leaderboard
pub const DEFAULT_KEY: &str = "asteroids_highscores";

/// Serialized form of the leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEnvelope {
    pub version: u32,
    pub next_id: u64,
    pub scores: Vec<HighScore>,
}

impl Default for ScoreEnvelope {
    fn default() -> Self {
        Self {
            version: ENVELOPE_VERSION,
            next_id: 1,
            scores: Vec::new(),
        }
    }
}

impl ScoreEnvelope {
    /// Decode and check the version
    pub fn decode(json: &str) -> Result<Self, String> {
        let envelope: ScoreEnvelope = serde_json::from_str(json).map_err(|e| e.to_string())?;
        if envelope.version != ENVELOPE_VERSION {
            return Err(format!("unsupported version {}", envelope.version));
        }
        Ok(envelope)
    }
}

/// Score store persisted as one JSON document under a storage key
#[derive(Debug)]
pub struct LocalScoreStore<S: KeyValueStorage> {
    storage: S,
    key: String,
    board: ScoreEnvelope,
}

impl<S: KeyValueStorage> LocalScoreStore<S> {
    /// Open the board stored under [`DEFAULT_KEY`]
    pub fn open(storage: S) -> Result<Self, StoreError> {
        Self::open_with_key(storage, DEFAULT_KEY)
    }

    pub fn open_with_key(mut storage: S, key: &str) -> Result<Self, StoreError> {
        let board = match storage.get(key)? {
            None => {
                log::info!("No high scores found under {key}, starting fresh");
                ScoreEnvelope::default()
            }
            Some(raw) => match ScoreEnvelope::decode(&raw) {
                Ok(board) => {
                    log::info!("Loaded {} high scores from {key}", board.scores.len());
                    board
                }
                Err(reason) => {
                    let backup = format!("{key}.bak");
                    log::warn!("Corrupt score data in {key} ({reason}), backing up to {backup}");
                    storage.set(&backup, &raw)?;
                    storage.remove(key)?;
                    ScoreEnvelope::default()
                }
            },
        };
        Ok(Self {
            storage,
            key: key.to_string(),
            board,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.board).map_err(|e| StoreError::Corrupt {
            key: self.key.clone(),
            reason: e.to_string(),
        })?;
        self.storage.set(&self.key, &json)
    }
}

impl<S: KeyValueStorage> ScoreStore for LocalScoreStore<S> {
    fn top_scores(&self, limit: usize) -> Result<Vec<HighScore>, StoreError> {
        let mut scores = self.board.scores.clone();
        rank(&mut scores);
        scores.truncate(limit);
        Ok(scores)
    }

    fn save_score(&mut self, player_name: &str, score: u64) -> Result<u64, StoreError> {
        validate_name(player_name)?;
        let id = self.board.next_id;
        self.board.scores.push(HighScore {
            id,
            player_name: player_name.to_string(),
            score,
            played_at: now_ms(),
        });
        self.board.next_id += 1;

        if let Err(e) = self.persist() {
            // Keep memory and storage consistent
            self.board.scores.pop();
            self.board.next_id -= 1;
            return Err(e);
        }
        log::info!("High scores saved ({} entries)", self.board.scores.len());
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::storage::MemoryStorage;

    #[test]
    fn test_fresh_board() {
        let store = LocalScoreStore::open(MemoryStorage::new()).unwrap();
        assert_eq!(store.highest_score().unwrap(), 0);
    }

    #[test]
    fn test_scores_survive_reopen() {
        let mut store = LocalScoreStore::open(MemoryStorage::new()).unwrap();
        assert_eq!(store.save_score("ABC", 500).unwrap(), 1);
        assert_eq!(store.save_score("XYZ", 700).unwrap(), 2);

        let storage = store.storage().clone();
        let reopened = LocalScoreStore::open(storage).unwrap();
        let top = reopened.top_scores(10).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].player_name, "XYZ");
        assert_eq!(top[1].id, 1);
    }

    #[test]
    fn test_corrupt_data_is_backed_up() {
        let mut storage = MemoryStorage::new();
        storage.set(DEFAULT_KEY, "{not json").unwrap();

        let mut store = LocalScoreStore::open(storage).unwrap();
        assert!(store.top_scores(10).unwrap().is_empty());
        assert_eq!(
            store.storage().get("asteroids_highscores.bak").unwrap().as_deref(),
            Some("{not json")
        );
        assert_eq!(store.storage().get(DEFAULT_KEY).unwrap(), None);

        // Reopening before any save finds nothing instead of backing up again
        let reopened = LocalScoreStore::open(store.storage().clone()).unwrap();
        assert!(reopened.top_scores(10).unwrap().is_empty());

        store.save_score("NEW", 10).unwrap();
        assert_eq!(store.highest_score().unwrap(), 10);
    }

    #[test]
    fn test_unknown_version_rejected() {
        let json = r#"{"version":99,"next_id":1,"scores":[]}"#;
        assert!(ScoreEnvelope::decode(json).is_err());
    }

    #[test]
    fn test_invalid_name_not_persisted() {
        let mut store = LocalScoreStore::open(MemoryStorage::new()).unwrap();
        assert!(store.save_score("", 10).is_err());
        assert_eq!(store.storage().get(DEFAULT_KEY).unwrap(), None);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_backed_store() {
        use crate::platform::storage::FileStorage;

        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = LocalScoreStore::open(FileStorage::new(dir.path()).unwrap()).unwrap();
            store.save_score("FILE", 1234).unwrap();
        }
        let store = LocalScoreStore::open(FileStorage::new(dir.path()).unwrap()).unwrap();
        assert_eq!(store.highest_score().unwrap(), 1234);
    }
}
