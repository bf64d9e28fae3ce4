//! High score records and the score-store contract
//!
//! Every backend (in-memory, local JSON, SQLite) implements [`ScoreStore`].
//! The game never calls a store directly; it goes through
//! [`crate::service::ScoreService`], which keeps store calls off the tick loop.

use serde::{Deserialize, Serialize};

use crate::consts::{DISPLAY_NAME_LENGTH, MAX_NAME_LENGTH};
use crate::error::StoreError;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScore {
    /// Store-assigned record id (insertion order)
    pub id: u64,
    pub player_name: String,
    pub score: u64,
    /// Unix timestamp (ms) when recorded
    pub played_at: f64,
}

impl HighScore {
    /// Name as shown on the leaderboard
    pub fn display_name(&self) -> String {
        self.player_name.chars().take(DISPLAY_NAME_LENGTH).collect()
    }
}

/// Persistence backend for high scores
pub trait ScoreStore {
    /// Best score recorded, 0 when the board is empty
    fn highest_score(&self) -> Result<u64, StoreError> {
        Ok(self.top_scores(1)?.first().map(|s| s.score).unwrap_or(0))
    }

    /// Up to `limit` scores, best first; ties keep insertion order
    fn top_scores(&self, limit: usize) -> Result<Vec<HighScore>, StoreError>;

    /// True when fewer than `top_n` stored scores beat `score`; 0 never qualifies
    fn is_high_score(&self, score: u64, top_n: usize) -> Result<bool, StoreError> {
        if score == 0 {
            return Ok(false);
        }
        let better = self
            .top_scores(top_n)?
            .iter()
            .filter(|s| s.score > score)
            .count();
        Ok(better < top_n)
    }

    /// Record a score; returns the new record id
    fn save_score(&mut self, player_name: &str, score: u64) -> Result<u64, StoreError>;
}

impl<T: ScoreStore + ?Sized> ScoreStore for Box<T> {
    fn highest_score(&self) -> Result<u64, StoreError> {
        (**self).highest_score()
    }

    fn top_scores(&self, limit: usize) -> Result<Vec<HighScore>, StoreError> {
        (**self).top_scores(limit)
    }

    fn is_high_score(&self, score: u64, top_n: usize) -> Result<bool, StoreError> {
        (**self).is_high_score(score, top_n)
    }

    fn save_score(&mut self, player_name: &str, score: u64) -> Result<u64, StoreError> {
        (**self).save_score(player_name, score)
    }
}

/// Reject names that are empty or longer than [`MAX_NAME_LENGTH`] characters
pub fn validate_name(name: &str) -> Result<(), StoreError> {
    let len = name.chars().count();
    if len == 0 || len > MAX_NAME_LENGTH {
        return Err(StoreError::InvalidName { len });
    }
    Ok(())
}

/// Sort best first; the sort is stable so equal scores keep insertion order
pub(crate) fn rank(scores: &mut [HighScore]) {
    scores.sort_by(|a, b| b.score.cmp(&a.score).then(a.id.cmp(&b.id)));
}

/// Current wall-clock time as Unix milliseconds
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Volatile score store
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    scores: Vec<HighScore>,
    next_id: u64,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self {
            scores: Vec::new(),
            next_id: 1,
        }
    }

    /// Store pre-filled with `(name, score)` pairs, in insertion order
    pub fn with_scores<'a>(entries: impl IntoIterator<Item = (&'a str, u64)>) -> Self {
        let mut store = Self::new();
        for (name, score) in entries {
            store.push(name, score);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    fn push(&mut self, name: &str, score: u64) -> u64 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        self.scores.push(HighScore {
            id,
            player_name: name.to_string(),
            score,
            played_at: now_ms(),
        });
        id
    }
}

impl ScoreStore for MemoryScoreStore {
    fn top_scores(&self, limit: usize) -> Result<Vec<HighScore>, StoreError> {
        let mut scores = self.scores.clone();
        rank(&mut scores);
        scores.truncate(limit);
        Ok(scores)
    }

    fn save_score(&mut self, player_name: &str, score: u64) -> Result<u64, StoreError> {
        validate_name(player_name)?;
        let id = self.push(player_name, score);
        log::info!("Saved score {score} for {player_name} (id {id})");
        Ok(id)
    }
}
