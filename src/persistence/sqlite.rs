//! SQLite score store (native, feature `sqlite`)

use std::path::Path;

use rusqlite::{Connection, params};

use crate::error::StoreError;
use crate::highscores::{HighScore, ScoreStore, now_ms, validate_name};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS high_scores (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    player_name TEXT NOT NULL,
    score INTEGER NOT NULL,
    played_at REAL NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_high_scores_score ON high_scores(score DESC);";

/// High scores in a single SQLite table
pub struct SqliteScoreStore {
    conn: Connection,
}

impl SqliteScoreStore {
    /// Open (or create) the database at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        log::info!("Opened score database {}", path.display());
        Self::with_connection(conn)
    }

    /// Private in-memory database
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }
}

impl ScoreStore for SqliteScoreStore {
    fn highest_score(&self) -> Result<u64, StoreError> {
        let max: Option<i64> =
            self.conn
                .query_row("SELECT MAX(score) FROM high_scores", [], |row| row.get(0))?;
        Ok(max.unwrap_or(0).max(0) as u64)
    }

    fn top_scores(&self, limit: usize) -> Result<Vec<HighScore>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, player_name, score, played_at FROM high_scores
             ORDER BY score DESC, id ASC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok(HighScore {
                id: row.get::<_, i64>(0)? as u64,
                player_name: row.get(1)?,
                score: row.get::<_, i64>(2)?.max(0) as u64,
                played_at: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn is_high_score(&self, score: u64, top_n: usize) -> Result<bool, StoreError> {
        if score == 0 {
            return Ok(false);
        }
        let better: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM high_scores WHERE score > ?1",
            params![score as i64],
            |row| row.get(0),
        )?;
        Ok((better as usize) < top_n)
    }

    fn save_score(&mut self, player_name: &str, score: u64) -> Result<u64, StoreError> {
        validate_name(player_name)?;
        self.conn.execute(
            "INSERT INTO high_scores (player_name, score, played_at) VALUES (?1, ?2, ?3)",
            params![player_name, score as i64, now_ms()],
        )?;
        let id = self.conn.last_insert_rowid() as u64;
        log::info!("Saved score {score} for {player_name} (row {id})");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_database() {
        let store = SqliteScoreStore::in_memory().unwrap();
        assert_eq!(store.highest_score().unwrap(), 0);
        assert!(store.top_scores(10).unwrap().is_empty());
        assert!(!store.is_high_score(0, 10).unwrap());
        assert!(store.is_high_score(5, 10).unwrap());
    }

    #[test]
    fn test_ordering_and_ties() {
        let mut store = SqliteScoreStore::in_memory().unwrap();
        store.save_score("a", 100).unwrap();
        store.save_score("b", 300).unwrap();
        store.save_score("c", 300).unwrap();
        store.save_score("d", 200).unwrap();

        let names: Vec<_> = store
            .top_scores(3)
            .unwrap()
            .into_iter()
            .map(|s| s.player_name)
            .collect();
        assert_eq!(names, vec!["b", "c", "d"]);
        assert_eq!(store.highest_score().unwrap(), 300);
    }

    #[test]
    fn test_qualification_counts_better_scores() {
        let mut store = SqliteScoreStore::in_memory().unwrap();
        for i in 1..=10 {
            store.save_score("p", i * 10).unwrap();
        }
        assert!(!store.is_high_score(5, 10).unwrap());
        assert!(store.is_high_score(10, 10).unwrap());
    }

    #[test]
    fn test_rejects_bad_names() {
        let mut store = SqliteScoreStore::in_memory().unwrap();
        assert!(store.save_score("", 1).is_err());
        assert!(store.top_scores(10).unwrap().is_empty());
    }

    #[test]
    fn test_file_database_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db").join("scores.db");
        {
            let mut store = SqliteScoreStore::open(&path).unwrap();
            assert_eq!(store.save_score("ABC", 500).unwrap(), 1);
        }
        let store = SqliteScoreStore::open(&path).unwrap();
        assert_eq!(store.top_scores(10).unwrap()[0].player_name, "ABC");
    }
}
