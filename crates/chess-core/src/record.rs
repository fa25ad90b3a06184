//! Finished-game records and their append-only local store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::metrics::PerformanceMetrics;
use crate::session::Session;
use crate::storage::{KeyValueStore, StoreError};
use crate::types::{GameOutcome, Opponent, PlayerColor};

/// Storage key holding the serialized record list, newest first.
pub const GAMES_KEY: &str = "chess-games";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub id: String,
    pub pgn: String,
    pub result: GameOutcome,
    pub accuracy: f64,
    pub date: DateTime<Utc>,
    pub opponent: Opponent,
    pub player_color: PlayerColor,
    pub move_count: u32,
    pub blunders: u32,
    pub mistakes: u32,
    pub good_moves: u32,
    pub brilliant_moves: u32,
}

impl GameRecord {
    /// Snapshot a finished session. Returns `None` while the game is still in progress.
    ///
    /// Counters and accuracy start at zero; nothing rewrites a record once stored.
    pub fn from_session(session: &Session, opponent: Opponent) -> Option<Self> {
        let result = session.outcome()?;
        Some(Self {
            id: uuid::Uuid::new_v4().to_string(),
            pgn: session.pgn(),
            result,
            accuracy: 0.0,
            date: Utc::now(),
            opponent,
            player_color: session.player_color(),
            move_count: session.history().len() as u32,
            blunders: 0,
            mistakes: 0,
            good_moves: 0,
            brilliant_moves: 0,
        })
    }
}

/// Append-only list of finished games, mirrored to a [`KeyValueStore`].
pub struct GameRecordStore<S: KeyValueStore> {
    storage: S,
    records: Vec<GameRecord>,
}

impl<S: KeyValueStore> GameRecordStore<S> {
    /// Open the store and read back whatever was persisted.
    pub fn open(storage: S) -> Self {
        let mut store = Self {
            storage,
            records: Vec::new(),
        };
        store.records = store.load_all();
        store
    }

    /// Read the persisted list, newest first. Absent or corrupt data yields an empty list.
    pub fn load_all(&self) -> Vec<GameRecord> {
        let raw = match self.storage.get(GAMES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read stored games: {e}");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<GameRecord>>(&raw) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Stored games are corrupt, starting empty: {e}");
                Vec::new()
            }
        }
    }

    /// Put `record` at the front and rewrite the whole persisted list.
    ///
    /// On a write failure the record stays in memory and the error is returned.
    pub fn append(&mut self, record: GameRecord) -> Result<(), StoreError> {
        tracing::info!(
            "Saving game {} ({}, {} plies)",
            record.id,
            record.result,
            record.move_count
        );
        self.records.insert(0, record);

        let serialized = serde_json::to_string(&self.records)?;
        if let Err(e) = self.storage.set(GAMES_KEY, &serialized) {
            tracing::error!("Failed to persist games: {e}");
            return Err(e);
        }
        Ok(())
    }

    /// In-memory records, newest first.
    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    pub fn metrics(&self) -> PerformanceMetrics {
        PerformanceMetrics::from_records(&self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    fn finished_session() -> Session {
        let mut session = Session::default();
        for san in ["f3", "e5", "g4", "Qh4#"] {
            assert!(session.apply_san(san));
        }
        session
    }

    #[test]
    fn test_record_from_finished_session() {
        let record = GameRecord::from_session(&finished_session(), Opponent::Ai).unwrap();
        assert_eq!(record.result, GameOutcome::Loss);
        assert_eq!(record.move_count, 4);
        assert_eq!(record.player_color, PlayerColor::White);
        assert_eq!(record.blunders, 0);
        assert!(record.pgn.contains("Qh4#"));
    }

    #[test]
    fn test_no_record_for_game_in_progress() {
        assert!(GameRecord::from_session(&Session::default(), Opponent::Ai).is_none());
    }

    #[test]
    fn test_append_then_load_newest_first() {
        let storage = Arc::new(MemoryStore::new());
        let mut store = GameRecordStore::open(storage.clone());

        let first = GameRecord::from_session(&finished_session(), Opponent::Ai).unwrap();
        let second = GameRecord::from_session(&finished_session(), Opponent::Human).unwrap();
        store.append(first.clone()).unwrap();
        store.append(second.clone()).unwrap();

        let loaded = store.load_all();
        assert_eq!(loaded, vec![second.clone(), first.clone()]);

        let reopened = GameRecordStore::open(storage);
        assert_eq!(reopened.records().first(), Some(&second));
        assert_eq!(reopened.records().len(), 2);
    }

    #[test]
    fn test_json_field_names() {
        let record = GameRecord::from_session(&finished_session(), Opponent::Ai).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["playerColor"], "white");
        assert_eq!(json["moveCount"], 4);
        assert_eq!(json["result"], "loss");
        assert_eq!(json["opponent"], "ai");
        assert!(json.get("brilliantMoves").is_some());
    }

    #[test]
    fn test_corrupt_storage_loads_empty() {
        let storage = Arc::new(MemoryStore::new());
        storage.set(GAMES_KEY, "{not json").unwrap();
        let store = GameRecordStore::open(storage.clone());
        assert!(store.records().is_empty());
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn test_absent_storage_loads_empty() {
        let store = GameRecordStore::open(MemoryStore::new());
        assert!(store.load_all().is_empty());
    }
}
