//! SQLite persistence for frame interactions and frame states.

use crate::store::FrameStore;
use crate::{BisouError, Result};
use bisou_types::{FrameInteraction, FrameState, NewFrameInteraction};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// SQLite-backed frame store.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create the database at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Self::from_connection(Connection::open(path)?)
    }

    /// Private in-memory database, mostly for tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| BisouError::LockPoisoned)
    }

    /// Initialize database schema.
    fn init_schema(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS frame_states (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                frame_id TEXT NOT NULL UNIQUE,
                state TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS frame_interactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                frame_id TEXT NOT NULL,
                fid INTEGER NOT NULL,
                action TEXT NOT NULL,
                amount INTEGER,
                timestamp TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_frame_interactions_frame_id
                ON frame_interactions(frame_id);
            "#,
        )?;
        Ok(())
    }

    fn row_to_interaction(row: &rusqlite::Row) -> rusqlite::Result<FrameInteraction> {
        let fid: i64 = row.get("fid")?;
        let amount: Option<i64> = row.get("amount")?;
        let timestamp: String = row.get("timestamp")?;

        Ok(FrameInteraction {
            id: row.get("id")?,
            frame_id: row.get("frame_id")?,
            fid: fid as u64,
            action: row.get("action")?,
            amount: amount.map(|a| a as u64),
            timestamp: chrono::DateTime::parse_from_rfc3339(&timestamp)
                .map(|dt| dt.with_timezone(&chrono::Utc))
                .unwrap_or_default(),
        })
    }

    fn row_to_frame_state(row: &rusqlite::Row) -> rusqlite::Result<FrameState> {
        let updated_at: String = row.get("updated_at")?;

        Ok(FrameState {
            id: row.get("id")?,
            frame_id: row.get("frame_id")?,
            state: row.get("state")?,
            updated_at: chrono::DateTime::parse_from_rfc3339(&updated_at)
                .map(|dt| dt.with_timezone(&chrono::Utc))
                .unwrap_or_default(),
        })
    }

    fn select_frame_state(conn: &Connection, frame_id: &str) -> Result<Option<FrameState>> {
        let state = conn
            .query_row(
                "SELECT * FROM frame_states WHERE frame_id = ?1",
                params![frame_id],
                Self::row_to_frame_state,
            )
            .optional()?;
        Ok(state)
    }
}

impl FrameStore for SqliteStore {
    fn record_interaction(&self, interaction: NewFrameInteraction) -> Result<FrameInteraction> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO frame_interactions (frame_id, fid, action, amount, timestamp)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                interaction.frame_id,
                interaction.fid as i64,
                interaction.action,
                interaction.amount.map(|a| a as i64),
                interaction.timestamp.to_rfc3339(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        Ok(interaction.into_record(id))
    }

    fn interactions_for_frame(&self, frame_id: &str) -> Result<Vec<FrameInteraction>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT * FROM frame_interactions WHERE frame_id = ?1 ORDER BY id")?;
        let interactions = stmt
            .query_map(params![frame_id], Self::row_to_interaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(interactions)
    }

    fn interaction_count(&self) -> Result<u64> {
        let conn = self.conn()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM frame_interactions", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn save_frame_state(&self, frame_id: &str, state: &str) -> Result<FrameState> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO frame_states (frame_id, state, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(frame_id) DO UPDATE SET
                state = excluded.state,
                updated_at = excluded.updated_at
            "#,
            params![frame_id, state, chrono::Utc::now().to_rfc3339()],
        )?;
        Self::select_frame_state(&conn, frame_id)?
            .ok_or(BisouError::DatabaseError(rusqlite::Error::QueryReturnedNoRows))
    }

    fn frame_state(&self, frame_id: &str) -> Result<Option<FrameState>> {
        let conn = self.conn()?;
        Self::select_frame_state(&conn, frame_id)
    }

    fn update_frame_state(&self, frame_id: &str, state: &str) -> Result<Option<FrameState>> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE frame_states SET state = ?1, updated_at = ?2 WHERE frame_id = ?3",
            params![state, chrono::Utc::now().to_rfc3339(), frame_id],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        Self::select_frame_state(&conn, frame_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    fn create_test_store() -> (SqliteStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("frames.db");
        let store = SqliteStore::open(&db_path).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_record_and_read_back() {
        let (store, _dir) = create_test_store();
        let new = NewFrameInteraction::new("abc", 42, "buy_250", Some(250));
        let timestamp = new.timestamp;

        let record = store.record_interaction(new).unwrap();
        assert_eq!(record.id, 1);

        let read = store.interactions_for_frame("abc").unwrap();
        assert_eq!(read.len(), 1);
        assert_eq!(read[0].fid, 42);
        assert_eq!(read[0].action, "buy_250");
        assert_eq!(read[0].amount, Some(250));
        assert_eq!(read[0].timestamp, timestamp);
    }

    #[test]
    fn test_null_amount_round_trips() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .record_interaction(NewFrameInteraction::new("abc", 1, "back", None))
            .unwrap();
        assert_eq!(store.interactions_for_frame("abc").unwrap()[0].amount, None);
    }

    #[test]
    fn test_reopen_keeps_log() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("frames.db");
        {
            let store = SqliteStore::open(&db_path).unwrap();
            store
                .record_interaction(NewFrameInteraction::new("f", 1, "buy_50", Some(50)))
                .unwrap();
        }
        let store = SqliteStore::open(&db_path).unwrap();
        assert_eq!(store.interaction_count().unwrap(), 1);
        let next = store
            .record_interaction(NewFrameInteraction::new("f", 1, "back", None))
            .unwrap();
        assert_eq!(next.id, 2);
    }

    #[test]
    fn test_frame_state_upsert_keeps_id() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.update_frame_state("f1", "initial").unwrap().is_none());

        let created = store.save_frame_state("f1", "initial").unwrap();
        let saved = store.save_frame_state("f1", "confirmation:50").unwrap();
        assert_eq!(saved.id, created.id);
        assert_eq!(saved.state, "confirmation:50");

        let updated = store.update_frame_state("f1", "receipt:50").unwrap().unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(store.frame_state("f1").unwrap().unwrap().state, "receipt:50");
        assert!(store.frame_state("f2").unwrap().is_none());
    }

    #[test]
    fn test_concurrent_appends_are_not_lost() {
        let (store, _dir) = create_test_store();
        let store = Arc::new(store);
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let store = store.clone();
                thread::spawn(move || {
                    for i in 0..25 {
                        store
                            .record_interaction(NewFrameInteraction::new(
                                format!("frame-{t}"),
                                i,
                                "buy_500",
                                Some(500),
                            ))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.interaction_count().unwrap(), 100);
        let ids: Vec<i64> = store
            .interactions_for_frame("frame-0")
            .unwrap()
            .iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids.len(), 25);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }
}
