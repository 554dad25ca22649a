//! Local key-value storage: wallet keys and the serialized group ledger.
//! `KeyValueStore` is injected into the wallet and ledger; SQLite on disk, HashMap in memory.

use crate::error::{JamaeyaError, Result};
use crate::models::Group;
use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

pub const WALLET_CONNECTED_KEY: &str = "walletConnected";
pub const WALLET_ACCOUNT_KEY: &str = "walletAccount";
pub const WALLET_BALANCE_KEY: &str = "walletBalance";
pub const GROUPS_KEY: &str = "demoJamaeyaGroups";

const DB_FILE: &str = "jamaeya.db";

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// SQLite-backed store: a single `kv` table in `<dir>/jamaeya.db`.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let db_path = dir.join(DB_FILE);
        tracing::debug!(db = ?db_path, "storage::open");
        let conn = Connection::open(&db_path)?;
        Self::from_connection(conn)
    }

    pub fn in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY, value TEXT NOT NULL);")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> std::result::Result<T, rusqlite::Error>,
    {
        let conn = self.conn.lock().map_err(|_| JamaeyaError::LockPoisoned)?;
        Ok(f(&conn)?)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
            let mut rows = stmt.query(params![key])?;
            if let Some(row) = rows.next()? {
                return Ok(Some(row.get(0)?));
            }
            Ok(None)
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2) ON CONFLICT(key) DO UPDATE SET value = ?2",
                params![key, value],
            )?;
            Ok(())
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
            Ok(())
        })
    }
}

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().map_err(|_| JamaeyaError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| JamaeyaError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| JamaeyaError::LockPoisoned)?;
        entries.remove(key);
        Ok(())
    }
}

/// Persisted ledger, or None if nothing was ever saved.
pub fn load_groups(store: &dyn KeyValueStore) -> Result<Option<Vec<Group>>> {
    match store.get(GROUPS_KEY)? {
        Some(json) => {
            let groups: Vec<Group> = serde_json::from_str(&json)?;
            tracing::debug!(count = groups.len(), "storage::load_groups");
            Ok(Some(groups))
        }
        None => Ok(None),
    }
}

/// Replace the persisted ledger wholesale.
pub fn save_groups(store: &dyn KeyValueStore, groups: &[Group]) -> Result<()> {
    let json = serde_json::to_string(groups)?;
    store.set(GROUPS_KEY, &json)?;
    tracing::debug!(count = groups.len(), "storage::save_groups");
    Ok(())
}
