//! Shared helpers: sessions over in-memory or on-disk stores, no simulated latency.

use jamaeya_core::{Config, Jamaeya, KeyValueStore, MemoryStore};
use std::path::Path;
use std::sync::Arc;

pub fn memory_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}

pub fn session_over(store: Arc<dyn KeyValueStore>) -> Jamaeya {
    Jamaeya::new(store, &Config::instant("unused")).expect("session")
}

pub fn disk_session(dir: &Path) -> Jamaeya {
    Jamaeya::open(&Config::instant(dir)).expect("open session")
}
