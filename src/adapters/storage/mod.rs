mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::domain::ports::RecordStore;
use crate::utils::error::{AnnuaireError, Result};
use std::sync::Arc;

pub const MEMORY_URL: &str = "memory";
pub const SQLITE_SCHEME: &str = "sqlite://";

/// Builds the store named by a `database.url` value.
pub fn open_store(url: &str) -> Result<Arc<dyn RecordStore>> {
    if url == MEMORY_URL {
        tracing::info!("using in-memory record store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    match url.strip_prefix(SQLITE_SCHEME) {
        Some(path) if !path.is_empty() => {
            tracing::info!(path, "using sqlite record store");
            Ok(Arc::new(SqliteStore::open(path)?))
        }
        _ => Err(AnnuaireError::InvalidConfigValueError {
            field: "database.url".to_string(),
            value: url.to_string(),
            reason: format!("expected '{MEMORY_URL}' or '{SQLITE_SCHEME}<path>'"),
        }),
    }
}
