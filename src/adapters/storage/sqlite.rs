use crate::domain::model::{NewPerson, Person, PersonId};
use crate::domain::ports::RecordStore;
use crate::utils::error::{AnnuaireError, Result};
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex as SyncMutex};
use std::time::Duration;
use tokio::sync::Mutex;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS personne (
    id     INTEGER PRIMARY KEY AUTOINCREMENT,
    prenom TEXT NOT NULL,
    nom    TEXT NOT NULL
);";

/// SQLite-backed store. `AUTOINCREMENT` keeps ids from being reused, even
/// after a rolled-back batch. Queries run on the blocking pool.
pub struct SqliteStore {
    conn: Arc<SyncMutex<Connection>>,
    staged: Mutex<Vec<NewPerson>>,
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        tracing::debug!(path = %path.display(), "opening sqlite store");
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(SyncMutex::new(conn)),
            staged: Mutex::new(Vec::new()),
        })
    }
}

fn load_all(conn: &Connection) -> rusqlite::Result<Vec<Person>> {
    let mut stmt = conn.prepare_cached("SELECT id, prenom, nom FROM personne ORDER BY id")?;
    let rows = stmt.query_map([], |row| {
        Ok(Person {
            id: PersonId(row.get(0)?),
            first_name: row.get(1)?,
            last_name: row.get(2)?,
        })
    })?;
    let people = rows.collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(people)
}

fn insert_batch(conn: &mut Connection, batch: &[NewPerson]) -> rusqlite::Result<Vec<PersonId>> {
    let tx = conn.transaction()?;
    let mut ids = Vec::with_capacity(batch.len());
    {
        let mut stmt = tx.prepare_cached("INSERT INTO personne (prenom, nom) VALUES (?1, ?2)")?;
        for person in batch {
            stmt.execute(params![person.first_name, person.last_name])?;
            ids.push(PersonId(tx.last_insert_rowid()));
        }
    }
    tx.commit()?;
    Ok(ids)
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn retrieve_all(&self) -> Result<Vec<Person>> {
        self.with_connection(|conn| load_all(conn))
            .await
            .map_err(|e| AnnuaireError::store(format!("read failed: {e}")))
    }

    async fn stage(&self, person: NewPerson) -> Result<()> {
        self.staged.lock().await.push(person);
        Ok(())
    }

    async fn commit(&self) -> Result<Vec<PersonId>> {
        let batch = std::mem::take(&mut *self.staged.lock().await);
        if batch.is_empty() {
            return Ok(Vec::new());
        }

        let dropped = batch.len();
        match self.with_connection(move |conn| insert_batch(conn, &batch)).await {
            Ok(ids) => {
                tracing::debug!(written = ids.len(), "committed staged people");
                Ok(ids)
            }
            Err(e) => {
                tracing::warn!(dropped, error = %e, "commit rolled back");
                Err(AnnuaireError::store(format!("commit failed: {e}")))
            }
        }
    }

    async fn discard_staged(&self) -> usize {
        std::mem::take(&mut *self.staged.lock().await).len()
    }

    async fn staged_count(&self) -> usize {
        self.staged.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_commit_assigns_ids_in_staging_order() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.stage(NewPerson::new("Chloé", "Lefebvre")).await.unwrap();
        store.stage(NewPerson::new("Hugo", "Moreau")).await.unwrap();

        let ids = store.commit().await.unwrap();
        let people = store.retrieve_all().await.unwrap();

        assert_eq!(ids.len(), 2);
        assert!(ids[0] < ids[1]);
        assert_eq!(people[0].id, ids[0]);
        assert_eq!(people[0].first_name, "Chloé");
        assert_eq!(people[1].last_name, "Moreau");
    }

    #[tokio::test]
    async fn test_discard_staged_drops_batch() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.stage(NewPerson::new("Noémie", "Brun")).await.unwrap();

        assert_eq!(store.discard_staged().await, 1);
        assert!(store.commit().await.unwrap().is_empty());
        assert!(store.retrieve_all().await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_locked_database_does_not_stall_runtime() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("annuaire.db");
        let store = SqliteStore::open(&db_path).unwrap();

        let writer = Connection::open(&db_path).unwrap();
        writer.execute_batch("BEGIN EXCLUSIVE;").unwrap();

        // The read waits on the busy timeout; the single runtime thread keeps
        // running other tasks meanwhile.
        let read = tokio::spawn(async move { store.retrieve_all().await });
        let started = std::time::Instant::now();
        tokio::task::yield_now().await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(started.elapsed() < Duration::from_secs(2));

        writer.execute_batch("COMMIT;").unwrap();
        assert!(read.await.unwrap().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_retrieve_all_on_fresh_database_is_empty() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.retrieve_all().await.unwrap().is_empty());
        assert!(store.commit().await.unwrap().is_empty());
    }
}
