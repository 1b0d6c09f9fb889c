use crate::domain::model::{NewPerson, Person, PersonId};
use crate::domain::ports::RecordStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct State {
    rows: BTreeMap<PersonId, Person>,
    staged: Vec<NewPerson>,
    last_id: i64,
}

/// Process-local store, selected with `database.url = "memory"`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn retrieve_all(&self) -> Result<Vec<Person>> {
        let state = self.state.lock().await;
        Ok(state.rows.values().cloned().collect())
    }

    async fn stage(&self, person: NewPerson) -> Result<()> {
        self.state.lock().await.staged.push(person);
        Ok(())
    }

    async fn commit(&self) -> Result<Vec<PersonId>> {
        let mut state = self.state.lock().await;
        let staged = std::mem::take(&mut state.staged);
        let mut ids = Vec::with_capacity(staged.len());
        for person in staged {
            state.last_id += 1;
            let id = PersonId(state.last_id);
            state.rows.insert(id, person.with_id(id));
            ids.push(id);
        }
        Ok(ids)
    }

    async fn discard_staged(&self) -> usize {
        std::mem::take(&mut self.state.lock().await.staged).len()
    }

    async fn staged_count(&self) -> usize {
        self.state.lock().await.staged.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_staged_records_are_invisible_until_commit() {
        let store = MemoryStore::new();
        store.stage(NewPerson::new("Inès", "Roux")).await.unwrap();

        assert!(store.retrieve_all().await.unwrap().is_empty());
        assert_eq!(store.staged_count().await, 1);

        let ids = store.commit().await.unwrap();
        assert_eq!(ids, vec![PersonId(1)]);
        assert_eq!(store.staged_count().await, 0);
        assert_eq!(store.retrieve_all().await.unwrap()[0].last_name, "Roux");
    }

    #[tokio::test]
    async fn test_ids_keep_increasing_across_commits() {
        let store = MemoryStore::new();
        store.stage(NewPerson::new("a", "b")).await.unwrap();
        store.stage(NewPerson::new("c", "d")).await.unwrap();
        let first = store.commit().await.unwrap();
        store.stage(NewPerson::new("e", "f")).await.unwrap();
        let second = store.commit().await.unwrap();

        assert_eq!(first, vec![PersonId(1), PersonId(2)]);
        assert_eq!(second, vec![PersonId(3)]);
    }

    #[tokio::test]
    async fn test_discard_staged() {
        let store = MemoryStore::new();
        store.stage(NewPerson::new("a", "b")).await.unwrap();
        store.stage(NewPerson::new("c", "d")).await.unwrap();

        assert_eq!(store.discard_staged().await, 2);
        assert_eq!(store.staged_count().await, 0);
        assert!(store.commit().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_commit_is_noop() {
        let store = MemoryStore::new();
        assert!(store.commit().await.unwrap().is_empty());
        assert!(store.retrieve_all().await.unwrap().is_empty());
    }
}
