use crate::domain::model::{NewPerson, Person, PersonId};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Persistence for person records.
///
/// `stage` only buffers; nothing is visible to `retrieve_all` until `commit`
/// succeeds. A failed commit writes nothing and drops the staged batch.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Every stored person, ordered by ascending id.
    async fn retrieve_all(&self) -> Result<Vec<Person>>;

    async fn stage(&self, person: NewPerson) -> Result<()>;

    /// Writes the staged batch in one transaction and returns the assigned ids
    /// in staging order.
    async fn commit(&self) -> Result<Vec<PersonId>>;

    /// Drops the staged batch without writing it; returns how many were dropped.
    async fn discard_staged(&self) -> usize;

    async fn staged_count(&self) -> usize;
}

/// Source of plausible names for fixtures.
pub trait NameGenerator: Send + Sync {
    fn locale(&self) -> &str;
    fn first_name(&self) -> Result<String>;
    fn last_name(&self) -> Result<String>;
}

/// Turns a view name and its bindings into page bytes.
pub trait Renderer: Send + Sync {
    fn render(&self, view: &str, bindings: &serde_json::Value) -> Result<Vec<u8>>;
}

pub trait ConfigProvider: Send + Sync {
    fn bind_addr(&self) -> &str;
    fn database_url(&self) -> &str;
    fn fixture_count(&self) -> usize;
    fn locale(&self) -> &str;
}
