use crate::domain::model::{NewPerson, Person, SeedReport};
use crate::domain::ports::{NameGenerator, RecordStore};
use crate::utils::error::Result;
use std::sync::Arc;

#[derive(Clone)]
pub struct ListingService {
    store: Arc<dyn RecordStore>,
}

impl ListingService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Everything in the store, unfiltered and in store order.
    pub async fn list_all(&self) -> Result<Vec<Person>> {
        let people = self.store.retrieve_all().await?;
        tracing::debug!(returned = people.len(), "listed people");
        Ok(people)
    }
}

/// Fills the store with generated people.
pub struct Seeder<G: NameGenerator> {
    store: Arc<dyn RecordStore>,
    names: G,
}

impl<G: NameGenerator> Seeder<G> {
    pub fn new(store: Arc<dyn RecordStore>, names: G) -> Self {
        Self { store, names }
    }

    /// Adds `count` new people and commits them as one batch.
    ///
    /// All names are generated before anything is staged, so a generator
    /// failure leaves the store untouched. `seed(0)` never reaches the store.
    pub async fn seed(&self, count: usize) -> Result<SeedReport> {
        if count == 0 {
            tracing::debug!("seed called with count 0, nothing to do");
            return Ok(SeedReport::default());
        }

        let batch = self.generate(count)?;
        for person in batch {
            if let Err(e) = self.store.stage(person).await {
                let dropped = self.store.discard_staged().await;
                tracing::warn!(dropped, error = %e, "staging failed, batch discarded");
                return Err(e);
            }
        }

        let inserted = self.store.commit().await?;
        tracing::info!(
            count,
            inserted = inserted.len(),
            locale = self.names.locale(),
            "seeded people"
        );
        Ok(SeedReport { inserted })
    }

    fn generate(&self, count: usize) -> Result<Vec<NewPerson>> {
        (0..count)
            .map(|_| {
                let first_name = self.names.first_name()?;
                let last_name = self.names.last_name()?;
                Ok(NewPerson::new(first_name, last_name))
            })
            .collect()
    }
}
