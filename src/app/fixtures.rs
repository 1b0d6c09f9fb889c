use crate::adapters::names::FrenchNameGenerator;
use crate::adapters::storage::open_store;
use crate::config::AppConfig;
use crate::domain::model::SeedReport;
use crate::domain::ports::{ConfigProvider, NameGenerator};
use crate::domain::services::Seeder;
use crate::utils::error::Result;

/// Runs the fixture loader once against the configured database.
pub async fn load_fixtures(config: &AppConfig) -> Result<SeedReport> {
    let store = open_store(config.database_url())?;
    let names = FrenchNameGenerator::for_locale(config.locale(), config.fixtures.seed)?;

    let count = config.fixture_count();
    tracing::info!(count, locale = names.locale(), "loading fixtures");

    let report = Seeder::new(store, names).seed(count).await?;
    if let (Some(first), Some(last)) = (report.inserted.first(), report.inserted.last()) {
        tracing::info!(inserted = report.len(), first_id = %first, last_id = %last, "fixtures loaded");
    } else {
        tracing::info!("no fixtures requested");
    }
    Ok(report)
}
