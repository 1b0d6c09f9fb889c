pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{Cli, Command};

pub use adapters::http::{build_router, AppState};
pub use adapters::storage::{open_store, MemoryStore, SqliteStore};
pub use config::AppConfig;
pub use domain::model::{NewPerson, Person, PersonId, SeedReport};
pub use domain::ports::{ConfigProvider, NameGenerator, RecordStore, Renderer};
pub use domain::services::{ListingService, Seeder};
pub use utils::error::{AnnuaireError, Result};
