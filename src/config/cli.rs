use crate::config::toml_config::{AppConfig, DEFAULT_CONFIG_PATH};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "annuaire")]
#[command(about = "A small people directory: web pages plus a fixture loader")]
pub struct Cli {
    /// Path to the TOML configuration file (optional)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Serve the landing page and the directory listing
    Serve {
        /// Address to listen on, overrides server.bind
        #[arg(long)]
        bind: Option<String>,

        /// Database url, overrides database.url
        #[arg(long)]
        database: Option<String>,
    },
    /// Insert generated people into the database
    Seed {
        /// Number of people to insert, overrides fixtures.count
        #[arg(long)]
        count: Option<usize>,

        /// Database url, overrides database.url
        #[arg(long)]
        database: Option<String>,

        /// RNG seed for reproducible names, overrides fixtures.seed
        #[arg(long)]
        seed: Option<u64>,
    },
}

impl Cli {
    /// Folds the command-line overrides into a loaded configuration.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        match &self.command {
            Command::Serve { bind, database } => {
                if let Some(bind) = bind {
                    config.server.bind = bind.clone();
                }
                if let Some(database) = database {
                    config.database.url = database.clone();
                }
            }
            Command::Seed {
                count,
                database,
                seed,
            } => {
                if let Some(count) = count {
                    config.fixtures.count = *count;
                }
                if let Some(database) = database {
                    config.database.url = database.clone();
                }
                if seed.is_some() {
                    config.fixtures.seed = *seed;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_overrides() {
        let cli = Cli::parse_from(["annuaire", "seed", "--count", "3", "--database", "memory"]);
        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.fixtures.count, 3);
        assert_eq!(config.database.url, "memory");
        assert_eq!(config.server.bind, AppConfig::default().server.bind);
    }

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::parse_from(["annuaire", "-v", "serve", "--bind", "0.0.0.0:8080"]);
        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);

        assert!(cli.verbose);
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.fixtures.count, 10);
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["annuaire"]).is_err());
    }
}
