use crate::adapters::names::SUPPORTED_LOCALES;
use crate::adapters::storage::{MEMORY_URL, SQLITE_SCHEME};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AnnuaireError, Result};
use crate::utils::validation::{self, Validate};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_CONFIG_PATH: &str = "annuaire.toml";
pub const DEFAULT_FIXTURE_COUNT: usize = 10;
pub const MAX_FIXTURE_COUNT: usize = 100_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub fixtures: FixturesConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub site_title: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
            site_title: "Annuaire".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://var/annuaire.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FixturesConfig {
    pub count: usize,
    pub locale: String,
    /// Fixed RNG seed for reproducible fixture data.
    pub seed: Option<u64>,
}

impl Default for FixturesConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_FIXTURE_COUNT,
            locale: "fr_FR".to_string(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads the file at `path`; a missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AnnuaireError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AnnuaireError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid")
        });

        re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }
}

impl ConfigProvider for AppConfig {
    fn bind_addr(&self) -> &str {
        &self.server.bind
    }

    fn database_url(&self) -> &str {
        &self.database.url
    }

    fn fixture_count(&self) -> usize {
        self.fixtures.count
    }

    fn locale(&self) -> &str {
        &self.fixtures.locale
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_socket_addr("server.bind", &self.server.bind)?;
        validation::validate_non_empty_string("server.site_title", &self.server.site_title)?;

        let url = self.database.url.as_str();
        if url != MEMORY_URL {
            let path = url.strip_prefix(SQLITE_SCHEME).ok_or_else(|| {
                AnnuaireError::InvalidConfigValueError {
                    field: "database.url".to_string(),
                    value: url.to_string(),
                    reason: format!("expected '{MEMORY_URL}' or '{SQLITE_SCHEME}<path>'"),
                }
            })?;
            validation::validate_path("database.url", path)?;
        }

        validation::validate_range("fixtures.count", self.fixtures.count, 0, MAX_FIXTURE_COUNT)?;
        validation::validate_one_of("fixtures.locale", &self.fixtures.locale, SUPPORTED_LOCALES)?;
        validation::validate_one_of(
            "logging.level",
            &self.logging.level,
            &["trace", "debug", "info", "warn", "error"],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[server]
bind = "0.0.0.0:9000"

[database]
url = "memory"

[fixtures]
count = 25
locale = "fr_FR"
seed = 7

[logging]
level = "debug"
json = true
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
        assert_eq!(config.database_url(), "memory");
        assert_eq!(config.fixture_count(), 25);
        assert_eq!(config.fixtures.seed, Some(7));
        assert!(config.logging.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = AppConfig::from_toml_str("[fixtures]\ncount = 3\n").unwrap();

        assert_eq!(config.fixture_count(), 3);
        assert_eq!(config.locale(), "fr_FR");
        assert_eq!(config.bind_addr(), "127.0.0.1:8000");
        assert_eq!(config.database_url(), "sqlite://var/annuaire.db");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ANNUAIRE_TEST_DB", "sqlite:///tmp/from-env.db");

        let config =
            AppConfig::from_toml_str("[database]\nurl = \"${ANNUAIRE_TEST_DB}\"\n").unwrap();
        assert_eq!(config.database_url(), "sqlite:///tmp/from-env.db");

        std::env::remove_var("ANNUAIRE_TEST_DB");
    }

    #[test]
    fn test_unknown_env_var_is_left_verbatim() {
        let config =
            AppConfig::from_toml_str("[database]\nurl = \"${ANNUAIRE_SURELY_UNSET}\"\n").unwrap();
        assert_eq!(config.database_url(), "${ANNUAIRE_SURELY_UNSET}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_ok());

        config.fixtures.locale = "en_US".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.server.bind = "not-an-address".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.database.url = "postgres://db/annuaire".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.fixtures.count = MAX_FIXTURE_COUNT + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let config = AppConfig::load("definitely/not/here.toml").unwrap();
        assert_eq!(config.fixture_count(), DEFAULT_FIXTURE_COUNT);
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nbind = \"127.0.0.1:8081\"\n")
            .unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:8081");
    }

    #[test]
    fn test_invalid_toml() {
        let err = AppConfig::from_toml_str("[server\nbind = 1").unwrap_err();
        assert!(matches!(err, AnnuaireError::ConfigValidationError { .. }));
    }
}
