use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnnuaireError {
    #[error("Record store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Name generator unavailable: {message}")]
    GeneratorUnavailable { message: String },

    #[error("Failed to render view '{view}': {message}")]
    Render { view: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Storage,
    Generator,
    Presentation,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AnnuaireError {
    pub fn store(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
        }
    }

    pub fn generator(message: impl Into<String>) -> Self {
        Self::GeneratorUnavailable {
            message: message.into(),
        }
    }

    pub fn render(view: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Render {
            view: view.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::StoreUnavailable { .. } | Self::Sqlite(_) => ErrorCategory::Storage,
            Self::GeneratorUnavailable { .. } => ErrorCategory::Generator,
            Self::Render { .. } | Self::SerializationError(_) => ErrorCategory::Presentation,
            Self::InvalidConfigValueError { .. } | Self::ConfigValidationError { .. } => {
                ErrorCategory::Configuration
            }
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    /// Store errors are worth retrying once the database is reachable again.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Storage => ErrorSeverity::Medium,
            ErrorCategory::Generator | ErrorCategory::Presentation => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Storage => {
                "Check that the database file is reachable and writable, then retry"
            }
            ErrorCategory::Generator => "Retry the fixture run; no records were staged",
            ErrorCategory::Presentation => "Check the view name and the data bound to it",
            ErrorCategory::Configuration => {
                "Fix the configuration file or the command-line flags and run again"
            }
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Storage => format!("The directory database is unavailable ({})", self),
            ErrorCategory::Generator => format!("Sample names could not be generated ({})", self),
            ErrorCategory::Presentation => format!("The page could not be displayed ({})", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnnuaireError>;
