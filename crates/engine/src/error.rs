use comment_cleaner_core::error::ConfigError;
use comment_cleaner_core::scanner::ScanWarning;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Grammar error: {0}")]
    Grammar(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Unknown extension '{extension}' for '{name}' (set `force` to pass it through)")]
    UnknownExtension { name: String, extension: String },

    #[error("Unknown language '{0}' in extension mapping")]
    InvalidExtMapping(String),

    #[error("'{name}': {warning}")]
    Unterminated { name: String, warning: ScanWarning },
}

pub type Result<T> = std::result::Result<T, EngineError>;
