//! Error types for syllex.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyllexError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // TextGrid parsing errors
    #[error("Failed to parse TextGrid {path} at line {line}: {message}")]
    TextGridParse {
        path: String,
        line: usize,
        message: String,
    },

    #[error("TextGrid {path} has no usable interval tiers")]
    TextGridNoTiers { path: String },

    // Corpus errors
    #[error("Corpus not found at {path} (run `syllex import` first)")]
    CorpusNotFound { path: String },

    #[error("Corpus root {path} contains no TextGrid files")]
    CorpusEmpty { path: String },

    #[error("Corpus store error: {message}")]
    CorpusStore { message: String },

    #[error("Discourse not found: {name}")]
    DiscourseNotFound { name: String },

    // Enrichment errors
    #[error("Enrichment step '{step}' failed: {message}")]
    Enrichment { step: String, message: String },

    #[error("Speaker metadata CSV error in {path}: {message}")]
    SpeakerCsv { path: String, message: String },

    // Acoustic analysis errors
    #[error("Failed to read audio file {path}: {message}")]
    AudioRead { path: String, message: String },

    #[error("Acoustic analysis failed: {message}")]
    Acoustics { message: String },

    // Export errors
    #[error("Export failed: {message}")]
    Export { message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // Store serialization
    #[error("Corpus serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, SyllexError>;
