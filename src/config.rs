use crate::defaults;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub corpus: CorpusConfig,
    pub enrichment: EnrichmentConfig,
    pub export: ExportConfig,
}

/// Corpus location configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CorpusConfig {
    /// Corpus name, also the store's identifier.
    pub name: String,
    /// Directory tree of TextGrid/WAV pairs to import.
    pub root: PathBuf,
    /// Where the corpus store lives. Defaults to the root directory.
    pub directory: Option<PathBuf>,
    /// Speaker demographics CSV, joined on the name column.
    pub speaker_csv: Option<PathBuf>,
}

/// Enrichment parameter configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Minimum silence length splitting utterances, in seconds.
    pub min_pause_secs: f64,
    /// Phone labels treated as syllable nuclei.
    pub vowel_labels: Vec<String>,
    /// Phone labels treated as pauses (empty labels always are).
    pub pause_labels: Vec<String>,
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    /// Output CSV path.
    pub path: PathBuf,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            name: "corpus".to_string(),
            root: PathBuf::from("."),
            directory: None,
            speaker_csv: None,
        }
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            min_pause_secs: defaults::MIN_PAUSE_SECS,
            vowel_labels: defaults::VOWEL_LABELS.iter().map(|s| s.to_string()).collect(),
            pause_labels: defaults::NON_SPEECH_LABELS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(defaults::EXPORT_FILE),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                if e.downcast_ref::<std::io::Error>()
                    .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false)
                {
                    Self::default()
                } else {
                    // Re-panic on invalid TOML or other errors
                    panic!("Failed to load config from {}: {}", path.display(), e);
                }
            }
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - SYLLEX_CORPUS_ROOT → corpus.root
    /// - SYLLEX_CORPUS_NAME → corpus.name
    /// - SYLLEX_SPEAKER_CSV → corpus.speaker_csv
    /// - SYLLEX_EXPORT_PATH → export.path
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(root) = std::env::var("SYLLEX_CORPUS_ROOT")
            && !root.is_empty()
        {
            self.corpus.root = PathBuf::from(root);
        }

        if let Ok(name) = std::env::var("SYLLEX_CORPUS_NAME")
            && !name.is_empty()
        {
            self.corpus.name = name;
        }

        if let Ok(csv) = std::env::var("SYLLEX_SPEAKER_CSV")
            && !csv.is_empty()
        {
            self.corpus.speaker_csv = Some(PathBuf::from(csv));
        }

        if let Ok(path) = std::env::var("SYLLEX_EXPORT_PATH")
            && !path.is_empty()
        {
            self.export.path = PathBuf::from(path);
        }

        self
    }

    /// Directory holding the corpus store.
    ///
    /// Falls back to the corpus root when not set explicitly.
    pub fn corpus_dir(&self) -> PathBuf {
        self.corpus
            .directory
            .clone()
            .unwrap_or_else(|| self.corpus.root.clone())
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/syllex/config.toml on Linux
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .expect("Could not determine config directory")
            .join("syllex")
            .join("config.toml")
    }
}
