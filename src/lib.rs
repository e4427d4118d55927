//! syllex - syllable-level corpus enrichment and measurement export
//!
//! Imports forced-aligned TextGrid annotations into a file-backed corpus
//! store, derives utterances, syllables, and speech rate, measures intensity
//! and formants from the paired audio, and exports a per-syllable CSV.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod acoustics;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod defaults;
pub mod enrich;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod query;
pub mod textgrid;

// Corpus model
pub use corpus::store::{Corpus, CorpusSession};
pub use corpus::types::{Discourse, Phone, Syllable, SyllablePosition, Utterance, Word};

// Annotation input
pub use textgrid::{Interval, IntervalTier, TextGrid};

// Queries and export
pub use export::export_disyllables;
pub use query::{WordHit, WordQuery};

// Error handling
pub use error::{Result, SyllexError};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `"0.2.0+abc1234"` when git hash is available, `"0.2.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
