//! The corpus store: speakers, discourses, and their annotation layers.
//!
//! A corpus is a flat, file-backed collection of discourses (one per
//! TextGrid/audio pair). Pipeline phases open it from disk, mutate, and save
//! it back; there is no live database behind it.

pub mod import;
pub mod store;
pub mod types;

pub use import::import_corpus;
pub use store::{Corpus, CorpusSession};
pub use types::{
    Discourse, Phone, Speaker, Syllable, SyllablePosition, ToneInterval, Utterance, Word,
};
