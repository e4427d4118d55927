//! Typed queries over the corpus.
//!
//! A query walks word tokens across all discourses, applies its filters,
//! and yields hits joined with speaker and discourse metadata. The export
//! and inspect commands are both built on this.

use crate::corpus::types::{Discourse, Speaker, Word};
use crate::corpus::Corpus;

/// Filters for selecting word tokens.
#[derive(Debug, Clone, Default)]
pub struct WordQuery {
    num_syllables: Option<usize>,
    speaker: Option<String>,
    discourse: Option<String>,
    min_duration: Option<f64>,
}

/// One word token matched by a query, with its context.
#[derive(Debug, Clone)]
pub struct WordHit<'a> {
    pub discourse: &'a Discourse,
    pub speaker: Option<&'a Speaker>,
    pub word: &'a Word,
    /// Corpus-unique token identifier.
    pub word_id: String,
}

impl WordQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only words with exactly this many syllables.
    pub fn with_num_syllables(mut self, n: usize) -> Self {
        self.num_syllables = Some(n);
        self
    }

    /// Keep only words spoken by this speaker.
    pub fn with_speaker(mut self, name: impl Into<String>) -> Self {
        self.speaker = Some(name.into());
        self
    }

    /// Keep only words from this discourse.
    pub fn with_discourse(mut self, name: impl Into<String>) -> Self {
        self.discourse = Some(name.into());
        self
    }

    /// Keep only words at least this long, in seconds.
    pub fn with_min_duration(mut self, secs: f64) -> Self {
        self.min_duration = Some(secs);
        self
    }

    /// Run the query, returning hits in discourse order then time order.
    pub fn run<'a>(&self, corpus: &'a Corpus) -> Vec<WordHit<'a>> {
        let mut hits = Vec::new();
        for discourse in &corpus.discourses {
            if let Some(name) = &self.discourse
                && &discourse.name != name
            {
                continue;
            }
            if let Some(name) = &self.speaker
                && &discourse.speaker != name
            {
                continue;
            }
            let speaker = corpus.speaker(&discourse.speaker);
            for (index, word) in discourse.words.iter().enumerate() {
                if !self.matches(word) {
                    continue;
                }
                hits.push(WordHit {
                    discourse,
                    speaker,
                    word,
                    word_id: discourse.word_id(index),
                });
            }
        }
        hits
    }

    fn matches(&self, word: &Word) -> bool {
        if let Some(n) = self.num_syllables
            && word.syllables.len() != n
        {
            return false;
        }
        if let Some(min) = self.min_duration
            && word.duration() < min
        {
            return false;
        }
        true
    }
}
