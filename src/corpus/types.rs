//! Corpus entity types.
//!
//! All time values are seconds from the start of the discourse audio.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// A speaker and their demographic properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Speaker {
    pub name: String,
    /// Demographic columns joined from the speaker CSV (age, gender, ...).
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl Speaker {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: BTreeMap::new(),
        }
    }
}

/// A single phone token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phone {
    pub label: String,
    pub begin: f64,
    pub end: f64,
    /// Set by pause encoding; pauses leave the searchable phone stream.
    #[serde(default)]
    pub is_pause: bool,
}

impl Phone {
    pub fn duration(&self) -> f64 {
        self.end - self.begin
    }

    pub fn midpoint(&self) -> f64 {
        (self.begin + self.end) / 2.0
    }
}

/// Position of a syllable within its word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyllablePosition {
    /// The word's only syllable.
    Only,
    Initial,
    Medial,
    Final,
}

impl fmt::Display for SyllablePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SyllablePosition::Only => "only",
            SyllablePosition::Initial => "initial",
            SyllablePosition::Medial => "medial",
            SyllablePosition::Final => "final",
        };
        f.write_str(s)
    }
}

/// A syllable built over a span of a word's phones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Syllable {
    /// Phone labels joined with '.'.
    pub label: String,
    pub begin: f64,
    pub end: f64,
    /// Discourse-level phone index range `[start, end)`.
    pub phones: (usize, usize),
    /// Discourse-level index of the nucleus phone.
    pub nucleus: usize,
    #[serde(default)]
    pub position: Option<SyllablePosition>,
    /// Lexical tone, from the tone tier or the nucleus label.
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub num_phones: Option<usize>,
    /// Mean intensity over the syllable span, in dB.
    #[serde(default)]
    pub mean_intensity: Option<f64>,
    /// F1..F3 measured at the nucleus midpoint, in Hz.
    #[serde(default)]
    pub formants: Option<Vec<f64>>,
}

impl Syllable {
    pub fn duration(&self) -> f64 {
        self.end - self.begin
    }
}

/// A word token with its phone span and derived syllables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub label: String,
    pub begin: f64,
    pub end: f64,
    /// Discourse-level phone index range `[start, end)`.
    pub phones: (usize, usize),
    #[serde(default)]
    pub syllables: Vec<Syllable>,
    #[serde(default)]
    pub num_syllables: Option<usize>,
    #[serde(default)]
    pub num_phones: Option<usize>,
    /// Label of the word's last syllable.
    #[serde(default)]
    pub final_syllable: Option<String>,
}

impl Word {
    pub fn duration(&self) -> f64 {
        self.end - self.begin
    }
}

/// A pause-delimited stretch of words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    pub begin: f64,
    pub end: f64,
    /// Discourse-level word index range `[start, end)`.
    pub words: (usize, usize),
    #[serde(default)]
    pub num_words: Option<usize>,
    #[serde(default)]
    pub num_syllables: Option<usize>,
    /// Syllables per second.
    #[serde(default)]
    pub speech_rate: Option<f64>,
}

impl Utterance {
    pub fn duration(&self) -> f64 {
        self.end - self.begin
    }
}

/// A tone-tier interval, kept as a type property for syllable enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneInterval {
    pub label: String,
    pub begin: f64,
    pub end: f64,
}

/// One recording: a TextGrid/audio pair attributed to a speaker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discourse {
    pub name: String,
    pub speaker: String,
    #[serde(default)]
    pub audio_path: Option<PathBuf>,
    /// Total duration of the annotation window in seconds.
    pub duration: f64,
    pub phones: Vec<Phone>,
    pub words: Vec<Word>,
    #[serde(default)]
    pub utterances: Vec<Utterance>,
    #[serde(default)]
    pub tones: Vec<ToneInterval>,
}

impl Discourse {
    /// Tone-tier label at the given time point, if a tone tier was imported.
    pub fn tone_at(&self, time: f64) -> Option<&str> {
        self.tones
            .iter()
            .find(|t| t.begin <= time && time < t.end)
            .map(|t| t.label.as_str())
    }

    /// Stable identifier for a word token, unique within the corpus.
    pub fn word_id(&self, index: usize) -> String {
        format!("{}-w{}", self.name, index)
    }
}
