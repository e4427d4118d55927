//! File-backed corpus store and session handling.
//!
//! Each pipeline phase runs inside a [`CorpusSession`]: open the store from
//! disk, mutate it, save, close. Phases never overlap, so the store needs no
//! locking.

use crate::corpus::types::{Discourse, Speaker};
use crate::defaults;
use crate::error::{Result, SyllexError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// The whole corpus: speakers, discourses, and type-level subsets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    pub name: String,
    pub speakers: Vec<Speaker>,
    pub discourses: Vec<Discourse>,
    /// Type subsets keyed by subset name ("vowel" → vowel labels).
    #[serde(default)]
    pub subsets: BTreeMap<String, BTreeSet<String>>,
    /// Labels encoded as pauses.
    #[serde(default)]
    pub pause_labels: BTreeSet<String>,
}

impl Corpus {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            speakers: Vec::new(),
            discourses: Vec::new(),
            subsets: BTreeMap::new(),
            pause_labels: BTreeSet::new(),
        }
    }

    /// Speaker names, in import order.
    pub fn speaker_names(&self) -> Vec<&str> {
        self.speakers.iter().map(|s| s.name.as_str()).collect()
    }

    /// Discourse names, in import order.
    pub fn discourse_names(&self) -> Vec<&str> {
        self.discourses.iter().map(|d| d.name.as_str()).collect()
    }

    /// Distinct phone labels across the corpus, sorted, pauses excluded.
    pub fn phone_inventory(&self) -> Vec<String> {
        let mut labels: BTreeSet<&str> = BTreeSet::new();
        for discourse in &self.discourses {
            for phone in &discourse.phones {
                if !phone.is_pause && !phone.label.is_empty() {
                    labels.insert(phone.label.as_str());
                }
            }
        }
        labels.into_iter().map(String::from).collect()
    }

    /// Whether a phone label belongs to a named type subset.
    pub fn in_subset(&self, subset: &str, label: &str) -> bool {
        self.subsets
            .get(subset)
            .is_some_and(|labels| labels.contains(label))
    }

    pub fn speaker(&self, name: &str) -> Option<&Speaker> {
        self.speakers.iter().find(|s| s.name == name)
    }

    pub fn speaker_mut(&mut self, name: &str) -> Option<&mut Speaker> {
        self.speakers.iter_mut().find(|s| s.name == name)
    }
}

/// An open corpus session bound to a corpus directory.
pub struct CorpusSession {
    dir: PathBuf,
    pub corpus: Corpus,
}

impl CorpusSession {
    /// Create a fresh corpus in `dir`, replacing any existing store there.
    pub fn create(dir: &Path, name: &str) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            corpus: Corpus::new(name),
        })
    }

    /// Open an existing corpus from `dir`.
    pub fn open(dir: &Path) -> Result<Self> {
        let store_path = dir.join(defaults::CORPUS_FILE);
        if !store_path.exists() {
            return Err(SyllexError::CorpusNotFound {
                path: dir.display().to_string(),
            });
        }
        let raw = std::fs::read_to_string(&store_path)?;
        let corpus: Corpus = serde_json::from_str(&raw)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            corpus,
        })
    }

    /// Persist the corpus. Writes to a temp file first so a failed save
    /// never truncates the existing store.
    pub fn save(&self) -> Result<()> {
        let store_path = self.dir.join(defaults::CORPUS_FILE);
        let tmp_path = self.dir.join(format!("{}.tmp", defaults::CORPUS_FILE));
        let raw = serde_json::to_string(&self.corpus)?;
        std::fs::write(&tmp_path, raw)?;
        std::fs::rename(&tmp_path, &store_path)?;
        Ok(())
    }

    /// Directory the store lives in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
