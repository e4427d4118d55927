//! Corpus import: TextGrid discovery, tier classification, alignment.
//!
//! Walks a corpus root for TextGrid files, pairs each with a same-stem WAV,
//! and derives the speaker from the containing directory name (the usual
//! speaker-per-directory corpus layout).

use crate::corpus::store::Corpus;
use crate::corpus::types::{Discourse, Phone, Speaker, ToneInterval, Word};
use crate::error::{Result, SyllexError};
use crate::textgrid::{IntervalTier, TextGrid};
use std::path::{Path, PathBuf};

/// Summary of one import run.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSummary {
    pub discourses: usize,
    pub speakers: usize,
    pub phones: usize,
    pub words: usize,
    /// TextGrids without a paired WAV file.
    pub missing_audio: Vec<String>,
}

/// Import every TextGrid under `root` into a fresh corpus named `name`.
pub fn import_corpus(root: &Path, name: &str) -> Result<(Corpus, ImportSummary)> {
    let mut grid_paths = Vec::new();
    collect_textgrids(root, &mut grid_paths)?;
    grid_paths.sort();

    if grid_paths.is_empty() {
        return Err(SyllexError::CorpusEmpty {
            path: root.display().to_string(),
        });
    }

    let mut corpus = Corpus::new(name);
    let mut summary = ImportSummary {
        discourses: 0,
        speakers: 0,
        phones: 0,
        words: 0,
        missing_audio: Vec::new(),
    };

    for grid_path in &grid_paths {
        let discourse = import_discourse(root, grid_path)?;
        if !corpus.speakers.iter().any(|s| s.name == discourse.speaker) {
            corpus.speakers.push(Speaker::new(discourse.speaker.clone()));
        }
        summary.phones += discourse.phones.len();
        summary.words += discourse.words.len();
        if discourse.audio_path.is_none() {
            summary.missing_audio.push(discourse.name.clone());
        }
        corpus.discourses.push(discourse);
    }

    summary.discourses = corpus.discourses.len();
    summary.speakers = corpus.speakers.len();
    Ok((corpus, summary))
}

fn collect_textgrids(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_textgrids(&path, out)?;
        } else if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("textgrid"))
        {
            out.push(path);
        }
    }
    Ok(())
}

fn import_discourse(root: &Path, grid_path: &Path) -> Result<Discourse> {
    let grid = TextGrid::parse_file(grid_path)?;
    let name = grid_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let speaker = speaker_from_path(root, grid_path, &name);
    let audio_path = find_audio(grid_path);

    let (word_tier, phone_tier, tone_tier) = classify_tiers(&grid, grid_path)?;

    let phones: Vec<Phone> = phone_tier
        .intervals
        .iter()
        .map(|iv| Phone {
            label: iv.text.trim().to_string(),
            begin: iv.xmin,
            end: iv.xmax,
            is_pause: false,
        })
        .collect();

    let words = align_words(word_tier, &phones);

    let tones = tone_tier
        .map(|tier| {
            tier.intervals
                .iter()
                .filter(|iv| !iv.text.trim().is_empty())
                .map(|iv| ToneInterval {
                    label: iv.text.trim().to_string(),
                    begin: iv.xmin,
                    end: iv.xmax,
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(Discourse {
        name,
        speaker,
        audio_path,
        duration: grid.xmax - grid.xmin,
        phones,
        words,
        utterances: Vec::new(),
        tones,
    })
}

/// Speaker name from the directory containing the TextGrid. Files sitting
/// directly in the corpus root fall back to the discourse name.
fn speaker_from_path(root: &Path, grid_path: &Path, discourse_name: &str) -> String {
    grid_path
        .parent()
        .filter(|parent| *parent != root)
        .and_then(|parent| parent.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| discourse_name.to_string())
}

/// Find the WAV file paired with a TextGrid (same stem, same directory).
fn find_audio(grid_path: &Path) -> Option<PathBuf> {
    for ext in ["wav", "WAV"] {
        let candidate = grid_path.with_extension(ext);
        if candidate.exists() {
            return Some(candidate);
        }
    }
    None
}

/// Identify the word, phone, and optional tone tiers of a grid.
///
/// Tier names are matched first ("word", "phone", "tone" substrings,
/// case-insensitive). When names don't help, the tier with more intervals is
/// taken as the phone tier, the other as the word tier.
fn classify_tiers<'a>(
    grid: &'a TextGrid,
    grid_path: &Path,
) -> Result<(&'a IntervalTier, &'a IntervalTier, Option<&'a IntervalTier>)> {
    let mut word_tier = None;
    let mut phone_tier = None;
    let mut tone_tier = None;

    for tier in &grid.tiers {
        let lower = tier.name.to_lowercase();
        if lower.contains("word") && word_tier.is_none() {
            word_tier = Some(tier);
        } else if lower.contains("phone") && phone_tier.is_none() {
            phone_tier = Some(tier);
        } else if lower.contains("tone") && tone_tier.is_none() {
            tone_tier = Some(tier);
        }
    }

    match (word_tier, phone_tier) {
        (Some(w), Some(p)) => Ok((w, p, tone_tier)),
        _ if grid.tiers.len() >= 2 => {
            // Unnamed-convention fallback: phones outnumber words
            let mut by_size: Vec<&IntervalTier> = grid.tiers.iter().collect();
            by_size.sort_by_key(|t| std::cmp::Reverse(t.intervals.len()));
            Ok((by_size[1], by_size[0], tone_tier))
        }
        _ => Err(SyllexError::TextGridNoTiers {
            path: grid_path.display().to_string(),
        }),
    }
}

/// Build word tokens with their phone index spans.
///
/// A phone belongs to a word when its midpoint falls inside the word's
/// interval; phone spans are contiguous because both tiers are time-ordered.
fn align_words(word_tier: &IntervalTier, phones: &[Phone]) -> Vec<Word> {
    let mut words = Vec::new();
    for iv in &word_tier.intervals {
        let text = iv.text.trim();
        if text.is_empty() {
            continue;
        }
        let start = phones
            .iter()
            .position(|p| p.midpoint() >= iv.xmin && p.midpoint() < iv.xmax);
        let (start, end) = match start {
            Some(start) => {
                let end = phones[start..]
                    .iter()
                    .position(|p| p.midpoint() >= iv.xmax)
                    .map(|offset| start + offset)
                    .unwrap_or(phones.len());
                (start, end)
            }
            None => (0, 0),
        };
        words.push(Word {
            label: text.to_string(),
            begin: iv.xmin,
            end: iv.xmax,
            phones: (start, end),
            syllables: Vec::new(),
            num_syllables: None,
            num_phones: None,
            final_syllable: None,
        });
    }
    words
}
