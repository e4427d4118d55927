//! CSV export of disyllabic-word measurements.
//!
//! The one external contract of the pipeline: one row per word with exactly
//! two syllables, reporting the word's initial syllable and its measurements.

use crate::corpus::Corpus;
use crate::error::{Result, SyllexError};
use crate::query::WordQuery;
use std::path::Path;

/// Column order of the export file.
const HEADER: [&str; 11] = [
    "speaker",
    "file",
    "word_id",
    "word",
    "initial_syllable",
    "position_in_word",
    "syllable_begin",
    "syllable_end",
    "syllable_duration",
    "syllable_tone",
    "syllable_intensity",
];

/// Outcome of an export run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    /// Data rows written, excluding the header.
    pub rows: usize,
}

/// Write the disyllabic-word CSV to `path`.
///
/// Selects every word with exactly two syllables and writes its initial
/// syllable's span, tone, and mean intensity. Optional measurements that
/// were never computed appear as empty cells.
pub fn export_disyllables(corpus: &Corpus, path: &Path) -> Result<ExportReport> {
    let hits = WordQuery::new().with_num_syllables(2).run(corpus);

    let mut writer = csv::Writer::from_path(path).map_err(|e| SyllexError::Export {
        message: format!("cannot open {}: {e}", path.display()),
    })?;
    writer.write_record(HEADER)?;

    for hit in &hits {
        let syllable = &hit.word.syllables[0];
        let position = syllable
            .position
            .map(|p| p.to_string())
            .unwrap_or_default();
        writer.write_record([
            hit.discourse.speaker.as_str(),
            hit.discourse.name.as_str(),
            hit.word_id.as_str(),
            hit.word.label.as_str(),
            syllable.label.as_str(),
            &position,
            &format_secs(syllable.begin),
            &format_secs(syllable.end),
            &format_secs(syllable.duration()),
            syllable.tone.as_deref().unwrap_or(""),
            &syllable
                .mean_intensity
                .map(|db| format!("{db:.2}"))
                .unwrap_or_default(),
        ])?;
    }
    writer.flush()?;

    Ok(ExportReport { rows: hits.len() })
}

/// Seconds with millisecond precision, matching the annotation resolution.
fn format_secs(secs: f64) -> String {
    format!("{secs:.3}")
}
