//! Corpus processing pipeline.
//!
//! Orchestrates the complete flow:
//! import → enrich → analyze → export
//!
//! Each phase opens its own corpus session, mutates the store, and saves
//! before the next phase begins, so a phase can also be re-run alone.

use crate::acoustics::{analyze_formants, analyze_intensity};
use crate::config::Config;
use crate::corpus::import::import_corpus;
use crate::corpus::store::CorpusSession;
use crate::defaults;
use crate::enrich::{
    encode_counts, encode_pauses, encode_speech_rate, encode_syllable_positions, encode_syllables,
    encode_tones, encode_type_subset, encode_utterances, enrich_speakers_from_csv,
};
use crate::error::Result;
use crate::export::export_disyllables;

/// Run the full pipeline in order.
pub fn run_all(config: &Config, quiet: bool, verbose: u8) -> Result<()> {
    run_import(config, quiet, verbose)?;
    run_inspect(config, quiet)?;
    run_enrich(config, None, quiet, verbose)?;
    run_analyze(config, false, quiet, verbose)?;
    run_export(config, quiet)?;
    Ok(())
}

/// Import the TextGrid tree into a fresh corpus store.
pub fn run_import(config: &Config, quiet: bool, verbose: u8) -> Result<()> {
    if !quiet {
        eprintln!("Importing corpus from {}...", config.corpus.root.display());
    }

    let (corpus, summary) = import_corpus(&config.corpus.root, &config.corpus.name)?;

    let mut session = CorpusSession::create(&config.corpus_dir(), &config.corpus.name)?;
    session.corpus = corpus;
    session.save()?;

    if !quiet {
        eprintln!(
            "Imported {} discourses, {} speakers, {} words, {} phones",
            summary.discourses, summary.speakers, summary.words, summary.phones
        );
        for name in &summary.missing_audio {
            eprintln!("Warning: no audio file for {}", name);
        }
    }
    if verbose >= 1 && !quiet {
        let session = CorpusSession::open(&config.corpus_dir())?;
        for discourse in &session.corpus.discourses {
            eprintln!(
                "  {} ({}, {:.2}s)",
                discourse.name, discourse.speaker, discourse.duration
            );
        }
    }
    Ok(())
}

/// Run every enrichment pass on the stored corpus.
pub fn run_enrich(
    config: &Config,
    min_pause_override: Option<f64>,
    quiet: bool,
    verbose: u8,
) -> Result<()> {
    let min_pause = min_pause_override.unwrap_or(config.enrichment.min_pause_secs);

    if !quiet {
        eprintln!("Encoding pauses...");
    }
    let mut session = CorpusSession::open(&config.corpus_dir())?;
    let pauses = encode_pauses(&mut session.corpus, &config.enrichment.pause_labels)?;
    session.save()?;
    if verbose >= 1 && !quiet {
        eprintln!("  {} phones marked as pauses", pauses);
    }

    if !quiet {
        eprintln!("Encoding vowel subset...");
    }
    let mut session = CorpusSession::open(&config.corpus_dir())?;
    let vowels = encode_type_subset(
        &mut session.corpus,
        defaults::SYLLABIC_SUBSET,
        &config.enrichment.vowel_labels,
    )?;
    session.save()?;
    if verbose >= 1 && !quiet {
        eprintln!("  {} vowel labels attested in the corpus", vowels);
    }

    if !quiet {
        eprintln!("Encoding utterances...");
    }
    let mut session = CorpusSession::open(&config.corpus_dir())?;
    let utterances = encode_utterances(&mut session.corpus, min_pause)?;
    session.save()?;
    if verbose >= 1 && !quiet {
        eprintln!("  {} utterances", utterances);
    }

    if !quiet {
        eprintln!("Encoding syllables...");
    }
    let mut session = CorpusSession::open(&config.corpus_dir())?;
    let syllables = encode_syllables(&mut session.corpus, defaults::SYLLABIC_SUBSET)?;
    session.save()?;
    if verbose >= 1 && !quiet {
        eprintln!("  {} syllables", syllables);
    }

    if !quiet {
        eprintln!("Encoding counts...");
    }
    let mut session = CorpusSession::open(&config.corpus_dir())?;
    encode_counts(&mut session.corpus)?;
    session.save()?;

    if !quiet {
        eprintln!("Encoding speech rate...");
    }
    let mut session = CorpusSession::open(&config.corpus_dir())?;
    encode_speech_rate(&mut session.corpus)?;
    session.save()?;

    if let Some(csv_path) = &config.corpus.speaker_csv {
        if !quiet {
            eprintln!("Enriching speakers from {}...", csv_path.display());
        }
        let mut session = CorpusSession::open(&config.corpus_dir())?;
        let enrichment = enrich_speakers_from_csv(&mut session.corpus, csv_path)?;
        session.save()?;
        if !quiet {
            eprintln!("  {} speakers matched", enrichment.matched);
            for name in &enrichment.unmatched {
                eprintln!("Warning: speaker {} not in the corpus", name);
            }
        }
    }

    if !quiet {
        eprintln!("Encoding syllable positions and tones...");
    }
    let mut session = CorpusSession::open(&config.corpus_dir())?;
    encode_syllable_positions(&mut session.corpus)?;
    let tones = encode_tones(&mut session.corpus)?;
    session.save()?;
    if verbose >= 1 && !quiet {
        eprintln!("  {} syllables carry a tone", tones);
    }

    Ok(())
}

/// Measure intensity and formants from the paired audio files.
pub fn run_analyze(config: &Config, no_formants: bool, quiet: bool, verbose: u8) -> Result<()> {
    if !quiet {
        eprintln!("Measuring intensity...");
    }
    let mut session = CorpusSession::open(&config.corpus_dir())?;
    let summary = analyze_intensity(&mut session.corpus)?;
    session.save()?;
    report_analysis(&summary, quiet, verbose);

    if !no_formants {
        if !quiet {
            eprintln!("Measuring formants...");
        }
        let mut session = CorpusSession::open(&config.corpus_dir())?;
        let summary = analyze_formants(&mut session.corpus)?;
        session.save()?;
        report_analysis(&summary, quiet, verbose);
    }

    Ok(())
}

fn report_analysis(summary: &crate::acoustics::AcousticsSummary, quiet: bool, verbose: u8) {
    if quiet {
        return;
    }
    eprintln!(
        "  {} discourses analyzed, {} syllables measured",
        summary.analyzed, summary.measured
    );
    for (name, reason) in &summary.skipped {
        if verbose >= 1 {
            eprintln!("Warning: skipped {}: {}", name, reason);
        }
    }
    if verbose == 0 && !summary.skipped.is_empty() {
        eprintln!(
            "Warning: {} discourses skipped (-v for details)",
            summary.skipped.len()
        );
    }
}

/// Write the disyllabic-word measurement CSV.
pub fn run_export(config: &Config, quiet: bool) -> Result<()> {
    if !quiet {
        eprintln!("Exporting to {}...", config.export.path.display());
    }
    let session = CorpusSession::open(&config.corpus_dir())?;
    let report = export_disyllables(&session.corpus, &config.export.path)?;
    if !quiet {
        eprintln!("Wrote {} rows", report.rows);
    }
    Ok(())
}

/// Print a summary of the stored corpus.
pub fn run_inspect(config: &Config, quiet: bool) -> Result<()> {
    let session = CorpusSession::open(&config.corpus_dir())?;
    let corpus = &session.corpus;

    if quiet {
        return Ok(());
    }

    println!("Corpus: {}", corpus.name);
    println!("Speakers: {}", corpus.speakers.len());
    println!("Discourses: {}", corpus.discourses.len());

    let phones: usize = corpus.discourses.iter().map(|d| d.phones.len()).sum();
    let words: usize = corpus.discourses.iter().map(|d| d.words.len()).sum();
    let syllables: usize = corpus
        .discourses
        .iter()
        .flat_map(|d| &d.words)
        .map(|w| w.syllables.len())
        .sum();
    let utterances: usize = corpus.discourses.iter().map(|d| d.utterances.len()).sum();
    println!("Phones: {}", phones);
    println!("Words: {}", words);
    if syllables > 0 {
        println!("Syllables: {}", syllables);
    }
    if utterances > 0 {
        println!("Utterances: {}", utterances);
    }

    let inventory = corpus.phone_inventory();
    println!("Phone inventory ({}): {}", inventory.len(), inventory.join(" "));
    for (name, labels) in &corpus.subsets {
        let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
        println!("Subset {}: {}", name, labels.join(" "));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::store::CorpusSession;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_textgrid(path: &Path) {
        // Minimal long-format TextGrid: one word tier, one phone tier
        let grid = r#"File type = "ooTextFile"
Object class = "TextGrid"

xmin = 0
xmax = 1.0
tiers? <exists>
size = 2
item []:
    item [1]:
        class = "IntervalTier"
        name = "words"
        xmin = 0
        xmax = 1.0
        intervals: size = 2
        intervals [1]:
            xmin = 0
            xmax = 0.4
            text = "ni3"
        intervals [2]:
            xmin = 0.4
            xmax = 1.0
            text = ""
    item [2]:
        class = "IntervalTier"
        name = "phones"
        xmin = 0
        xmax = 1.0
        intervals: size = 3
        intervals [1]:
            xmin = 0
            xmax = 0.2
            text = "n"
        intervals [2]:
            xmin = 0.2
            xmax = 0.4
            text = "i"
        intervals [3]:
            xmin = 0.4
            xmax = 1.0
            text = "sp"
"#;
        std::fs::write(path, grid).unwrap();
    }

    fn test_config(root: &Path, store: &Path, export: &Path) -> Config {
        let mut config = Config::default();
        config.corpus.name = "test".to_string();
        config.corpus.root = root.to_path_buf();
        config.corpus.directory = Some(store.to_path_buf());
        config.export.path = export.to_path_buf();
        config
    }

    #[test]
    fn import_then_enrich_then_export() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("corpus");
        let speaker_dir = root.join("s01");
        std::fs::create_dir_all(&speaker_dir).unwrap();
        write_textgrid(&speaker_dir.join("utt1.TextGrid"));

        let store = dir.path().join("store");
        let export = dir.path().join("out.csv");
        let config = test_config(&root, &store, &export);

        run_import(&config, true, 0).unwrap();
        run_enrich(&config, None, true, 0).unwrap();
        run_export(&config, true).unwrap();

        let session = CorpusSession::open(&store).unwrap();
        let discourse = &session.corpus.discourses[0];
        assert_eq!(discourse.speaker, "s01");
        assert_eq!(discourse.words.len(), 1);
        assert_eq!(discourse.words[0].syllables.len(), 1);
        assert!(discourse.phones[2].is_pause);

        // Export exists with header only (no disyllabic words in the fixture)
        let contents = std::fs::read_to_string(&export).unwrap();
        assert!(contents.starts_with("speaker,file,word_id"));
    }

    #[test]
    fn enrich_without_import_reports_missing_corpus() {
        let dir = TempDir::new().unwrap();
        let config = test_config(
            &dir.path().join("corpus"),
            &dir.path().join("store"),
            &dir.path().join("out.csv"),
        );
        let result = run_enrich(&config, None, true, 0);
        assert!(matches!(
            result,
            Err(crate::error::SyllexError::CorpusNotFound { .. })
        ));
    }

    #[test]
    fn analyze_tolerates_missing_audio() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("corpus");
        let speaker_dir = root.join("s01");
        std::fs::create_dir_all(&speaker_dir).unwrap();
        write_textgrid(&speaker_dir.join("utt1.TextGrid"));

        let store = dir.path().join("store");
        let config = test_config(&root, &store, &dir.path().join("out.csv"));

        run_import(&config, true, 0).unwrap();
        run_enrich(&config, None, true, 0).unwrap();
        run_analyze(&config, false, true, 0).unwrap();

        let session = CorpusSession::open(&store).unwrap();
        let syllable = &session.corpus.discourses[0].words[0].syllables[0];
        assert!(syllable.mean_intensity.is_none());
    }
}
