//! Default configuration constants for syllex.
//!
//! This module provides shared constants used across different configuration
//! types to ensure consistency and eliminate duplication.

/// Minimum pause length in seconds for utterance segmentation.
///
/// Words separated by a pause shorter than this stay in the same utterance.
/// 150 ms is the conventional cutoff for forced-aligned speech corpora.
pub const MIN_PAUSE_SECS: f64 = 0.15;

/// Non-speech phone labels treated as pauses.
///
/// Covers the usual non-speech suspects emitted by MFA-style aligners.
/// Not every label occurs in every corpus; extra entries are harmless.
pub const NON_SPEECH_LABELS: &[&str] = &["sp", "spn", "<SIL>", "sil", "<sil>"];

/// Default vowel inventory used as syllable nuclei.
///
/// Matches the Hanyu Pinyin phone set of MFA Mandarin acoustic models.
/// Override per-corpus in the config when the phone set differs.
pub const VOWEL_LABELS: &[&str] = &[
    "e", "a", "u", "i", "ii", "o", "ao", "v", "ei", "ou", "ai",
];

/// Name of the type subset that marks syllabic phones.
pub const SYLLABIC_SUBSET: &str = "vowel";

/// Intensity analysis window length in milliseconds.
///
/// 32 ms matches the effective window of a 100 Hz minimum-pitch intensity
/// analysis and is long enough to smooth over individual glottal pulses.
pub const INTENSITY_WINDOW_MS: f64 = 32.0;

/// Intensity analysis step in milliseconds.
pub const INTENSITY_STEP_MS: f64 = 10.0;

/// Reference pressure for dB conversion (auditory threshold, 20 µPa).
pub const INTENSITY_DB_REF: f64 = 2e-5;

/// Sample rate formant analysis operates at, in Hz.
///
/// Audio is downsampled so the Nyquist frequency (5500 Hz) bounds the
/// formant search range, the standard ceiling for adult speakers.
pub const FORMANT_SAMPLE_RATE: u32 = 11000;

/// LPC order for formant estimation.
pub const FORMANT_LPC_ORDER: usize = 10;

/// Formant analysis frame length in milliseconds.
pub const FORMANT_WINDOW_MS: f64 = 25.0;

/// Number of formants measured per nucleus.
pub const NUM_FORMANTS: usize = 3;

/// File name of the serialized corpus store inside the corpus directory.
pub const CORPUS_FILE: &str = "corpus.json";

/// Default file name for the exported syllable measurement table.
pub const EXPORT_FILE: &str = "syllables.csv";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_speech_labels_cover_mfa_conventions() {
        assert!(NON_SPEECH_LABELS.contains(&"sp"));
        assert!(NON_SPEECH_LABELS.contains(&"sil"));
        assert!(NON_SPEECH_LABELS.contains(&"<SIL>"));
    }

    #[test]
    fn vowel_labels_are_unique() {
        let mut labels: Vec<&str> = VOWEL_LABELS.to_vec();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), VOWEL_LABELS.len());
    }

    #[test]
    fn intensity_window_longer_than_step() {
        assert!(INTENSITY_WINDOW_MS > INTENSITY_STEP_MS);
    }

    #[test]
    fn formant_order_fits_sample_rate() {
        // Rule of thumb: LPC order ≈ 2 + sample_rate_khz
        assert!(FORMANT_LPC_ORDER >= 2 + (FORMANT_SAMPLE_RATE / 1000) as usize - 3);
    }
}
