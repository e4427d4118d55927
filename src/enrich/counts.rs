//! Hierarchical count encoding.
//!
//! Stores the five derived counts the export and rate passes rely on:
//! syllables per word, syllables per utterance, phones per syllable, phones
//! per word, and words per utterance.

use crate::corpus::Corpus;
use crate::error::Result;

/// Totals reported after count encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountSummary {
    pub words: usize,
    pub syllables: usize,
    pub utterances: usize,
}

/// Encode all hierarchical counts. Returns how many units were annotated.
pub fn encode_counts(corpus: &mut Corpus) -> Result<CountSummary> {
    let mut summary = CountSummary {
        words: 0,
        syllables: 0,
        utterances: 0,
    };

    for discourse in &mut corpus.discourses {
        for word in &mut discourse.words {
            let (start, end) = word.phones;
            word.num_phones = Some(end - start);
            word.num_syllables = Some(word.syllables.len());
            for syllable in &mut word.syllables {
                let (s, e) = syllable.phones;
                syllable.num_phones = Some(e - s);
                summary.syllables += 1;
            }
            summary.words += 1;
        }

        for utterance in &mut discourse.utterances {
            let (start, end) = utterance.words;
            utterance.num_words = Some(end - start);
            utterance.num_syllables = Some(
                discourse.words[start..end]
                    .iter()
                    .map(|w| w.syllables.len())
                    .sum(),
            );
            summary.utterances += 1;
        }
    }
    Ok(summary)
}
