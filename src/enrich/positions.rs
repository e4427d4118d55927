//! Syllable position and tone properties.
//!
//! Replaces the exploratory begin/end property-setting of the original
//! analysis with one deterministic pass: every syllable knows its position
//! in the word, every word records its final syllable's label, and every
//! syllable carries a lexical tone where one can be recovered.

use crate::corpus::types::SyllablePosition;
use crate::corpus::Corpus;
use crate::error::Result;

/// Assign `position_in_word` to every syllable and `final_syllable` to every
/// word. Returns the number of syllables annotated.
pub fn encode_syllable_positions(corpus: &mut Corpus) -> Result<usize> {
    let mut annotated = 0;
    for discourse in &mut corpus.discourses {
        for word in &mut discourse.words {
            let count = word.syllables.len();
            for (i, syllable) in word.syllables.iter_mut().enumerate() {
                syllable.position = Some(match (i, count) {
                    (_, 1) => SyllablePosition::Only,
                    (0, _) => SyllablePosition::Initial,
                    (i, n) if i + 1 == n => SyllablePosition::Final,
                    _ => SyllablePosition::Medial,
                });
                annotated += 1;
            }
            word.final_syllable = word.syllables.last().map(|s| s.label.clone());
        }
    }
    Ok(annotated)
}

/// Assign a tone to every syllable.
///
/// Preference order: the tone-tier label overlapping the nucleus midpoint,
/// else trailing digits on the nucleus label (pinyin-style phone sets),
/// else none. Returns the number of syllables that received a tone.
pub fn encode_tones(corpus: &mut Corpus) -> Result<usize> {
    let mut annotated = 0;
    for discourse in &mut corpus.discourses {
        let phones = &discourse.phones;
        let tones = &discourse.tones;
        for word in &mut discourse.words {
            for syllable in &mut word.syllables {
                let nucleus = &phones[syllable.nucleus];
                let midpoint = nucleus.midpoint();
                let from_tier = tones
                    .iter()
                    .find(|t| t.begin <= midpoint && midpoint < t.end)
                    .map(|t| t.label.clone());
                syllable.tone = from_tier.or_else(|| trailing_digits(&nucleus.label));
                if syllable.tone.is_some() {
                    annotated += 1;
                }
            }
        }
    }
    Ok(annotated)
}

/// Trailing digits of a phone label ("ao3" → "3"), if any.
fn trailing_digits(label: &str) -> Option<String> {
    let digits: String = label
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if digits.is_empty() { None } else { Some(digits) }
}
