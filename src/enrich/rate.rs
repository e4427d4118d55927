//! Speech rate encoding.

use crate::corpus::Corpus;
use crate::error::Result;

/// Encode utterance speech rate as syllables per second.
///
/// Falls back to counting syllables directly when the counts pass has not
/// run. Zero-duration utterances keep a null rate. Returns the number of
/// utterances annotated.
pub fn encode_speech_rate(corpus: &mut Corpus) -> Result<usize> {
    let mut annotated = 0;
    for discourse in &mut corpus.discourses {
        for utterance in &mut discourse.utterances {
            let (start, end) = utterance.words;
            let syllables = utterance.num_syllables.unwrap_or_else(|| {
                discourse.words[start..end]
                    .iter()
                    .map(|w| w.syllables.len())
                    .sum()
            });
            let duration = utterance.duration();
            utterance.speech_rate = if duration > 0.0 {
                annotated += 1;
                Some(syllables as f64 / duration)
            } else {
                None
            };
        }
    }
    Ok(annotated)
}
