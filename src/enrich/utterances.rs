//! Utterance segmentation.

use crate::corpus::types::Utterance;
use crate::corpus::Corpus;
use crate::error::Result;

/// Group words into utterances, splitting at pauses of at least
/// `min_pause_secs`. Returns the total number of utterances encoded.
///
/// A gap between consecutive words counts as a pause when no non-pause phone
/// falls inside it, which holds by construction after pause encoding: the
/// only material between words is silence or pause phones.
pub fn encode_utterances(corpus: &mut Corpus, min_pause_secs: f64) -> Result<usize> {
    let mut total = 0;
    for discourse in &mut corpus.discourses {
        discourse.utterances.clear();

        let mut start: Option<usize> = None;
        for i in 0..discourse.words.len() {
            let run_start = match start {
                Some(s) => s,
                None => {
                    start = Some(i);
                    i
                }
            };
            let is_last = i + 1 == discourse.words.len();
            let split = if is_last {
                true
            } else {
                let gap = discourse.words[i + 1].begin - discourse.words[i].end;
                gap >= min_pause_secs
            };
            if split {
                discourse.utterances.push(Utterance {
                    begin: discourse.words[run_start].begin,
                    end: discourse.words[i].end,
                    words: (run_start, i + 1),
                    num_words: None,
                    num_syllables: None,
                    speech_rate: None,
                });
                start = None;
            }
        }
        total += discourse.utterances.len();
    }
    Ok(total)
}
