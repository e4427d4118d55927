//! Pause encoding.

use crate::corpus::Corpus;
use crate::error::Result;

/// Mark phones with the given labels as pauses.
///
/// Unlabeled phone intervals are always pauses, whatever the label set.
/// Returns the number of phone tokens marked.
pub fn encode_pauses(corpus: &mut Corpus, labels: &[String]) -> Result<usize> {
    corpus.pause_labels = labels.iter().cloned().collect();

    let mut marked = 0;
    for discourse in &mut corpus.discourses {
        for phone in &mut discourse.phones {
            let is_pause = phone.label.is_empty() || corpus.pause_labels.contains(&phone.label);
            if is_pause && !phone.is_pause {
                marked += 1;
            }
            phone.is_pause = is_pause;
        }
    }
    Ok(marked)
}
