//! Type-level phone subsets.

use crate::corpus::Corpus;
use crate::error::Result;

/// Encode a named type subset over phone labels (e.g. "vowel").
///
/// The subset is stored at the corpus level and keyed by label, so it applies
/// to every token with a member label. Returns how many of the given labels
/// actually occur in the corpus.
pub fn encode_type_subset(corpus: &mut Corpus, name: &str, labels: &[String]) -> Result<usize> {
    let inventory = corpus.phone_inventory();
    let present = labels
        .iter()
        .filter(|label| inventory.iter().any(|l| l == *label))
        .count();

    corpus
        .subsets
        .insert(name.to_string(), labels.iter().cloned().collect());
    Ok(present)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{Discourse, Phone};

    fn corpus_with_labels(labels: &[&str]) -> Corpus {
        let phones = labels
            .iter()
            .enumerate()
            .map(|(i, label)| Phone {
                label: label.to_string(),
                begin: i as f64,
                end: i as f64 + 1.0,
                is_pause: false,
            })
            .collect();
        let mut corpus = Corpus::new("test");
        corpus.discourses.push(Discourse {
            name: "utt1".to_string(),
            speaker: "s01".to_string(),
            audio_path: None,
            duration: labels.len() as f64,
            phones,
            words: vec![],
            utterances: vec![],
            tones: vec![],
        });
        corpus
    }

    fn label_set(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn encodes_subset_and_counts_present_labels() {
        let mut corpus = corpus_with_labels(&["n", "i", "a"]);
        let present =
            encode_type_subset(&mut corpus, "vowel", &label_set(&["a", "i", "u"])).unwrap();
        assert_eq!(present, 2, "u is not in this corpus");
        assert!(corpus.in_subset("vowel", "a"));
        assert!(corpus.in_subset("vowel", "u"), "subset keeps all labels");
        assert!(!corpus.in_subset("vowel", "n"));
    }

    #[test]
    fn re_encoding_replaces_the_subset() {
        let mut corpus = corpus_with_labels(&["a", "i"]);
        encode_type_subset(&mut corpus, "vowel", &label_set(&["a"])).unwrap();
        encode_type_subset(&mut corpus, "vowel", &label_set(&["i"])).unwrap();
        assert!(!corpus.in_subset("vowel", "a"));
        assert!(corpus.in_subset("vowel", "i"));
    }

    #[test]
    fn multiple_subsets_coexist() {
        let mut corpus = corpus_with_labels(&["n", "a"]);
        encode_type_subset(&mut corpus, "vowel", &label_set(&["a"])).unwrap();
        encode_type_subset(&mut corpus, "nasal", &label_set(&["n"])).unwrap();
        assert!(corpus.in_subset("vowel", "a"));
        assert!(corpus.in_subset("nasal", "n"));
    }
}
