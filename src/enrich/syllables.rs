//! Syllable encoding over vowel nuclei.
//!
//! Each phone in the syllabic subset anchors one syllable. Intervocalic
//! consonants attach to the following nucleus by maximal attested onset:
//! only consonant sequences observed word-initially somewhere in the corpus
//! may begin a syllable, and the longest such suffix of the cluster wins.

use crate::corpus::types::{Phone, Syllable};
use crate::corpus::Corpus;
use crate::error::{Result, SyllexError};
use std::collections::{BTreeSet, HashSet};

/// Build syllables for every word, using members of the named type subset as
/// nuclei. Returns the total number of syllables encoded.
pub fn encode_syllables(corpus: &mut Corpus, subset: &str) -> Result<usize> {
    let Some(subset_labels) = corpus.subsets.get(subset).cloned() else {
        return Err(SyllexError::Enrichment {
            step: "syllables".to_string(),
            message: format!("no '{}' subset encoded", subset),
        });
    };

    let onsets = attested_onsets(corpus, &subset_labels);

    let mut total = 0;
    for discourse in &mut corpus.discourses {
        let phones = &discourse.phones;
        for word in &mut discourse.words {
            let (start, end) = word.phones;
            let span = &phones[start..end];

            let nuclei: Vec<usize> = span
                .iter()
                .enumerate()
                .filter(|(_, p)| !p.is_pause && subset_labels.contains(&p.label))
                .map(|(i, _)| start + i)
                .collect();

            word.syllables = if nuclei.is_empty() {
                if span.is_empty() {
                    Vec::new()
                } else {
                    // No nucleus: the whole word is one syllable
                    vec![make_syllable(phones, start, end, start)]
                }
            } else {
                split_word(phones, start, end, &nuclei, &onsets)
            };
            total += word.syllables.len();
        }
    }
    Ok(total)
}

/// Collect consonant sequences attested word-initially (before the first
/// nucleus of any word). The empty onset is always attested.
fn attested_onsets(corpus: &Corpus, subset_labels: &BTreeSet<String>) -> HashSet<Vec<String>> {
    let mut onsets = HashSet::new();
    onsets.insert(Vec::new());

    for discourse in &corpus.discourses {
        for word in &discourse.words {
            let (start, end) = word.phones;
            let span = &discourse.phones[start..end];
            let Some(first_nucleus) = span
                .iter()
                .position(|p| !p.is_pause && subset_labels.contains(&p.label))
            else {
                continue;
            };
            let onset: Vec<String> = span[..first_nucleus]
                .iter()
                .filter(|p| !p.is_pause)
                .map(|p| p.label.clone())
                .collect();
            onsets.insert(onset);
        }
    }
    onsets
}

/// Split the word span `[start, end)` into one syllable per nucleus.
fn split_word(
    phones: &[Phone],
    start: usize,
    end: usize,
    nuclei: &[usize],
    onsets: &HashSet<Vec<String>>,
) -> Vec<Syllable> {
    let mut boundaries = vec![start];

    for pair in nuclei.windows(2) {
        let (left_nucleus, right_nucleus) = (pair[0], pair[1]);
        let cluster: Vec<String> = phones[left_nucleus + 1..right_nucleus]
            .iter()
            .map(|p| p.label.clone())
            .collect();

        // Longest attested suffix of the cluster becomes the next onset
        let mut onset_len = 0;
        for take in (0..=cluster.len()).rev() {
            if onsets.contains(&cluster[cluster.len() - take..]) {
                onset_len = take;
                break;
            }
        }
        boundaries.push(right_nucleus - onset_len);
    }
    boundaries.push(end);

    boundaries
        .windows(2)
        .zip(nuclei)
        .map(|(bound, &nucleus)| make_syllable(phones, bound[0], bound[1], nucleus))
        .collect()
}

fn make_syllable(phones: &[Phone], start: usize, end: usize, nucleus: usize) -> Syllable {
    let label = phones[start..end]
        .iter()
        .map(|p| p.label.as_str())
        .collect::<Vec<_>>()
        .join(".");
    Syllable {
        label,
        begin: phones[start].begin,
        end: phones[end - 1].end,
        phones: (start, end),
        nucleus,
        position: None,
        tone: None,
        num_phones: None,
        mean_intensity: None,
        formants: None,
    }
}
