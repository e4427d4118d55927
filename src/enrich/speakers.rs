//! Speaker demographic enrichment from CSV.

use crate::corpus::Corpus;
use crate::error::{Result, SyllexError};
use std::path::Path;

/// Result of joining a demographics CSV onto the corpus speakers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerEnrichment {
    /// Speakers that received at least one property.
    pub matched: usize,
    /// CSV rows whose speaker is not in the corpus.
    pub unmatched: Vec<String>,
}

/// Join demographic columns from `path` onto speakers by name.
///
/// The speaker key column is the one headed `name` or `speaker`
/// (case-insensitive), falling back to the first column. Rows for unknown
/// speakers are reported in the result, not treated as errors.
pub fn enrich_speakers_from_csv(corpus: &mut Corpus, path: &Path) -> Result<SpeakerEnrichment> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| SyllexError::SpeakerCsv {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let headers = reader
        .headers()
        .map_err(|e| SyllexError::SpeakerCsv {
            path: path.display().to_string(),
            message: e.to_string(),
        })?
        .clone();

    let key_column = headers
        .iter()
        .position(|h| {
            let h = h.trim().to_lowercase();
            h == "name" || h == "speaker"
        })
        .unwrap_or(0);

    let mut result = SpeakerEnrichment {
        matched: 0,
        unmatched: Vec::new(),
    };

    for record in reader.records() {
        let record = record.map_err(|e| SyllexError::SpeakerCsv {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let Some(name) = record.get(key_column).map(str::trim) else {
            continue;
        };
        match corpus.speaker_mut(name) {
            Some(speaker) => {
                for (i, header) in headers.iter().enumerate() {
                    if i == key_column {
                        continue;
                    }
                    let value = record.get(i).unwrap_or("").trim();
                    speaker
                        .properties
                        .insert(header.trim().to_string(), value.to_string());
                }
                result.matched += 1;
            }
            None => result.unmatched.push(name.to_string()),
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Speaker;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn corpus_with_speakers(names: &[&str]) -> Corpus {
        let mut corpus = Corpus::new("test");
        for name in names {
            corpus.speakers.push(Speaker::new(*name));
        }
        corpus
    }

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn joins_columns_by_speaker_name() {
        let mut corpus = corpus_with_speakers(&["s01", "s02"]);
        let file = csv_file("speaker,age,gender\ns01,24,f\ns02,31,m\n");

        let result = enrich_speakers_from_csv(&mut corpus, file.path()).unwrap();
        assert_eq!(result.matched, 2);
        assert!(result.unmatched.is_empty());

        let s01 = corpus.speaker("s01").unwrap();
        assert_eq!(s01.properties.get("age"), Some(&"24".to_string()));
        assert_eq!(s01.properties.get("gender"), Some(&"f".to_string()));
        assert!(!s01.properties.contains_key("speaker"), "key column not stored");
    }

    #[test]
    fn accepts_name_as_key_header() {
        let mut corpus = corpus_with_speakers(&["s01"]);
        let file = csv_file("age,Name\n24,s01\n");

        let result = enrich_speakers_from_csv(&mut corpus, file.path()).unwrap();
        assert_eq!(result.matched, 1);
        assert_eq!(
            corpus.speaker("s01").unwrap().properties.get("age"),
            Some(&"24".to_string())
        );
    }

    #[test]
    fn falls_back_to_first_column_as_key() {
        let mut corpus = corpus_with_speakers(&["s01"]);
        let file = csv_file("id,age\ns01,24\n");

        let result = enrich_speakers_from_csv(&mut corpus, file.path()).unwrap();
        assert_eq!(result.matched, 1);
    }

    #[test]
    fn unknown_speakers_are_reported_not_fatal() {
        let mut corpus = corpus_with_speakers(&["s01"]);
        let file = csv_file("speaker,age\ns01,24\nghost,99\n");

        let result = enrich_speakers_from_csv(&mut corpus, file.path()).unwrap();
        assert_eq!(result.matched, 1);
        assert_eq!(result.unmatched, vec!["ghost".to_string()]);
    }

    #[test]
    fn missing_file_is_a_speaker_csv_error() {
        let mut corpus = corpus_with_speakers(&["s01"]);
        let result = enrich_speakers_from_csv(&mut corpus, Path::new("/nonexistent/demo.csv"));
        match result {
            Err(SyllexError::SpeakerCsv { path, .. }) => {
                assert!(path.contains("demo.csv"));
            }
            other => panic!("Expected SpeakerCsv error, got {:?}", other),
        }
    }

    #[test]
    fn whitespace_in_cells_is_trimmed() {
        let mut corpus = corpus_with_speakers(&["s01"]);
        let file = csv_file("speaker,age\n s01 , 24 \n");

        let result = enrich_speakers_from_csv(&mut corpus, file.path()).unwrap();
        assert_eq!(result.matched, 1);
        assert_eq!(
            corpus.speaker("s01").unwrap().properties.get("age"),
            Some(&"24".to_string())
        );
    }
}
