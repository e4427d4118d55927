//! Corpus enrichment passes.
//!
//! Each pass derives one annotation layer and is run as its own corpus
//! session, in the order pauses → subsets → utterances → syllables → counts
//! → rate → speakers → positions/tones. Later passes assume the earlier
//! layers exist.

pub mod counts;
pub mod pauses;
pub mod positions;
pub mod rate;
pub mod speakers;
pub mod subsets;
pub mod syllables;
pub mod utterances;

pub use counts::{CountSummary, encode_counts};
pub use pauses::encode_pauses;
pub use positions::{encode_syllable_positions, encode_tones};
pub use rate::encode_speech_rate;
pub use speakers::enrich_speakers_from_csv;
pub use subsets::encode_type_subset;
pub use syllables::encode_syllables;
pub use utterances::encode_utterances;
