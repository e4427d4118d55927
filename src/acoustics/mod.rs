//! Acoustic measurements over the paired audio files.
//!
//! Per-discourse WAVs are decoded once and measurements are written back
//! onto syllables. A discourse whose audio is missing or unreadable is
//! skipped with a report entry; it never aborts the pipeline.

pub mod audio;
pub mod formants;
pub mod intensity;

pub use formants::analyze_formants;
pub use intensity::analyze_intensity;

/// Outcome of one acoustic analysis pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AcousticsSummary {
    /// Discourses whose audio was analyzed.
    pub analyzed: usize,
    /// Syllables that received a measurement.
    pub measured: usize,
    /// Discourses skipped, with the reason.
    pub skipped: Vec<(String, String)>,
}
