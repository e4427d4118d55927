//! Intensity analysis.
//!
//! Frame-based intensity in dB re 20 µPa: Hann-weighted mean square over a
//! sliding window, sampled every step. Per-syllable mean intensity is the
//! mean of the frames whose centers fall inside the syllable span.

use crate::acoustics::audio::load_wav;
use crate::acoustics::AcousticsSummary;
use crate::corpus::Corpus;
use crate::defaults;
use crate::error::Result;

/// A sampled intensity contour for one discourse.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityTrack {
    /// Frame center times in seconds.
    pub times: Vec<f64>,
    /// Intensity per frame in dB.
    pub values_db: Vec<f64>,
}

impl IntensityTrack {
    /// Mean intensity over `[begin, end)`, or `None` when no frame center
    /// falls inside the span.
    pub fn mean_between(&self, begin: f64, end: f64) -> Option<f64> {
        let mut sum = 0.0;
        let mut count = 0usize;
        for (time, value) in self.times.iter().zip(&self.values_db) {
            if *time >= begin && *time < end {
                sum += value;
                count += 1;
            }
        }
        (count > 0).then(|| sum / count as f64)
    }
}

/// Compute the intensity contour of a signal.
pub fn intensity_track(
    samples: &[f64],
    sample_rate: u32,
    window_ms: f64,
    step_ms: f64,
) -> IntensityTrack {
    let window_len = ((window_ms / 1000.0) * sample_rate as f64).round() as usize;
    let step_len = ((step_ms / 1000.0) * sample_rate as f64).round().max(1.0) as usize;

    let mut track = IntensityTrack {
        times: Vec::new(),
        values_db: Vec::new(),
    };
    if window_len == 0 || samples.len() < window_len {
        return track;
    }

    // Hann weights, normalized inside the frame loop
    let weights: Vec<f64> = (0..window_len)
        .map(|n| {
            let phase = 2.0 * std::f64::consts::PI * n as f64 / (window_len - 1).max(1) as f64;
            0.5 * (1.0 - phase.cos())
        })
        .collect();
    let weight_sum: f64 = weights.iter().sum();

    let mut start = 0;
    while start + window_len <= samples.len() {
        let frame = &samples[start..start + window_len];
        let mean_square = frame
            .iter()
            .zip(&weights)
            .map(|(x, w)| w * x * x)
            .sum::<f64>()
            / weight_sum;

        let reference = defaults::INTENSITY_DB_REF * defaults::INTENSITY_DB_REF;
        let db = 10.0 * (mean_square.max(1e-30) / reference).log10();

        let center = (start + window_len / 2) as f64 / sample_rate as f64;
        track.times.push(center);
        track.values_db.push(db);

        start += step_len;
    }
    track
}

/// Measure mean intensity for every syllable in the corpus.
pub fn analyze_intensity(corpus: &mut Corpus) -> Result<AcousticsSummary> {
    let mut summary = AcousticsSummary::default();

    for discourse in &mut corpus.discourses {
        let Some(audio_path) = discourse.audio_path.clone() else {
            summary
                .skipped
                .push((discourse.name.clone(), "no audio file".to_string()));
            continue;
        };
        let (samples, sample_rate) = match load_wav(&audio_path) {
            Ok(loaded) => loaded,
            Err(e) => {
                summary.skipped.push((discourse.name.clone(), e.to_string()));
                continue;
            }
        };

        let track = intensity_track(
            &samples,
            sample_rate,
            defaults::INTENSITY_WINDOW_MS,
            defaults::INTENSITY_STEP_MS,
        );

        for word in &mut discourse.words {
            for syllable in &mut word.syllables {
                syllable.mean_intensity = track.mean_between(syllable.begin, syllable.end);
                if syllable.mean_intensity.is_some() {
                    summary.measured += 1;
                }
            }
        }
        summary.analyzed += 1;
    }
    Ok(summary)
}
