//! Formant point measurement.
//!
//! F1..F3 at each syllable nucleus midpoint, estimated from the LPC
//! spectral envelope: downsample to the formant ceiling's Nyquist rate,
//! pre-emphasize, window, fit an autocorrelation LPC model, and pick the
//! envelope's lowest spectral peaks.

use crate::acoustics::audio::{load_wav, resample};
use crate::acoustics::AcousticsSummary;
use crate::corpus::Corpus;
use crate::defaults;
use crate::error::Result;

/// Pre-emphasis coefficient flattening the spectral tilt of voiced speech.
const PRE_EMPHASIS: f64 = 0.95;

/// Frequency resolution of the envelope scan in Hz.
const SCAN_STEP_HZ: f64 = 10.0;

/// Lower bound of the formant search range in Hz.
const SCAN_FLOOR_HZ: f64 = 90.0;

/// Measure formant points for every syllable nucleus in the corpus.
pub fn analyze_formants(corpus: &mut Corpus) -> Result<AcousticsSummary> {
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
        let downsampled = resample(&samples, sample_rate, defaults::FORMANT_SAMPLE_RATE);

        let phones = &discourse.phones;
        for word in &mut discourse.words {
            for syllable in &mut word.syllables {
                let nucleus = &phones[syllable.nucleus];
                syllable.formants = formants_at(
                    &downsampled,
                    defaults::FORMANT_SAMPLE_RATE,
                    nucleus.midpoint(),
                );
                if syllable.formants.is_some() {
                    summary.measured += 1;
                }
            }
        }
        summary.analyzed += 1;
    }
    Ok(summary)
}

/// Estimate up to [`defaults::NUM_FORMANTS`] formant frequencies at `time`.
///
/// Returns `None` when the analysis frame falls outside the signal, the
/// frame is (near-)silent, or the LPC fit is unstable.
pub fn formants_at(samples: &[f64], sample_rate: u32, time: f64) -> Option<Vec<f64>> {
    let frame_len = ((defaults::FORMANT_WINDOW_MS / 1000.0) * sample_rate as f64) as usize;
    let center = (time * sample_rate as f64) as usize;
    let half = frame_len / 2;
    if center < half || center + half > samples.len() || frame_len < defaults::FORMANT_LPC_ORDER * 2
    {
        return None;
    }

    // Pre-emphasis then Hamming window
    let raw = &samples[center - half..center + half];
    let mut frame: Vec<f64> = raw
        .iter()
        .enumerate()
        .map(|(n, &x)| if n == 0 { x } else { x - PRE_EMPHASIS * raw[n - 1] })
        .collect();
    let len = frame.len();
    for (n, x) in frame.iter_mut().enumerate() {
        let phase = 2.0 * std::f64::consts::PI * n as f64 / (len - 1) as f64;
        *x *= 0.54 - 0.46 * phase.cos();
    }

    let lpc = lpc_coefficients(&frame, defaults::FORMANT_LPC_ORDER)?;
    let peaks = envelope_peaks(&lpc, sample_rate);
    if peaks.is_empty() {
        return None;
    }
    Some(peaks.into_iter().take(defaults::NUM_FORMANTS).collect())
}

/// Autocorrelation LPC via Levinson-Durbin.
///
/// Returns the prediction polynomial `a[0..=order]` with `a[0] = 1`, or
/// `None` for silent or numerically degenerate frames.
fn lpc_coefficients(frame: &[f64], order: usize) -> Option<Vec<f64>> {
    let mut autocorr = vec![0.0; order + 1];
    for (lag, r) in autocorr.iter_mut().enumerate() {
        *r = frame
            .iter()
            .zip(&frame[lag..])
            .map(|(a, b)| a * b)
            .sum::<f64>();
    }
    if autocorr[0] < 1e-12 {
        return None;
    }

    let mut a = vec![0.0; order + 1];
    a[0] = 1.0;
    let mut error = autocorr[0];

    for i in 1..=order {
        let mut acc = autocorr[i];
        for j in 1..i {
            acc += a[j] * autocorr[i - j];
        }
        let reflection = -acc / error;

        let prev = a.clone();
        for j in 1..i {
            a[j] = prev[j] + reflection * prev[i - j];
        }
        a[i] = reflection;

        error *= 1.0 - reflection * reflection;
        if error <= 0.0 {
            return None;
        }
    }
    Some(a)
}

/// Local maxima of the LPC envelope between the scan floor and Nyquist.
fn envelope_peaks(lpc: &[f64], sample_rate: u32) -> Vec<f64> {
    let nyquist = sample_rate as f64 / 2.0;
    let mut freqs = Vec::new();
    let mut powers = Vec::new();
    let mut f = SCAN_FLOOR_HZ;
    while f < nyquist {
        powers.push(envelope_power(lpc, f, sample_rate));
        freqs.push(f);
        f += SCAN_STEP_HZ;
    }

    let mut peaks = Vec::new();
    for i in 1..powers.len().saturating_sub(1) {
        if powers[i] > powers[i - 1] && powers[i] >= powers[i + 1] {
            peaks.push(freqs[i]);
        }
    }
    peaks
}

/// `1 / |A(e^{jw})|^2` at frequency `f`.
fn envelope_power(lpc: &[f64], f: f64, sample_rate: u32) -> f64 {
    let omega = 2.0 * std::f64::consts::PI * f / sample_rate as f64;
    let mut re = 0.0;
    let mut im = 0.0;
    for (k, &coeff) in lpc.iter().enumerate() {
        re += coeff * (omega * k as f64).cos();
        im -= coeff * (omega * k as f64).sin();
    }
    1.0 / (re * re + im * im).max(1e-30)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Synthesize a vowel-like signal: pulse train through resonators.
    fn synthetic_vowel(formants: &[f64], secs: f64, rate: u32) -> Vec<f64> {
        let n = (secs * rate as f64) as usize;
        // Sum of damped sinusoids restarted at each glottal pulse (120 Hz)
        let pulse_period = rate as f64 / 120.0;
        (0..n)
            .map(|i| {
                let since_pulse = (i as f64) % pulse_period;
                let t = since_pulse / rate as f64;
                formants
                    .iter()
                    .map(|&f| (-60.0 * t).exp() * (2.0 * std::f64::consts::PI * f * t).sin())
                    .sum::<f64>()
                    * 0.2
            })
            .collect()
    }

    #[test]
    fn recovers_formants_of_synthetic_vowel() {
        let rate = defaults::FORMANT_SAMPLE_RATE;
        let target = [700.0, 1200.0, 2600.0]; // roughly an /a/
        let samples = synthetic_vowel(&target, 0.5, rate);

        let formants = formants_at(&samples, rate, 0.25).expect("analysis should succeed");
        assert_eq!(formants.len(), 3);
        for (measured, expected) in formants.iter().zip(&target) {
            let relative = (measured - expected).abs() / expected;
            assert!(
                relative < 0.15,
                "formant {} too far from {}",
                measured,
                expected
            );
        }
    }

    #[test]
    fn formants_are_ascending() {
        let rate = defaults::FORMANT_SAMPLE_RATE;
        let samples = synthetic_vowel(&[500.0, 1500.0, 2500.0], 0.5, rate);
        let formants = formants_at(&samples, rate, 0.25).unwrap();
        for pair in formants.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn silent_frame_yields_none() {
        let samples = vec![0.0; 11000];
        assert!(formants_at(&samples, 11000, 0.5).is_none());
    }

    #[test]
    fn out_of_range_time_yields_none() {
        let samples = synthetic_vowel(&[700.0], 0.1, 11000);
        assert!(formants_at(&samples, 11000, 5.0).is_none());
        assert!(formants_at(&samples, 11000, 0.0).is_none());
    }

    #[test]
    fn lpc_rejects_silence() {
        assert!(lpc_coefficients(&vec![0.0; 256], 10).is_none());
    }

    #[test]
    fn lpc_returns_monic_polynomial() {
        let frame: Vec<f64> = (0..256)
            .map(|n| (2.0 * std::f64::consts::PI * 700.0 * n as f64 / 11000.0).sin())
            .collect();
        let lpc = lpc_coefficients(&frame, 10).unwrap();
        assert_eq!(lpc.len(), 11);
        assert_eq!(lpc[0], 1.0);
    }

    #[test]
    fn envelope_peaks_finds_resonance_of_pure_tone() {
        let frame: Vec<f64> = (0..256)
            .map(|n| (2.0 * std::f64::consts::PI * 1000.0 * n as f64 / 11000.0).sin())
            .collect();
        let lpc = lpc_coefficients(&frame, 10).unwrap();
        let peaks = envelope_peaks(&lpc, 11000);
        assert!(
            peaks.iter().any(|p| (p - 1000.0).abs() < 100.0),
            "no peak near 1 kHz in {:?}",
            peaks
        );
    }
}
