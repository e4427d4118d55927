//! WAV decoding for acoustic analysis.
//!
//! Decodes to mono float samples in [-1, 1] at the file's native rate.
//! Analyses that need a specific rate resample with linear interpolation.

use crate::error::{Result, SyllexError};
use std::path::Path;

/// Load a WAV file as normalized mono samples plus its sample rate.
pub fn load_wav(path: &Path) -> Result<(Vec<f64>, u32)> {
    let reader = hound::WavReader::open(path).map_err(|e| SyllexError::AudioRead {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let spec = reader.spec();
    let channels = spec.channels as usize;

    let interleaved: Vec<f64> = match spec.sample_format {
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f64 / scale))
                .collect::<std::result::Result<_, _>>()
                .map_err(|e| SyllexError::AudioRead {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?
        }
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(|v| v as f64))
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| SyllexError::AudioRead {
                path: path.display().to_string(),
                message: e.to_string(),
            })?,
    };

    let samples = if channels <= 1 {
        interleaved
    } else {
        interleaved
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f64>() / channels as f64)
            .collect()
    };

    Ok((samples, spec.sample_rate))
}

/// Simple linear interpolation resampling.
pub fn resample(samples: &[f64], from_rate: u32, to_rate: u32) -> Vec<f64> {
    if from_rate == to_rate || samples.is_empty() {
        return samples.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let output_len = (samples.len() as f64 / ratio).ceil() as usize;

    (0..output_len)
        .map(|i| {
            let source_pos = i as f64 * ratio;
            let source_idx = source_pos.floor() as usize;
            let fraction = source_pos - source_idx as f64;

            if source_idx + 1 >= samples.len() {
                samples[samples.len() - 1]
            } else {
                let left = samples[source_idx];
                let right = samples[source_idx + 1];
                left + (right - left) * fraction
            }
        })
        .collect()
}
