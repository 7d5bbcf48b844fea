//! Acoustic feature extraction
//!
//! Maps a validated mono waveform to the fixed-order 56-element feature
//! vector shared by the training and inference paths:
//!
//! 1. mean of 13 MFCCs (13 values)
//! 2. standard deviation of 13 MFCCs (13 values)
//! 3. mean of delta-MFCCs (13 values)
//! 4. standard deviation of delta-MFCCs (13 values)
//! 5. mean spectral centroid (1 value)
//! 6. mean spectral roll-off (1 value)
//! 7. mean zero-crossing rate (1 value)
//! 8. mean RMS energy (1 value)
//!
//! The order is part of the contract: the scaler and all three classifiers
//! were fitted against vectors in exactly this layout. There is exactly one
//! implementation of the transform, called by both paths with the same
//! frozen configuration, so the two feature spaces cannot drift apart.

pub mod mfcc;
pub mod spectral;
pub mod stft;

use crate::config::FeatureConfig;
use crate::error::DetectError;
use crate::preprocessing::validation::validate_waveform;

use mfcc::{compute_deltas, compute_mfcc};
use spectral::{rms_energy, spectral_centroid, spectral_rolloff, zero_crossing_rate};
use stft::compute_spectrogram;

/// Mean of a per-frame series, accumulated in f64 and emitted as f32
fn series_mean(series: &[f32]) -> f32 {
    if series.is_empty() {
        return 0.0;
    }
    let sum: f64 = series.iter().map(|&x| x as f64).sum();
    (sum / series.len() as f64) as f32
}

/// Mean of one coefficient column across frames
fn column_mean(matrix: &[Vec<f32>], column: usize) -> f32 {
    if matrix.is_empty() {
        return 0.0;
    }
    let sum: f64 = matrix.iter().map(|row| row[column] as f64).sum();
    (sum / matrix.len() as f64) as f32
}

/// Population standard deviation of one coefficient column across frames
fn column_std(matrix: &[Vec<f32>], column: usize) -> f32 {
    if matrix.is_empty() {
        return 0.0;
    }
    let n = matrix.len() as f64;
    let mean: f64 = matrix.iter().map(|row| row[column] as f64).sum::<f64>() / n;
    let variance: f64 = matrix
        .iter()
        .map(|row| {
            let d = row[column] as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    variance.sqrt() as f32
}

/// Extract the fixed-order feature vector from a mono waveform
///
/// The waveform must already be at `config.sample_rate`. Validation (the
/// too-short and near-silence guards) runs here, before any FFT work, so
/// both paths apply identical edge-case policy.
///
/// # Arguments
///
/// * `samples` - Mono audio samples, normalized to [-1.0, 1.0]
/// * `config` - Frozen analysis parameters
///
/// # Returns
///
/// A feature vector of `config.feature_len()` elements (56 for the default
/// configuration), in the contract order above.
///
/// # Errors
///
/// * `DetectError::TooShort` / `DetectError::NearSilence` for clips that
///   fail validation
/// * `DetectError::Internal` for misconfiguration or numeric failure
pub fn extract_features(samples: &[f32], config: &FeatureConfig) -> Result<Vec<f32>, DetectError> {
    validate_waveform(samples, config)?;

    log::debug!(
        "Extracting features: {} samples at {} Hz",
        samples.len(),
        config.sample_rate
    );

    let spec = compute_spectrogram(
        samples,
        config.sample_rate,
        config.frame_size,
        config.hop_size,
    )?;

    let mfcc = compute_mfcc(&spec, config.n_mels, config.n_mfcc)?;
    let deltas = compute_deltas(&mfcc);

    let centroid = spectral_centroid(&spec);
    let rolloff = spectral_rolloff(&spec, config.rolloff_fraction);
    let zcr = zero_crossing_rate(samples, config.frame_size, config.hop_size);
    let rms = rms_energy(samples, config.frame_size, config.hop_size);

    let mut features = Vec::with_capacity(config.feature_len());
    for k in 0..config.n_mfcc {
        features.push(column_mean(&mfcc, k));
    }
    for k in 0..config.n_mfcc {
        features.push(column_std(&mfcc, k));
    }
    for k in 0..config.n_mfcc {
        features.push(column_mean(&deltas, k));
    }
    for k in 0..config.n_mfcc {
        features.push(column_std(&deltas, k));
    }
    features.push(series_mean(&centroid));
    features.push(series_mean(&rolloff));
    features.push(series_mean(&zcr));
    features.push(series_mean(&rms));

    debug_assert_eq!(features.len(), config.feature_len());

    if features.iter().any(|f| !f.is_finite()) {
        return Err(DetectError::Internal(
            "non-finite value in feature vector".to_string(),
        ));
    }

    Ok(features)
}
