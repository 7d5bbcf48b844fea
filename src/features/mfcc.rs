//! Mel-frequency cepstral coefficients
//!
//! Per frame: power spectrum -> HTK mel filterbank -> log energies ->
//! DCT-II (orthonormal) -> first `n_mfcc` coefficients. Delta features are
//! the frame-to-frame first-order difference of the base coefficients.

use crate::error::DetectError;
use crate::features::stft::Spectrogram;

/// Floor applied to mel energies before the log, for numerical stability
const LOG_FLOOR: f32 = 1e-10;

fn hz_to_mel(hz: f32) -> f32 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

fn mel_to_hz(mel: f32) -> f32 {
    700.0 * (10.0f32.powf(mel / 2595.0) - 1.0)
}

/// Build a triangular mel filterbank (`n_mels x (frame_size / 2 + 1)`)
///
/// Filters are spaced evenly on the HTK mel scale between `fmin` and
/// `fmax`, with each triangle rising from the previous center and falling
/// to the next.
pub fn mel_filterbank(
    n_mels: usize,
    frame_size: usize,
    sample_rate: u32,
    fmin: f32,
    fmax: f32,
) -> Vec<Vec<f32>> {
    let num_bins = frame_size / 2 + 1;
    let mel_lo = hz_to_mel(fmin);
    let mel_hi = hz_to_mel(fmax);

    // n_mels + 2 edge points: left edge, n_mels centers, right edge.
    let edges: Vec<f32> = (0..n_mels + 2)
        .map(|i| mel_to_hz(mel_lo + (mel_hi - mel_lo) * i as f32 / (n_mels + 1) as f32))
        .collect();

    let bin_hz = sample_rate as f32 / frame_size as f32;
    let mut filterbank = Vec::with_capacity(n_mels);

    for m in 1..=n_mels {
        let left = edges[m - 1];
        let center = edges[m];
        let right = edges[m + 1];

        let mut weights = vec![0.0f32; num_bins];
        for (k, weight) in weights.iter_mut().enumerate() {
            let freq = k as f32 * bin_hz;
            if freq > left && freq < right {
                let rise = (freq - left) / (center - left);
                let fall = (right - freq) / (right - center);
                *weight = rise.min(fall).max(0.0);
            }
        }
        filterbank.push(weights);
    }

    filterbank
}

/// Orthonormal DCT-II matrix (`n_mfcc x n_mels`)
fn dct_matrix(n_mfcc: usize, n_mels: usize) -> Vec<Vec<f32>> {
    let mut matrix = Vec::with_capacity(n_mfcc);
    for k in 0..n_mfcc {
        let scale = if k == 0 {
            (1.0 / n_mels as f32).sqrt()
        } else {
            (2.0 / n_mels as f32).sqrt()
        };
        let row: Vec<f32> = (0..n_mels)
            .map(|m| {
                scale
                    * (std::f32::consts::PI / n_mels as f32 * (m as f32 + 0.5) * k as f32).cos()
            })
            .collect();
        matrix.push(row);
    }
    matrix
}

/// Compute per-frame MFCCs from a magnitude spectrogram
///
/// # Arguments
///
/// * `spec` - Magnitude spectrogram (bins are squared to power internally)
/// * `n_mels` - Number of mel filterbank bands
/// * `n_mfcc` - Number of coefficients kept per frame
///
/// # Returns
///
/// `frames x n_mfcc` coefficient matrix
pub fn compute_mfcc(
    spec: &Spectrogram,
    n_mels: usize,
    n_mfcc: usize,
) -> Result<Vec<Vec<f32>>, DetectError> {
    if n_mels == 0 || n_mfcc == 0 || n_mfcc > n_mels {
        return Err(DetectError::Internal(format!(
            "invalid MFCC configuration: n_mels={}, n_mfcc={}",
            n_mels, n_mfcc
        )));
    }

    let filterbank = mel_filterbank(
        n_mels,
        spec.frame_size,
        spec.sample_rate,
        0.0,
        spec.sample_rate as f32 / 2.0,
    );
    let dct = dct_matrix(n_mfcc, n_mels);

    let mut coefficients = Vec::with_capacity(spec.num_frames());

    for frame in &spec.magnitudes {
        // Mel energies over the power spectrum.
        let mut log_energies = Vec::with_capacity(n_mels);
        for weights in &filterbank {
            let energy: f32 = weights
                .iter()
                .zip(frame.iter())
                .map(|(&w, &mag)| w * mag * mag)
                .sum();
            log_energies.push(energy.max(LOG_FLOOR).ln());
        }

        let coeffs: Vec<f32> = dct
            .iter()
            .map(|row| {
                row.iter()
                    .zip(log_energies.iter())
                    .map(|(&d, &e)| d * e)
                    .sum()
            })
            .collect();
        coefficients.push(coeffs);
    }

    Ok(coefficients)
}

/// First-order temporal difference of per-frame coefficients
///
/// `delta[t][k] = mfcc[t][k] - mfcc[t-1][k]`, with the first frame's delta
/// fixed at zero so the delta matrix has the same frame count as its base.
pub fn compute_deltas(mfcc: &[Vec<f32>]) -> Vec<Vec<f32>> {
    if mfcc.is_empty() {
        return Vec::new();
    }

    let width = mfcc[0].len();
    let mut deltas = Vec::with_capacity(mfcc.len());
    deltas.push(vec![0.0f32; width]);

    for t in 1..mfcc.len() {
        let row: Vec<f32> = mfcc[t]
            .iter()
            .zip(mfcc[t - 1].iter())
            .map(|(&cur, &prev)| cur - prev)
            .collect();
        deltas.push(row);
    }

    deltas
}
