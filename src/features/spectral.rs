//! Coarse spectral-shape and energy descriptors
//!
//! Per-frame spectral centroid, spectral roll-off, zero-crossing rate and
//! RMS energy. The spectral descriptors read the shared magnitude
//! spectrogram; ZCR and RMS frame the time-domain signal with the same
//! frame/hop convention so every per-frame series aligns.

use crate::features::stft::{num_frames, Spectrogram};

/// Numerical stability epsilon
const EPSILON: f32 = 1e-10;

/// Per-frame spectral centroid in Hz
///
/// Magnitude-weighted center of mass of each frame's spectrum. Frames with
/// no spectral energy report 0.0.
pub fn spectral_centroid(spec: &Spectrogram) -> Vec<f32> {
    spec.magnitudes
        .iter()
        .map(|frame| {
            let total: f32 = frame.iter().sum();
            if total <= EPSILON {
                return 0.0;
            }
            let weighted: f32 = frame
                .iter()
                .enumerate()
                .map(|(k, &mag)| spec.bin_frequency(k) * mag)
                .sum();
            weighted / total
        })
        .collect()
}

/// Per-frame spectral roll-off in Hz
///
/// The lowest frequency below which `fraction` of the frame's total
/// magnitude is contained. Frames with no spectral energy report 0.0.
pub fn spectral_rolloff(spec: &Spectrogram, fraction: f32) -> Vec<f32> {
    spec.magnitudes
        .iter()
        .map(|frame| {
            let total: f32 = frame.iter().sum();
            if total <= EPSILON {
                return 0.0;
            }
            let threshold = fraction * total;
            let mut cumulative = 0.0f32;
            for (k, &mag) in frame.iter().enumerate() {
                cumulative += mag;
                if cumulative >= threshold {
                    return spec.bin_frequency(k);
                }
            }
            spec.bin_frequency(frame.len() - 1)
        })
        .collect()
}

/// Per-frame zero-crossing rate
///
/// Fraction of adjacent sample pairs in each frame whose signs differ.
/// Zero samples count as non-negative.
pub fn zero_crossing_rate(samples: &[f32], frame_size: usize, hop_size: usize) -> Vec<f32> {
    let frames = num_frames(samples.len(), frame_size, hop_size);
    (0..frames)
        .map(|i| {
            let start = i * hop_size;
            let frame = &samples[start..start + frame_size];
            let crossings = frame
                .windows(2)
                .filter(|pair| (pair[0] < 0.0) != (pair[1] < 0.0))
                .count();
            crossings as f32 / frame_size as f32
        })
        .collect()
}

/// Per-frame RMS energy
pub fn rms_energy(samples: &[f32], frame_size: usize, hop_size: usize) -> Vec<f32> {
    let frames = num_frames(samples.len(), frame_size, hop_size);
    (0..frames)
        .map(|i| {
            let start = i * hop_size;
            let frame = &samples[start..start + frame_size];
            let sum_sq: f32 = frame.iter().map(|&x| x * x).sum();
            (sum_sq / frame_size as f32).sqrt()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::stft::compute_spectrogram;

    fn sine(freq: f32, duration_secs: f32, sample_rate: u32) -> Vec<f32> {
        let n = (duration_secs * sample_rate as f32) as usize;
        (0..n)
            .map(|i| {
                (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate as f32).sin() * 0.5
            })
            .collect()
    }

    #[test]
    fn test_centroid_tracks_sine_frequency() {
        let samples = sine(1000.0, 1.0, 16000);
        let spec = compute_spectrogram(&samples, 16000, 2048, 512).unwrap();
        let centroid = spectral_centroid(&spec);

        assert_eq!(centroid.len(), spec.num_frames());
        let mean: f32 = centroid.iter().sum::<f32>() / centroid.len() as f32;
        // Window leakage spreads some mass to neighboring bins; the
        // centroid still lands near the tone.
        assert!(
            (mean - 1000.0).abs() < 150.0,
            "mean centroid {} Hz, expected ~1000 Hz",
            mean
        );
    }

    #[test]
    fn test_centroid_of_silence_is_zero() {
        let samples = vec![0.0f32; 16000];
        let spec = compute_spectrogram(&samples, 16000, 2048, 512).unwrap();
        assert!(spectral_centroid(&spec).iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_rolloff_tracks_sine_frequency() {
        let samples = sine(2000.0, 1.0, 16000);
        let spec = compute_spectrogram(&samples, 16000, 2048, 512).unwrap();
        let rolloff = spectral_rolloff(&spec, 0.85);

        let mean: f32 = rolloff.iter().sum::<f32>() / rolloff.len() as f32;
        assert!(
            (mean - 2000.0).abs() < 150.0,
            "mean roll-off {} Hz, expected ~2000 Hz",
            mean
        );
    }

    #[test]
    fn test_rolloff_monotonic_in_fraction() {
        let samples = sine(2000.0, 1.0, 16000);
        let spec = compute_spectrogram(&samples, 16000, 2048, 512).unwrap();
        let low = spectral_rolloff(&spec, 0.5);
        let high = spectral_rolloff(&spec, 0.95);
        for (l, h) in low.iter().zip(high.iter()) {
            assert!(l <= h);
        }
    }

    #[test]
    fn test_zcr_of_sine() {
        // A sine at f Hz crosses zero 2f times per second, so the per-frame
        // rate is ~2f / sample_rate.
        let samples = sine(1000.0, 1.0, 16000);
        let zcr = zero_crossing_rate(&samples, 2048, 512);

        assert_eq!(zcr.len(), num_frames(samples.len(), 2048, 512));
        let mean: f32 = zcr.iter().sum::<f32>() / zcr.len() as f32;
        assert!(
            (mean - 0.125).abs() < 0.02,
            "mean ZCR {}, expected ~0.125",
            mean
        );
    }

    #[test]
    fn test_zcr_of_constant_signal_is_zero() {
        let samples = vec![0.3f32; 16000];
        let zcr = zero_crossing_rate(&samples, 2048, 512);
        assert!(zcr.iter().all(|&z| z == 0.0));
    }

    #[test]
    fn test_rms_of_constant_signal() {
        let samples = vec![0.5f32; 16000];
        let rms = rms_energy(&samples, 2048, 512);
        assert!(!rms.is_empty());
        assert!(rms.iter().all(|&r| (r - 0.5).abs() < 1e-5));
    }

    #[test]
    fn test_rms_of_sine() {
        // RMS of a sine of amplitude A is A / sqrt(2).
        let samples = sine(440.0, 1.0, 16000);
        let rms = rms_energy(&samples, 2048, 512);
        let expected = 0.5 / 2.0f32.sqrt();
        let mean: f32 = rms.iter().sum::<f32>() / rms.len() as f32;
        assert!(
            (mean - expected).abs() < 0.01,
            "mean RMS {}, expected ~{}",
            mean,
            expected
        );
    }

    #[test]
    fn test_series_align_across_features() {
        let samples = sine(440.0, 1.3, 16000);
        let spec = compute_spectrogram(&samples, 16000, 2048, 512).unwrap();
        let frames = spec.num_frames();

        assert_eq!(spectral_centroid(&spec).len(), frames);
        assert_eq!(spectral_rolloff(&spec, 0.85).len(), frames);
        assert_eq!(zero_crossing_rate(&samples, 2048, 512).len(), frames);
        assert_eq!(rms_energy(&samples, 2048, 512).len(), frames);
    }
}
