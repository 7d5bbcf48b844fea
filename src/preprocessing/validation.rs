//! Waveform validation guard
//!
//! Two sequential checks run before any FFT work:
//!
//! 1. Too-short: fewer samples than half a second at the working rate.
//!    Below that there are too few analysis frames for stable statistics.
//! 2. Near-silence: mean per-frame RMS under a fixed floor. Near-zero
//!    energy is silence, not a speech signal worth classifying.
//!
//! Both checks are deterministic functions of the input waveform and are
//! surfaced to the boundary as client-correctable validation errors.

use crate::config::FeatureConfig;
use crate::error::DetectError;
use crate::features::spectral::rms_energy;

/// Validate a waveform before feature extraction
///
/// # Errors
///
/// * `DetectError::TooShort` if the clip is under the minimum duration
/// * `DetectError::NearSilence` if the mean frame RMS is below the floor
pub fn validate_waveform(samples: &[f32], config: &FeatureConfig) -> Result<(), DetectError> {
    let required = config.min_samples();
    if samples.len() < required {
        log::debug!(
            "Rejecting clip: {} samples, {} required",
            samples.len(),
            required
        );
        return Err(DetectError::TooShort {
            samples: samples.len(),
            required,
        });
    }

    let frames = rms_energy(samples, config.frame_size, config.hop_size);
    let mean_rms = if frames.is_empty() {
        // Only reachable with a non-default config whose minimum duration
        // is below one frame; fall back to whole-signal RMS.
        let sum_sq: f32 = samples.iter().map(|&x| x * x).sum();
        (sum_sq / samples.len() as f32).sqrt()
    } else {
        frames.iter().sum::<f32>() / frames.len() as f32
    };

    if mean_rms < config.min_rms_energy {
        log::debug!("Rejecting clip: mean frame RMS {:.2e}", mean_rms);
        return Err(DetectError::NearSilence { rms: mean_rms });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f32, duration_secs: f32, sample_rate: u32) -> Vec<f32> {
        let n = (duration_secs * sample_rate as f32) as usize;
        (0..n)
            .map(|i| {
                (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate as f32).sin() * 0.5
            })
            .collect()
    }

    #[test]
    fn test_rejects_short_clip() {
        let config = FeatureConfig::default();
        let samples = sine(440.0, 0.3, 16000);
        let err = validate_waveform(&samples, &config).unwrap_err();
        assert!(matches!(err, DetectError::TooShort { .. }));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_rejects_clip_one_sample_short() {
        let config = FeatureConfig::default();
        let samples = vec![0.5f32; config.min_samples() - 1];
        assert!(matches!(
            validate_waveform(&samples, &config),
            Err(DetectError::TooShort { .. })
        ));
    }

    #[test]
    fn test_accepts_clip_at_exact_minimum() {
        let config = FeatureConfig::default();
        let samples = vec![0.5f32; config.min_samples()];
        assert!(validate_waveform(&samples, &config).is_ok());
    }

    #[test]
    fn test_rejects_all_zero_clip() {
        let config = FeatureConfig::default();
        let samples = vec![0.0f32; 32000]; // 2 seconds of digital silence
        let err = validate_waveform(&samples, &config).unwrap_err();
        assert!(matches!(err, DetectError::NearSilence { .. }));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_rejects_near_silent_clip() {
        let config = FeatureConfig::default();
        let samples = vec![1e-5f32; 16000];
        assert!(matches!(
            validate_waveform(&samples, &config),
            Err(DetectError::NearSilence { .. })
        ));
    }

    #[test]
    fn test_accepts_normal_speech_levels() {
        let config = FeatureConfig::default();
        let samples = sine(220.0, 1.0, 16000);
        assert!(validate_waveform(&samples, &config).is_ok());
    }

    #[test]
    fn test_too_short_checked_before_silence() {
        // A short *and* silent clip must report the duration problem.
        let config = FeatureConfig::default();
        let samples = vec![0.0f32; 1000];
        assert!(matches!(
            validate_waveform(&samples, &config),
            Err(DetectError::TooShort { .. })
        ));
    }
}
