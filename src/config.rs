//! Configuration parameters for feature extraction and the service boundary

/// Fixed feature vector length
///
/// 13 MFCC means + 13 MFCC standard deviations + 13 delta-MFCC means +
/// 13 delta-MFCC standard deviations + spectral centroid + spectral
/// roll-off + zero-crossing rate + RMS energy.
///
/// The vector is interpreted positionally by the scaler and all three
/// classifiers; any reordering invalidates every fitted artifact.
pub const FEATURE_LEN: usize = 56;

/// Language tags accepted at the service boundary.
///
/// The detection core treats the tag as opaque: it is logged and otherwise
/// has no effect on feature extraction or the decision.
pub const SUPPORTED_LANGUAGES: [&str; 5] = ["en", "hi", "ta", "te", "ml"];

/// Check a language tag against the supported set
///
/// Intended for the request boundary; the core itself never rejects a tag.
pub fn is_supported_language(tag: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&tag)
}

/// Feature extraction configuration
///
/// The defaults are frozen by contract: the scaler and the three
/// classifiers were fitted against the feature distribution these
/// parameters produce, so the training and inference paths must use
/// identical values. Changing any of them invalidates all fitted
/// artifacts.
#[derive(Debug, Clone)]
pub struct FeatureConfig {
    /// Working sample rate in Hz (default: 16000)
    /// All input audio is resampled to this rate before analysis.
    pub sample_rate: u32,

    /// Frame size for STFT and time-domain framing (default: 2048)
    pub frame_size: usize,

    /// Hop size between frames (default: 512)
    pub hop_size: usize,

    /// Number of mel filterbank bands (default: 40)
    pub n_mels: usize,

    /// Number of MFCCs kept per frame (default: 13)
    pub n_mfcc: usize,

    /// Spectral roll-off fraction (default: 0.85)
    /// Fraction of total spectral energy below the roll-off frequency.
    pub rolloff_fraction: f32,

    /// Minimum analyzable duration in seconds (default: 0.5)
    /// Shorter clips fail validation before any feature is computed.
    pub min_duration_secs: f32,

    /// Near-silence floor on mean frame RMS (default: 1e-4)
    /// Quieter clips fail validation before any feature is computed.
    pub min_rms_energy: f32,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            sample_rate: 16_000,
            frame_size: 2048,
            hop_size: 512,
            n_mels: 40,
            n_mfcc: 13,
            rolloff_fraction: 0.85,
            min_duration_secs: 0.5,
            min_rms_energy: 1e-4,
        }
    }
}

impl FeatureConfig {
    /// Minimum sample count implied by `min_duration_secs`
    pub fn min_samples(&self) -> usize {
        (self.sample_rate as f32 * self.min_duration_secs) as usize
    }

    /// Feature vector length this configuration produces
    ///
    /// Equals [`FEATURE_LEN`] for the default configuration.
    pub fn feature_len(&self) -> usize {
        4 * self.n_mfcc + 4
    }
}
