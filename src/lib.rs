//! # Voiceprobe
//!
//! An acoustic analysis engine that decides whether a voice recording was
//! produced by a human speaker or generated synthetically.
//!
//! ## Features
//!
//! - **Feature Extraction**: 56-dimensional acoustic fingerprint (MFCC
//!   statistics, delta-MFCC statistics, spectral centroid, roll-off,
//!   zero-crossing rate, RMS energy)
//! - **Calibrated Ensemble**: Logistic regression, RBF SVM and a bagged
//!   tree ensemble, each with sigmoid calibration, averaged into one score
//! - **Three-way Verdict**: AI_GENERATED, HUMAN or UNCERTAIN with a fixed
//!   confidence banding
//! - **Audio I/O**: WAV and MP3 decoding with automatic downmix and
//!   resampling to the pipeline rate
//!
//! ## Quick Start
//!
//! ```no_run
//! use voiceprobe::{detect_voice, FeatureConfig, VoiceDetector};
//!
//! let detector = VoiceDetector::load(std::path::Path::new("models"))?;
//! let decision = detect_voice(
//!     std::path::Path::new("sample.wav"),
//!     Some("en"),
//!     &detector,
//!     &FeatureConfig::default(),
//! )?;
//!
//! println!("{}: {:.3}", decision.classification.as_str(), decision.confidence);
//! # Ok::<(), voiceprobe::DetectError>(())
//! ```
//!
//! ## Architecture
//!
//! The detection pipeline follows this flow:
//!
//! ```text
//! Audio Input → Decode/Resample → Validation → Feature Extraction
//!             → Scaling → Classifier Ensemble → Decision
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod io;
pub mod ml;
pub mod preprocessing;
pub mod training;

// Re-export main types
pub use analysis::result::{Classification, Decision};
pub use config::{FeatureConfig, FEATURE_LEN, SUPPORTED_LANGUAGES};
pub use error::DetectError;
pub use features::extract_features;
pub use ml::ensemble::VoiceDetector;

/// Run detection on already-decoded mono samples
///
/// # Arguments
///
/// * `samples` - Mono audio samples, normalized to [-1.0, 1.0]
/// * `sample_rate` - Sample rate of `samples` in Hz; must match the
///   configured pipeline rate
/// * `language` - Optional language tag; recorded for logging only, the
///   acoustic pipeline is language independent
/// * `detector` - Loaded model artifacts
/// * `config` - Feature extraction configuration
///
/// # Returns
///
/// A [`Decision`] with classification, confidence and explanation
///
/// # Errors
///
/// Returns `DetectError::TooShort` or `DetectError::NearSilence` for
/// rejected input and `DetectError::Internal` for model failures or a
/// sample rate mismatch.
pub fn detect_samples(
    samples: &[f32],
    sample_rate: u32,
    language: Option<&str>,
    detector: &VoiceDetector,
    config: &FeatureConfig,
) -> Result<Decision, DetectError> {
    use std::time::Instant;
    let start_time = Instant::now();

    if sample_rate != config.sample_rate {
        return Err(DetectError::Internal(format!(
            "samples are at {} Hz but the pipeline expects {} Hz",
            sample_rate, config.sample_rate
        )));
    }

    log::debug!(
        "Starting detection: {} samples at {} Hz (language: {})",
        samples.len(),
        sample_rate,
        language.unwrap_or("unspecified")
    );

    let features = extract_features(samples, config)?;
    let probabilities = detector.predict_probabilities(&features)?;
    let decision = analysis::decision::aggregate(&probabilities)?;

    log::debug!(
        "Detection finished in {:.1} ms: {} ({:.3})",
        start_time.elapsed().as_secs_f32() * 1000.0,
        decision.classification.as_str(),
        decision.confidence
    );

    Ok(decision)
}

/// Run detection on an audio file
///
/// Decodes the file, downmixes to mono, resamples to the pipeline rate
/// and runs [`detect_samples`].
///
/// # Errors
///
/// Returns `DetectError::Decode` for unreadable or corrupt files on top
/// of the [`detect_samples`] error cases.
pub fn detect_voice(
    path: &std::path::Path,
    language: Option<&str>,
    detector: &VoiceDetector,
    config: &FeatureConfig,
) -> Result<Decision, DetectError> {
    let samples = io::decoder::load_waveform(path, config)?;
    detect_samples(&samples, config.sample_rate, language, detector, config)
}
