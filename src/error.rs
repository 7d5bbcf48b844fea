//! Error types for the voice detection core

use std::fmt;

/// Errors that can occur during voice detection
#[derive(Debug, Clone, PartialEq)]
pub enum DetectError {
    /// Audio is shorter than the minimum analyzable duration
    TooShort {
        /// Number of samples received
        samples: usize,
        /// Minimum number of samples required
        required: usize,
    },

    /// Audio carries no meaningful signal energy
    NearSilence {
        /// Measured mean frame RMS
        rms: f32,
    },

    /// Malformed or undecodable audio input
    Decode(String),

    /// Unexpected failure in feature computation, scaling, or classification
    Internal(String),
}

impl DetectError {
    /// True for input-caused errors the caller can correct by supplying
    /// better audio. The boundary surfaces these as client errors and
    /// everything else as an opaque server-side failure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DetectError::TooShort { .. } | DetectError::NearSilence { .. } | DetectError::Decode(_)
        )
    }
}

impl fmt::Display for DetectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectError::TooShort { samples, required } => write!(
                f,
                "Audio too short for reliable analysis ({} samples, {} required)",
                samples, required
            ),
            DetectError::NearSilence { rms } => write!(
                f,
                "Audio contains little or no speech (mean frame RMS {:.2e})",
                rms
            ),
            DetectError::Decode(msg) => write!(f, "Decoding error: {}", msg),
            DetectError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DetectError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_split() {
        assert!(DetectError::TooShort {
            samples: 100,
            required: 8000
        }
        .is_client_error());
        assert!(DetectError::NearSilence { rms: 1e-6 }.is_client_error());
        assert!(DetectError::Decode("bad header".to_string()).is_client_error());
        assert!(!DetectError::Internal("corrupted artifact".to_string()).is_client_error());
    }

    #[test]
    fn test_display_messages() {
        let err = DetectError::TooShort {
            samples: 4800,
            required: 8000,
        };
        assert!(err.to_string().contains("too short for reliable analysis"));

        let err = DetectError::NearSilence { rms: 5e-5 };
        assert!(err.to_string().contains("little or no speech"));
    }
}
