//! Short-time Fourier transform
//!
//! Frames the signal with a periodic Hann window and computes per-frame
//! magnitude spectra with rustfft. Every spectral feature in this crate is
//! derived from the same spectrogram so that frame boundaries line up
//! across features.

use crate::error::DetectError;
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Magnitude spectrogram of a mono signal
#[derive(Debug, Clone)]
pub struct Spectrogram {
    /// Per-frame magnitude spectra, `frames x (frame_size / 2 + 1)`
    pub magnitudes: Vec<Vec<f32>>,

    /// Frame size used for analysis
    pub frame_size: usize,

    /// Hop size between frames
    pub hop_size: usize,

    /// Sample rate of the analyzed signal in Hz
    pub sample_rate: u32,
}

impl Spectrogram {
    /// Number of analysis frames
    pub fn num_frames(&self) -> usize {
        self.magnitudes.len()
    }

    /// Number of frequency bins per frame (`frame_size / 2 + 1`)
    pub fn num_bins(&self) -> usize {
        self.frame_size / 2 + 1
    }

    /// Center frequency of a bin in Hz
    pub fn bin_frequency(&self, bin: usize) -> f32 {
        bin as f32 * self.sample_rate as f32 / self.frame_size as f32
    }
}

/// Number of full analysis frames a signal yields
///
/// Frames are not centered: the first frame starts at sample 0 and the
/// trailing remainder shorter than one frame is dropped. All framed
/// features (MFCC, ZCR, RMS) use this same count so their series align.
pub fn num_frames(len: usize, frame_size: usize, hop_size: usize) -> usize {
    if len < frame_size {
        0
    } else {
        (len - frame_size) / hop_size + 1
    }
}

/// Periodic Hann window of the given size
pub fn hann_window(size: usize) -> Vec<f32> {
    (0..size)
        .map(|n| {
            let phase = 2.0 * std::f32::consts::PI * n as f32 / size as f32;
            0.5 * (1.0 - phase.cos())
        })
        .collect()
}

/// Compute the magnitude spectrogram of a mono signal
///
/// # Arguments
///
/// * `samples` - Mono audio samples
/// * `sample_rate` - Sample rate in Hz
/// * `frame_size` - Analysis frame size
/// * `hop_size` - Hop between consecutive frames
///
/// # Errors
///
/// Returns `DetectError::Internal` on invalid framing parameters or when
/// the signal is shorter than a single frame; validation upstream
/// guarantees this cannot happen for the default configuration.
pub fn compute_spectrogram(
    samples: &[f32],
    sample_rate: u32,
    frame_size: usize,
    hop_size: usize,
) -> Result<Spectrogram, DetectError> {
    if frame_size == 0 || hop_size == 0 {
        return Err(DetectError::Internal(
            "frame size and hop size must be > 0".to_string(),
        ));
    }

    let frames = num_frames(samples.len(), frame_size, hop_size);
    if frames == 0 {
        return Err(DetectError::Internal(format!(
            "signal of {} samples is shorter than one analysis frame ({})",
            samples.len(),
            frame_size
        )));
    }

    log::debug!(
        "Computing spectrogram: {} samples, frame={}, hop={}, {} frames",
        samples.len(),
        frame_size,
        hop_size,
        frames
    );

    let window = hann_window(frame_size);
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(frame_size);

    let num_bins = frame_size / 2 + 1;
    let mut magnitudes = Vec::with_capacity(frames);
    let mut buffer = vec![Complex::new(0.0f32, 0.0f32); frame_size];

    for i in 0..frames {
        let start = i * hop_size;
        for (j, sample) in samples[start..start + frame_size].iter().enumerate() {
            buffer[j] = Complex::new(sample * window[j], 0.0);
        }

        fft.process(&mut buffer);

        let spectrum: Vec<f32> = buffer[..num_bins].iter().map(|c| c.norm()).collect();
        magnitudes.push(spectrum);
    }

    Ok(Spectrogram {
        magnitudes,
        frame_size,
        hop_size,
        sample_rate,
    })
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
    fn test_num_frames() {
        assert_eq!(num_frames(2048, 2048, 512), 1);
        assert_eq!(num_frames(2047, 2048, 512), 0);
        assert_eq!(num_frames(2048 + 512, 2048, 512), 2);
        assert_eq!(num_frames(16000, 2048, 512), 28);
    }

    #[test]
    fn test_hann_window_endpoints() {
        let window = hann_window(2048);
        assert_eq!(window.len(), 2048);
        // Periodic Hann: starts at zero, peaks at the midpoint.
        assert!(window[0].abs() < 1e-6);
        assert!((window[1024] - 1.0).abs() < 1e-6);
        assert!(window.iter().all(|&w| (0.0..=1.0).contains(&w)));
    }

    #[test]
    fn test_spectrogram_shape() {
        let samples = sine(440.0, 1.0, 16000);
        let spec = compute_spectrogram(&samples, 16000, 2048, 512).unwrap();

        assert_eq!(spec.num_frames(), num_frames(samples.len(), 2048, 512));
        assert_eq!(spec.num_bins(), 1025);
        assert!(spec.magnitudes.iter().all(|m| m.len() == 1025));
    }

    #[test]
    fn test_spectrogram_peak_at_sine_frequency() {
        let samples = sine(1000.0, 1.0, 16000);
        let spec = compute_spectrogram(&samples, 16000, 2048, 512).unwrap();

        // The strongest bin of a mid-signal frame should sit at ~1000 Hz.
        let frame = &spec.magnitudes[spec.num_frames() / 2];
        let peak_bin = frame
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        let peak_freq = spec.bin_frequency(peak_bin);
        assert!(
            (peak_freq - 1000.0).abs() < 20.0,
            "peak at {} Hz, expected ~1000 Hz",
            peak_freq
        );
    }

    #[test]
    fn test_spectrogram_too_short_signal() {
        let samples = vec![0.1f32; 1000];
        let result = compute_spectrogram(&samples, 16000, 2048, 512);
        assert!(matches!(result, Err(DetectError::Internal(_))));
    }

    #[test]
    fn test_spectrogram_invalid_parameters() {
        let samples = vec![0.1f32; 4096];
        assert!(compute_spectrogram(&samples, 16000, 0, 512).is_err());
        assert!(compute_spectrogram(&samples, 16000, 2048, 0).is_err());
    }

    #[test]
    fn test_spectrogram_deterministic() {
        let samples = sine(440.0, 1.0, 16000);
        let a = compute_spectrogram(&samples, 16000, 2048, 512).unwrap();
        let b = compute_spectrogram(&samples, 16000, 2048, 512).unwrap();
        assert_eq!(a.magnitudes, b.magnitudes);
    }
}
