//! Sample rate conversion
//!
//! Mono resampling with rubato's chunked FFT resampler. Decoded audio is
//! brought to the pipeline rate before validation so the duration and
//! silence guards see the same timebase the feature extractor uses.

use rubato::{FftFixedIn, Resampler};

use crate::error::DetectError;

const CHUNK: usize = 1024;
const SUB_CHUNKS: usize = 2;

/// Resample a mono signal to a target rate
///
/// Returns the input unchanged when the rates already match. The last
/// partial chunk is zero padded, so the output may carry a few extra
/// near-zero samples at the tail; at 16 kHz this is well under the hop
/// size and does not shift frame boundaries meaningfully.
///
/// # Arguments
///
/// * `input` - Mono samples at `sr_in`
/// * `sr_in` - Source sample rate in Hz
/// * `sr_out` - Target sample rate in Hz
///
/// # Errors
///
/// Returns `DetectError::Internal` if either rate is zero or the
/// resampler rejects the configuration.
pub fn resample_mono(input: &[f32], sr_in: u32, sr_out: u32) -> Result<Vec<f32>, DetectError> {
    if sr_in == 0 || sr_out == 0 {
        return Err(DetectError::Internal(format!(
            "invalid resample rates: {} -> {}",
            sr_in, sr_out
        )));
    }
    if sr_in == sr_out {
        return Ok(input.to_vec());
    }

    log::debug!(
        "Resampling {} samples from {} Hz to {} Hz",
        input.len(),
        sr_in,
        sr_out
    );

    let mut resampler = FftFixedIn::<f32>::new(sr_in as usize, sr_out as usize, CHUNK, SUB_CHUNKS, 1)
        .map_err(|e| DetectError::Internal(format!("resampler setup failed: {}", e)))?;

    let expected_len = (input.len() as f64 * sr_out as f64 / sr_in as f64).ceil() as usize;
    let mut out = Vec::with_capacity(expected_len + CHUNK);

    let mut pos = 0;
    while pos < input.len() {
        let end = (pos + CHUNK).min(input.len());
        let chunk_len = end - pos;

        let mut input_chunk = vec![0.0; CHUNK];
        input_chunk[..chunk_len].copy_from_slice(&input[pos..end]);

        let block = vec![input_chunk];
        let frames = resampler
            .process(&block, None)
            .map_err(|e| DetectError::Internal(format!("resampling failed: {}", e)))?;
        out.extend_from_slice(&frames[0]);

        pos += chunk_len;

        if chunk_len < CHUNK {
            break;
        }
    }

    Ok(out)
}
