//! Channel mixing utilities (multichannel to mono conversion)

use crate::error::DetectError;

/// Convert stereo to mono by averaging the channels
///
/// # Errors
///
/// Returns `DetectError::Decode` if the channels differ in length.
pub fn stereo_to_mono(left: &[f32], right: &[f32]) -> Result<Vec<f32>, DetectError> {
    if left.len() != right.len() {
        return Err(DetectError::Decode(format!(
            "channel length mismatch: {} vs {}",
            left.len(),
            right.len()
        )));
    }

    Ok(left
        .iter()
        .zip(right.iter())
        .map(|(&l, &r)| (l + r) * 0.5)
        .collect())
}

/// Average an arbitrary number of planar channels into one mono signal
///
/// # Errors
///
/// Returns `DetectError::Decode` if no channels are given or the channels
/// differ in length.
pub fn planar_to_mono(channels: &[Vec<f32>]) -> Result<Vec<f32>, DetectError> {
    let first = channels
        .first()
        .ok_or_else(|| DetectError::Decode("no audio channels".to_string()))?;

    if channels.len() == 1 {
        return Ok(first.clone());
    }

    let len = first.len();
    if channels.iter().any(|c| c.len() != len) {
        return Err(DetectError::Decode(
            "channel length mismatch".to_string(),
        ));
    }

    let scale = 1.0 / channels.len() as f32;
    let mut mono = vec![0.0f32; len];
    for channel in channels {
        for (out, &sample) in mono.iter_mut().zip(channel.iter()) {
            *out += sample * scale;
        }
    }

    Ok(mono)
}
