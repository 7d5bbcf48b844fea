//! Audio decoding using Symphonia
//!
//! Decodes WAV and MP3 containers to planar f32 PCM, then hands off to
//! the channel mixer and resampler so the rest of the pipeline only ever
//! sees mono samples at the configured rate.

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::{AudioBufferRef, Signal};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::conv::FromSample;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::config::FeatureConfig;
use crate::error::DetectError;
use crate::preprocessing::channel_mixer::planar_to_mono;

fn append_planar<T>(
    channels: &mut Vec<Vec<f32>>,
    buf: &symphonia::core::audio::AudioBuffer<T>,
) where
    T: symphonia::core::sample::Sample,
    f32: FromSample<T>,
{
    let n_channels = buf.spec().channels.count();
    if channels.is_empty() {
        channels.resize(n_channels, Vec::new());
    }
    for (ch, plane) in channels.iter_mut().enumerate().take(n_channels) {
        plane.extend(buf.chan(ch).iter().map(|&v| f32::from_sample(v)));
    }
}

/// Decode an audio file to planar f32 PCM
///
/// # Arguments
///
/// * `path` - Path to an audio file (WAV or MP3)
///
/// # Returns
///
/// Tuple of (per-channel samples, source sample rate)
///
/// # Errors
///
/// Returns `DetectError::Decode` for unreadable files, unsupported
/// codecs and corrupt streams.
pub fn decode_audio(path: &Path) -> Result<(Vec<Vec<f32>>, u32), DetectError> {
    log::debug!("Decoding audio file: {}", path.display());

    let src = File::open(path)
        .map_err(|e| DetectError::Decode(format!("cannot open {}: {}", path.display(), e)))?;
    let mss = MediaSourceStream::new(Box::new(src), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| DetectError::Decode(format!("unrecognized audio format: {}", e)))?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| DetectError::Decode("no decodable audio track found".to_string()))?;
    let track_id = track.id;

    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| DetectError::Decode("audio track has no sample rate".to_string()))?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| DetectError::Decode(format!("unsupported codec: {}", e)))?;

    let mut channels: Vec<Vec<f32>> = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(symphonia::core::errors::Error::ResetRequired) => break,
            Err(e) => return Err(DetectError::Decode(format!("packet read failed: {}", e))),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            // Skip over recoverable per-packet errors.
            Err(symphonia::core::errors::Error::DecodeError(e)) => {
                log::warn!("Skipping undecodable packet: {}", e);
                continue;
            }
            Err(e) => return Err(DetectError::Decode(format!("decode failed: {}", e))),
        };

        match decoded {
            AudioBufferRef::F32(buf) => append_planar(&mut channels, buf.as_ref()),
            AudioBufferRef::F64(buf) => append_planar(&mut channels, buf.as_ref()),
            AudioBufferRef::S8(buf) => append_planar(&mut channels, buf.as_ref()),
            AudioBufferRef::S16(buf) => append_planar(&mut channels, buf.as_ref()),
            AudioBufferRef::S24(buf) => append_planar(&mut channels, buf.as_ref()),
            AudioBufferRef::S32(buf) => append_planar(&mut channels, buf.as_ref()),
            AudioBufferRef::U8(buf) => append_planar(&mut channels, buf.as_ref()),
            AudioBufferRef::U16(buf) => append_planar(&mut channels, buf.as_ref()),
            AudioBufferRef::U24(buf) => append_planar(&mut channels, buf.as_ref()),
            AudioBufferRef::U32(buf) => append_planar(&mut channels, buf.as_ref()),
        }
    }

    if channels.is_empty() || channels[0].is_empty() {
        return Err(DetectError::Decode(
            "audio stream contained no samples".to_string(),
        ));
    }

    log::debug!(
        "Decoded {} channels of {} samples at {} Hz",
        channels.len(),
        channels[0].len(),
        sample_rate
    );

    Ok((channels, sample_rate))
}

/// Load an audio file as mono samples at the pipeline rate
///
/// Decodes, downmixes to mono and resamples to `config.sample_rate`.
/// Validation of duration and energy happens later, inside feature
/// extraction.
///
/// # Errors
///
/// Returns `DetectError::Decode` for unreadable or corrupt input and
/// `DetectError::Internal` if resampling fails.
pub fn load_waveform(path: &Path, config: &FeatureConfig) -> Result<Vec<f32>, DetectError> {
    let (channels, source_rate) = decode_audio(path)?;
    let mono = planar_to_mono(&channels)?;
    super::resample::resample_mono(&mono, source_rate, config.sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_decode_error() {
        let err = decode_audio(Path::new("/nonexistent/audio.wav")).unwrap_err();
        assert!(matches!(err, DetectError::Decode(_)));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_garbage_bytes_are_decode_error() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("voiceprobe-garbage-{}.wav", std::process::id()));
        std::fs::write(&path, b"this is not an audio file at all").unwrap();

        let err = decode_audio(&path).unwrap_err();
        assert!(matches!(err, DetectError::Decode(_)));

        std::fs::remove_file(&path).ok();
    }
}
