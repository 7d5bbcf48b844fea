//! Audio preprocessing modules
//!
//! Utilities that run between decoding and feature extraction:
//! - Channel mixing (multichannel to mono)
//! - Validation guard (too-short / near-silence rejection)

pub mod channel_mixer;
pub mod validation;
