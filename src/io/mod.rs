//! Audio I/O modules
//!
//! Decoding with Symphonia and sample rate conversion with rubato.

pub mod decoder;
pub mod resample;
