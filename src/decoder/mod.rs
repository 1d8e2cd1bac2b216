//! Audio decoder implementations
//!
//! Decoding sits outside the trimming core: it only has to produce a valid
//! [`AudioBuffer`].

/// Symphonia-backed decoding of any supported container
pub mod symphonia;

pub use self::symphonia::SymphoniaDecoder;

use crate::core::{AudioBuffer, AudioMetadata};
use crate::error::AudioResult;
use std::path::Path;

/// Trait for audio decoders
pub trait Decoder: Send {
    /// Stream information known before decoding
    fn metadata(&self) -> &AudioMetadata;

    /// Decode the whole stream into a planar buffer
    fn decode(&mut self) -> AudioResult<AudioBuffer>;
}

/// Create a decoder from a file path
pub fn from_file<P: AsRef<Path>>(path: P) -> AudioResult<Box<dyn Decoder>> {
    SymphoniaDecoder::from_file(path).map(|d| Box::new(d) as Box<dyn Decoder>)
}

/// Create a decoder from encoded bytes with an optional extension hint
pub fn from_bytes(bytes: Vec<u8>, extension: Option<&str>) -> AudioResult<Box<dyn Decoder>> {
    SymphoniaDecoder::from_bytes(bytes, extension).map(|d| Box::new(d) as Box<dyn Decoder>)
}
