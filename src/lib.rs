#![warn(missing_docs)]

//! # silence-trim: cut silent passages out of audio recordings
//!
//! Decodes an audio file, detects silence with 10ms RMS windows on the first
//! channel, keeps the non-silent ranges of every channel and re-encodes the
//! result as canonical 16-bit PCM WAV.
//!
//! ## Quick Start
//!
//! ```ignore
//! use silence_trim::{AudioBuffer, TrimConfig};
//! use silence_trim::encoder::encode_wav;
//!
//! let buffer = AudioBuffer::new(8000, vec![samples])?;
//! let (outcome, _progress) = silence_trim::process(buffer, &TrimConfig::default());
//! let wav: Vec<u8> = encode_wav(&outcome.buffer);
//! ```

// Declare modules
/// Core audio types and structures
pub mod core;
/// Error types for audio operations
pub mod error;
/// Trimming parameters
pub mod config;
/// Progress reporting
pub mod progress;
/// Silence analysis
pub mod analysis;
/// Audio decoder implementations
pub mod decoder;
/// Audio encoder implementations
pub mod encoder;
/// Silence trimming pipeline
pub mod processor;

// Export public types
pub use config::TrimConfig;
pub use self::core::{AudioBuffer, AudioMetadata};
pub use error::{AudioError, AudioResult};
pub use processor::{
    ProcessingStats, Segment, SilenceTrimmer, TrimOutcome, process, process_with_progress,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
