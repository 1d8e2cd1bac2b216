//! Signal analysis used to decide what to trim

/// RMS window classification
pub mod silence;

pub use silence::{classify_windows, rms, window_size};
