use crate::error::{AudioError, AudioResult};
use std::ops::RangeInclusive;

/// Accepted range for the RMS silence threshold
pub const SILENCE_THRESHOLD_RANGE: RangeInclusive<f64> = 0.001..=0.05;
/// Accepted range for the minimum silence duration in seconds
pub const MIN_SILENCE_DURATION_RANGE: RangeInclusive<f64> = 0.1..=2.0;

/// Default RMS silence threshold
pub const DEFAULT_SILENCE_THRESHOLD: f64 = 0.015;
/// Default minimum silence duration in seconds
pub const DEFAULT_MIN_SILENCE_DURATION: f64 = 0.5;

/// Parameters for a silence trimming run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimConfig {
    silence_threshold: f64,
    min_silence_duration: f64,
    enforce_min_silence: bool,
}

impl TrimConfig {
    /// Create a validated configuration
    ///
    /// The minimum silence duration is recorded but does not affect
    /// segmentation unless [`TrimConfig::with_min_silence_enforced`] is set.
    pub fn new(silence_threshold: f64, min_silence_duration: f64) -> AudioResult<Self> {
        if !SILENCE_THRESHOLD_RANGE.contains(&silence_threshold) {
            return Err(AudioError::ConfigError(format!(
                "Silence threshold must be between {} and {}, got {}",
                SILENCE_THRESHOLD_RANGE.start(),
                SILENCE_THRESHOLD_RANGE.end(),
                silence_threshold
            )));
        }

        if !MIN_SILENCE_DURATION_RANGE.contains(&min_silence_duration) {
            return Err(AudioError::ConfigError(format!(
                "Minimum silence duration must be between {} and {} seconds, got {}",
                MIN_SILENCE_DURATION_RANGE.start(),
                MIN_SILENCE_DURATION_RANGE.end(),
                min_silence_duration
            )));
        }

        Ok(TrimConfig {
            silence_threshold,
            min_silence_duration,
            enforce_min_silence: false,
        })
    }

    /// Merge segments separated by silences shorter than the minimum duration
    pub fn with_min_silence_enforced(mut self, enforce: bool) -> Self {
        self.enforce_min_silence = enforce;
        self
    }

    /// Get the RMS silence threshold
    pub fn silence_threshold(&self) -> f64 {
        self.silence_threshold
    }

    /// Get the minimum silence duration in seconds
    pub fn min_silence_duration(&self) -> f64 {
        self.min_silence_duration
    }

    /// Whether short silences are merged back into their neighbours
    pub fn enforce_min_silence(&self) -> bool {
        self.enforce_min_silence
    }

    /// Minimum silence length in samples at the given rate
    pub fn min_silence_samples(&self, sample_rate: u32) -> usize {
        (self.min_silence_duration * sample_rate as f64).floor() as usize
    }
}

impl Default for TrimConfig {
    fn default() -> Self {
        TrimConfig {
            silence_threshold: DEFAULT_SILENCE_THRESHOLD,
            min_silence_duration: DEFAULT_MIN_SILENCE_DURATION,
            enforce_min_silence: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrimConfig::default();
        assert_eq!(config.silence_threshold(), 0.015);
        assert_eq!(config.min_silence_duration(), 0.5);
        assert!(!config.enforce_min_silence());
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        assert!(TrimConfig::new(0.001, 0.1).is_ok());
        assert!(TrimConfig::new(0.05, 2.0).is_ok());
    }

    #[test]
    fn test_out_of_range_threshold() {
        assert!(matches!(
            TrimConfig::new(0.0009, 0.5),
            Err(AudioError::ConfigError(_))
        ));
        assert!(TrimConfig::new(0.06, 0.5).is_err());
        assert!(TrimConfig::new(f64::NAN, 0.5).is_err());
    }

    #[test]
    fn test_out_of_range_min_silence() {
        assert!(TrimConfig::new(0.015, 0.05).is_err());
        assert!(TrimConfig::new(0.015, 2.5).is_err());
    }

    #[test]
    fn test_min_silence_samples() {
        let config = TrimConfig::new(0.015, 0.25).unwrap().with_min_silence_enforced(true);
        assert!(config.enforce_min_silence());
        assert_eq!(config.min_silence_samples(8000), 2000);
    }
}
