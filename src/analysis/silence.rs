use crate::progress::{ProgressSink, scaled_percent};

/// Analysis window length in seconds (10ms)
pub const WINDOW_SECONDS: f64 = 0.01;

/// Progress is reported on every Nth window
const PROGRESS_EVERY: usize = 10;

/// Number of samples in one analysis window at the given rate
///
/// Rates below 100 Hz would give an empty window, so the size never drops
/// below one sample.
pub fn window_size(sample_rate: u32) -> usize {
    ((sample_rate as f64 * WINDOW_SECONDS).floor() as usize).max(1)
}

/// Calculates the Root Mean Square (RMS) of a set of audio samples
pub fn rms(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum_of_squares: f64 = samples
        .iter()
        .map(|&s| {
            let s = s as f64;
            s * s
        })
        .sum();

    (sum_of_squares / samples.len() as f64).sqrt()
}

/// Classify each complete window of `samples` as silent (`true`) or not
///
/// A window is silent when its RMS is strictly below `threshold`. The tail
/// shorter than one window is not classified. Progress covers the 0-50% band.
pub fn classify_windows(
    samples: &[f32],
    window_size: usize,
    threshold: f64,
    progress: &mut dyn ProgressSink,
) -> Vec<bool> {
    let total_windows = samples.len() / window_size;

    samples
        .chunks_exact(window_size)
        .enumerate()
        .map(|(i, window)| {
            if i % PROGRESS_EVERY == 0 {
                progress.report(scaled_percent(0, 50, i, total_windows));
            }
            rms(window) < threshold
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{NoProgress, ProgressLog};

    #[test]
    fn test_rms_calculation() {
        assert_eq!(rms(&[0.5, -0.5, 0.5, -0.5]), 0.5);
        assert_eq!(rms(&[0.0, 0.0, 0.0]), 0.0);
        assert_eq!(rms(&[]), 0.0);
    }

    #[test]
    fn test_window_size() {
        assert_eq!(window_size(8000), 80);
        assert_eq!(window_size(44100), 441);
        assert_eq!(window_size(22050), 220);
        assert_eq!(window_size(50), 1);
    }

    #[test]
    fn test_threshold_is_strict() {
        // RMS exactly at the threshold counts as sound
        let window = [0.25f32; 4];
        assert_eq!(classify_windows(&window, 4, 0.25, &mut NoProgress), vec![false]);
        assert_eq!(classify_windows(&window, 4, 0.2500001, &mut NoProgress), vec![true]);
    }

    #[test]
    fn test_tail_is_not_classified() {
        let samples = vec![0.0f32; 85];
        let windows = classify_windows(&samples, 80, 0.015, &mut NoProgress);
        assert_eq!(windows, vec![true]);
    }

    #[test]
    fn test_mixed_windows() {
        let mut samples = vec![0.0f32; 80];
        samples.extend(vec![0.3f32; 80]);
        samples.extend(vec![0.001f32; 80]);
        let windows = classify_windows(&samples, 80, 0.015, &mut NoProgress);
        assert_eq!(windows, vec![true, false, true]);
    }

    #[test]
    fn test_progress_sampled_every_tenth_window() {
        let samples = vec![0.0f32; 25 * 80];
        let mut log = ProgressLog::new();
        classify_windows(&samples, 80, 0.015, &mut log);
        assert_eq!(log.events(), &[0, 20, 40]);
    }
}
