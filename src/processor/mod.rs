//! Silence trimming pipeline
//!
//! classify windows → extract segments → reassemble → (encode)

/// Concatenation of kept ranges
pub mod reassemble;
/// Non-silent range extraction
pub mod segment;

pub use reassemble::reassemble;
pub use segment::{Segment, TrimPlan, extract_segments, merge_short_gaps, plan_trim};

use crate::analysis::silence::{classify_windows, window_size};
use crate::config::TrimConfig;
use crate::core::AudioBuffer;
use crate::decoder;
use crate::encoder::encode_wav;
use crate::error::AudioResult;
use crate::progress::{MonotonicProgress, ProgressLog, ProgressSink};
use log::{debug, info};

/// Audio processing pipeline result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingStats {
    /// Frames in the input buffer
    pub input_frames: usize,
    /// Frames in the output buffer
    pub output_frames: usize,
    /// Windows classified on channel 0
    pub windows: usize,
    /// Windows found silent
    pub silent_windows: usize,
    /// Whether any audio was removed
    pub trimmed: bool,
}

impl ProcessingStats {
    /// Frames removed by trimming
    pub fn removed_frames(&self) -> usize {
        self.input_frames - self.output_frames
    }
}

/// Result of one trimming run
#[derive(Debug, Clone)]
pub struct TrimOutcome {
    /// The output buffer, the input itself when nothing was trimmed
    pub buffer: AudioBuffer,
    /// Retained ranges of the input, a single full range when unchanged
    pub segments: Vec<Segment>,
    /// Counters describing the run
    pub stats: ProcessingStats,
}

/// Trim silent passages from `buffer`, reporting progress to `progress`
///
/// Only channel 0 is inspected; every channel is cut at the same offsets.
/// The sink sees a non-decreasing sequence ending at 100.
pub fn process_with_progress(
    buffer: AudioBuffer,
    config: &TrimConfig,
    progress: &mut dyn ProgressSink,
) -> TrimOutcome {
    let mut progress = MonotonicProgress::new(progress);
    let input_frames = buffer.frames();
    let window = window_size(buffer.sample_rate());

    let silent = classify_windows(
        &buffer.channels()[0],
        window,
        config.silence_threshold(),
        &mut progress,
    );
    let silent_windows = silent.iter().filter(|&&s| s).count();
    debug!(
        "Classified {} windows of {} samples, {} silent",
        silent.len(),
        window,
        silent_windows
    );

    let mut segments = extract_segments(&silent, window, input_frames);
    if config.enforce_min_silence() {
        let min_gap = config.min_silence_samples(buffer.sample_rate());
        segments = merge_short_gaps(segments, min_gap);
    }

    let (output, segments) = match plan_trim(segments, input_frames) {
        TrimPlan::Unchanged => (buffer, vec![Segment::new(0, input_frames)]),
        TrimPlan::Trim(segments) => {
            debug!("Keeping {} segments", segments.len());
            let output = reassemble(&buffer, &segments, &mut progress);
            (output, segments)
        }
    };
    progress.report(100);

    let stats = ProcessingStats {
        input_frames,
        output_frames: output.frames(),
        windows: silent.len(),
        silent_windows,
        trimmed: output.frames() != input_frames,
    };
    info!(
        "Trimmed {} of {} frames ({} segments kept)",
        stats.removed_frames(),
        input_frames,
        segments.len()
    );

    TrimOutcome {
        buffer: output,
        segments,
        stats,
    }
}

/// Trim silent passages and return the outcome with every progress event
pub fn process(buffer: AudioBuffer, config: &TrimConfig) -> (TrimOutcome, Vec<u8>) {
    let mut log = ProgressLog::new();
    let outcome = process_with_progress(buffer, config, &mut log);
    (outcome, log.into_events())
}

/// Per-call trimming context holding the configuration
#[derive(Debug, Clone, Default)]
pub struct SilenceTrimmer {
    config: TrimConfig,
}

impl SilenceTrimmer {
    /// Create a trimmer with the given configuration
    pub fn new(config: TrimConfig) -> Self {
        SilenceTrimmer { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &TrimConfig {
        &self.config
    }

    /// Trim a decoded buffer
    pub fn process(&self, buffer: AudioBuffer, progress: &mut dyn ProgressSink) -> TrimOutcome {
        process_with_progress(buffer, &self.config, progress)
    }

    /// Decode an encoded file, trim it and return 16-bit PCM WAV bytes
    pub fn process_bytes(
        &self,
        bytes: Vec<u8>,
        extension: Option<&str>,
        progress: &mut dyn ProgressSink,
    ) -> AudioResult<Vec<u8>> {
        let buffer = decoder::from_bytes(bytes, extension)?.decode()?;
        let outcome = self.process(buffer, progress);
        Ok(encode_wav(&outcome.buffer))
    }
}
