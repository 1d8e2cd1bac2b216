use crate::error::{AudioError, AudioResult};
use std::time::Duration;

/// Decoded audio held as one sample vector per channel
///
/// Samples are normalized `f32` values nominally in `[-1.0, 1.0]`. Every
/// channel has the same length, so `frames()` is well defined.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    /// Sample rate in Hz (e.g., 44100, 48000, 8000)
    sample_rate: u32,
    /// Planar channel data, channel 0 first
    channels: Vec<Vec<f32>>,
}

impl AudioBuffer {
    /// Create a buffer from planar channel data
    ///
    /// Refuses zero sample rates, zero channels, channel counts that do not
    /// fit a WAV header and channels of differing length.
    pub fn new(sample_rate: u32, channels: Vec<Vec<f32>>) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate { rate: sample_rate });
        }

        if channels.is_empty() || channels.len() > u16::MAX as usize {
            return Err(AudioError::InvalidChannels {
                expected: 1,
                got: channels.len() as u32,
            });
        }

        let frames = channels[0].len();
        if let Some(pos) = channels.iter().position(|c| c.len() != frames) {
            return Err(AudioError::BufferError(format!(
                "Channel {} has {} samples, channel 0 has {}",
                pos,
                channels[pos].len(),
                frames
            )));
        }

        Ok(AudioBuffer {
            sample_rate,
            channels,
        })
    }

    /// Build a buffer whose invariants the caller already upholds
    pub(crate) fn from_validated_parts(sample_rate: u32, channels: Vec<Vec<f32>>) -> Self {
        debug_assert!(sample_rate > 0 && !channels.is_empty());
        debug_assert!(channels.iter().all(|c| c.len() == channels[0].len()));
        AudioBuffer {
            sample_rate,
            channels,
        }
    }

    /// Create a buffer from interleaved samples (frame by frame)
    pub fn from_interleaved(
        samples: &[f32],
        sample_rate: u32,
        channel_count: usize,
    ) -> AudioResult<Self> {
        if channel_count == 0 {
            return Err(AudioError::InvalidChannels {
                expected: 1,
                got: 0,
            });
        }

        if samples.len() % channel_count != 0 {
            return Err(AudioError::BufferError(
                "Sample count not divisible by channel count".to_string(),
            ));
        }

        let frames = samples.len() / channel_count;
        let mut channels: Vec<Vec<f32>> = (0..channel_count)
            .map(|_| Vec::with_capacity(frames))
            .collect();
        for frame in samples.chunks_exact(channel_count) {
            for (channel, &sample) in channels.iter_mut().zip(frame) {
                channel.push(sample);
            }
        }

        AudioBuffer::new(sample_rate, channels)
    }

    /// Get sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get number of channels
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Get number of samples per channel
    pub fn frames(&self) -> usize {
        self.channels[0].len()
    }

    /// Get the samples of one channel
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// Get all channels in order
    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    /// Get owned channel data (consumes buffer)
    pub fn into_channels(self) -> Vec<Vec<f32>> {
        self.channels
    }

    /// Get playback duration of the buffer
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.frames() as f64 / self.sample_rate as f64)
    }

    /// Check if buffer holds no frames
    pub fn is_empty(&self) -> bool {
        self.frames() == 0
    }
}

/// Audio metadata/information
#[derive(Debug, Clone)]
pub struct AudioMetadata {
    /// Total duration of the audio
    pub duration: Option<Duration>,
    /// Total number of frames if the container declares it
    pub total_frames: Option<u64>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: usize,
    /// Codec name (e.g., "mp3", "flac", "pcm_s16le")
    pub codec: String,
}

impl AudioMetadata {
    /// Create new metadata
    pub fn new(sample_rate: u32, channels: usize, codec: String) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate { rate: sample_rate });
        }

        Ok(AudioMetadata {
            duration: None,
            total_frames: None,
            sample_rate,
            channels,
            codec,
        })
    }

    /// Set the total frame count, deriving the duration from it
    pub fn with_total_frames(mut self, frames: u64) -> Self {
        self.total_frames = Some(frames);
        self.duration = Some(Duration::from_secs_f64(
            frames as f64 / self.sample_rate as f64,
        ));
        self
    }

    /// Get duration in seconds
    pub fn duration_secs(&self) -> Option<f64> {
        self.duration.map(|d| d.as_secs_f64())
    }
}
