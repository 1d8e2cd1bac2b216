use super::segment::Segment;
use crate::core::AudioBuffer;
use crate::progress::{ProgressSink, scaled_percent};

/// Concatenate the given ranges of every channel into a new buffer
///
/// Segments must be ordered, non-overlapping and within the buffer, which
/// [`extract_segments`](super::segment::extract_segments) guarantees. All
/// channels are cut at the same offsets so frames stay aligned. Progress
/// covers the 50-100% band.
pub fn reassemble(
    buffer: &AudioBuffer,
    segments: &[Segment],
    progress: &mut dyn ProgressSink,
) -> AudioBuffer {
    let total_len: usize = segments.iter().map(Segment::len).sum();
    let mut output: Vec<Vec<f32>> = (0..buffer.channel_count())
        .map(|_| Vec::with_capacity(total_len))
        .collect();

    for (index, segment) in segments.iter().enumerate() {
        progress.report(scaled_percent(50, 50, index, segments.len()));

        for (out, input) in output.iter_mut().zip(buffer.channels()) {
            out.extend_from_slice(&input[segment.start..segment.end]);
        }
    }

    AudioBuffer::from_validated_parts(buffer.sample_rate(), output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{NoProgress, ProgressLog};

    #[test]
    fn test_reassemble_mono() {
        let buffer = AudioBuffer::new(100, vec![(0..10).map(|i| i as f32).collect()]).unwrap();
        let segments = [Segment::new(1, 3), Segment::new(6, 9)];

        let out = reassemble(&buffer, &segments, &mut NoProgress);

        assert_eq!(out.sample_rate(), 100);
        assert_eq!(out.frames(), 5);
        assert_eq!(out.channel(0), Some(&[1.0, 2.0, 6.0, 7.0, 8.0][..]));
    }

    #[test]
    fn test_channels_stay_aligned() {
        let left: Vec<f32> = (0..20).map(|i| i as f32).collect();
        let right: Vec<f32> = (0..20).map(|i| -(i as f32)).collect();
        let buffer = AudioBuffer::new(100, vec![left, right]).unwrap();
        let segments = [Segment::new(2, 5), Segment::new(10, 12), Segment::new(18, 20)];

        let out = reassemble(&buffer, &segments, &mut NoProgress);

        assert_eq!(out.channel_count(), 2);
        assert_eq!(out.frames(), 7);
        for (l, r) in out.channels()[0].iter().zip(&out.channels()[1]) {
            assert_eq!(*l, -*r);
        }
    }

    #[test]
    fn test_progress_band() {
        let buffer = AudioBuffer::new(100, vec![vec![0.5; 40]]).unwrap();
        let segments = [Segment::new(0, 10), Segment::new(20, 30)];
        let mut log = ProgressLog::new();

        reassemble(&buffer, &segments, &mut log);

        assert_eq!(log.events(), &[50, 75]);
    }
}
