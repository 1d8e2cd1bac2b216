use log::debug;

/// Half-open range `[start, end)` of sample indices into the original buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// First sample of the range
    pub start: usize,
    /// One past the last sample of the range
    pub end: usize,
}

impl Segment {
    /// Create a new segment
    pub fn new(start: usize, end: usize) -> Self {
        Segment { start, end }
    }

    /// Number of samples covered
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the segment covers no samples
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// What the pipeline should do with a buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrimPlan {
    /// Keep the original buffer as is
    Unchanged,
    /// Keep only these ranges, in order
    Trim(Vec<Segment>),
}

/// Turn a per-window silence classification into non-silent sample ranges
///
/// Windows are `window_size` samples long starting at sample 0. A run of
/// sound that reaches the last classified window extends to `total_len`, so
/// the unclassified tail is kept with it.
pub fn extract_segments(silent: &[bool], window_size: usize, total_len: usize) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut in_silence = true;
    let mut non_silence_start = 0;

    for (i, &window_is_silent) in silent.iter().enumerate() {
        let window_start = i * window_size;

        match (in_silence, window_is_silent) {
            (true, false) => {
                non_silence_start = window_start;
                in_silence = false;
            }
            (false, true) => {
                segments.push(Segment::new(non_silence_start, window_start));
                in_silence = true;
            }
            _ => {}
        }
    }

    if !in_silence {
        segments.push(Segment::new(non_silence_start, total_len));
    }

    segments
}

/// Merge neighbouring segments separated by fewer than `min_gap` samples
pub fn merge_short_gaps(segments: Vec<Segment>, min_gap: usize) -> Vec<Segment> {
    let mut merged: Vec<Segment> = Vec::with_capacity(segments.len());

    for segment in segments {
        match merged.last_mut() {
            Some(prev) if segment.start - prev.end < min_gap => prev.end = segment.end,
            _ => merged.push(segment),
        }
    }

    merged
}

/// Decide whether a segment list calls for trimming at all
///
/// No segments (all silence) and a single segment spanning the whole buffer
/// both leave the buffer untouched.
pub fn plan_trim(segments: Vec<Segment>, total_len: usize) -> TrimPlan {
    match segments.as_slice() {
        [] => {
            debug!("No sound detected, keeping buffer unchanged");
            TrimPlan::Unchanged
        }
        [only] if only.start == 0 && only.end == total_len => {
            debug!("No silence detected, keeping buffer unchanged");
            TrimPlan::Unchanged
        }
        _ => TrimPlan::Trim(segments),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_len() {
        let segment = Segment::new(80, 240);
        assert_eq!(segment.len(), 160);
        assert!(!segment.is_empty());
        assert!(Segment::new(5, 5).is_empty());
    }

    #[test]
    fn test_all_silent_yields_no_segments() {
        let segments = extract_segments(&[true, true, true], 80, 250);
        assert!(segments.is_empty());
        assert_eq!(plan_trim(segments, 250), TrimPlan::Unchanged);
    }

    #[test]
    fn test_all_sound_spans_whole_buffer() {
        let segments = extract_segments(&[false, false, false], 80, 250);
        assert_eq!(segments, vec![Segment::new(0, 250)]);
        assert_eq!(plan_trim(segments, 250), TrimPlan::Unchanged);
    }

    #[test]
    fn test_leading_and_trailing_silence() {
        let segments = extract_segments(&[true, false, false, true], 80, 320);
        assert_eq!(segments, vec![Segment::new(80, 240)]);
        assert_eq!(
            plan_trim(segments, 320),
            TrimPlan::Trim(vec![Segment::new(80, 240)])
        );
    }

    #[test]
    fn test_trailing_sound_keeps_unclassified_tail() {
        // 3 windows of 80 plus a 30 sample tail
        let segments = extract_segments(&[true, false, false], 80, 270);
        assert_eq!(segments, vec![Segment::new(80, 270)]);
    }

    #[test]
    fn test_multiple_segments_are_ordered() {
        let segments = extract_segments(&[false, true, false, true, true, false], 10, 60);
        assert_eq!(
            segments,
            vec![Segment::new(0, 10), Segment::new(20, 30), Segment::new(50, 60)]
        );
        assert!(segments.windows(2).all(|w| w[0].end < w[1].start));
    }

    #[test]
    fn test_sound_starting_at_zero_but_ending_early_is_trimmed() {
        let segments = extract_segments(&[false, true], 80, 160);
        assert_eq!(
            plan_trim(segments, 160),
            TrimPlan::Trim(vec![Segment::new(0, 80)])
        );
    }

    #[test]
    fn test_merge_short_gaps() {
        let segments = vec![Segment::new(0, 10), Segment::new(20, 30), Segment::new(50, 60)];
        assert_eq!(
            merge_short_gaps(segments.clone(), 15),
            vec![Segment::new(0, 30), Segment::new(50, 60)]
        );
        assert_eq!(merge_short_gaps(segments.clone(), 25), vec![Segment::new(0, 60)]);
        assert_eq!(merge_short_gaps(segments.clone(), 10), segments);
    }
}
