//! Progress reporting side channel
//!
//! Stages report integer percentages in `[0, 100]`. Reporting is
//! fire-and-forget: sinks cannot fail the pipeline.

/// Receiver of progress percentages
pub trait ProgressSink {
    /// Report the current completion percentage
    fn report(&mut self, percent: u8);
}

impl<F: FnMut(u8)> ProgressSink for F {
    fn report(&mut self, percent: u8) {
        self(percent)
    }
}

/// Sink that discards every report
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _percent: u8) {}
}

/// Sink that records every report it receives
#[derive(Debug, Default, Clone)]
pub struct ProgressLog {
    events: Vec<u8>,
}

impl ProgressLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded percentages in arrival order
    pub fn events(&self) -> &[u8] {
        &self.events
    }

    /// Get owned events (consumes log)
    pub fn into_events(self) -> Vec<u8> {
        self.events
    }
}

impl ProgressSink for ProgressLog {
    fn report(&mut self, percent: u8) {
        self.events.push(percent);
    }
}

/// Adapter that forwards only strictly increasing percentages, capped at 100
pub struct MonotonicProgress<'a> {
    inner: &'a mut dyn ProgressSink,
    last: Option<u8>,
}

impl<'a> MonotonicProgress<'a> {
    /// Wrap a sink
    pub fn new(inner: &'a mut dyn ProgressSink) -> Self {
        MonotonicProgress { inner, last: None }
    }

    /// Last percentage forwarded, if any
    pub fn last(&self) -> Option<u8> {
        self.last
    }
}

impl ProgressSink for MonotonicProgress<'_> {
    fn report(&mut self, percent: u8) {
        let percent = percent.min(100);
        if self.last.is_some_and(|last| percent <= last) {
            return;
        }
        self.last = Some(percent);
        self.inner.report(percent);
    }
}

/// Percentage of `done` out of `total` scaled into a `span`-wide band at `base`
pub(crate) fn scaled_percent(base: u8, span: u8, done: usize, total: usize) -> u8 {
    if total == 0 {
        return base;
    }
    let scaled = (done as u128 * span as u128 / total as u128) as u8;
    base.saturating_add(scaled.min(span))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |p: u8| seen.push(p);
            sink.report(5);
            sink.report(10);
        }
        assert_eq!(seen, vec![5, 10]);
    }

    #[test]
    fn test_monotonic_drops_regressions_and_duplicates() {
        let mut log = ProgressLog::new();
        {
            let mut progress = MonotonicProgress::new(&mut log);
            for p in [0, 0, 10, 7, 50, 50, 120] {
                progress.report(p);
            }
            assert_eq!(progress.last(), Some(100));
        }
        assert_eq!(log.events(), &[0, 10, 50, 100]);
    }

    #[test]
    fn test_scaled_percent() {
        assert_eq!(scaled_percent(0, 50, 0, 100), 0);
        assert_eq!(scaled_percent(0, 50, 99, 100), 49);
        assert_eq!(scaled_percent(50, 50, 1, 3), 66);
        assert_eq!(scaled_percent(50, 50, 5, 0), 50);
    }
}
