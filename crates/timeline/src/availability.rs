//! Availability window of a presentation
//!
//! <https://dashif.org/Guidelines-TimingModel/#availability-window>
//!
//! > The availability window is a period of wall clock time that determines which media segments
//! > can be retrieved by DASH clients.

use crate::{
    clock::WallClock,
    segment::SegmentReference,
    timeline::{DriftCorrection, PresentationTimeline},
};

impl<C: WallClock> PresentationTimeline<C> {
    /// Live edge derived from the wall clock alone, before drift correction and clamping.
    ///
    /// The newest segment may still be being written, so one max segment duration is held back.
    fn raw_availability_end(&self) -> f64 {
        self.elapsed() - self.max_segment_duration
    }

    /// End of the range of segments that can be fetched.
    pub fn segment_availability_end(&self) -> f64 {
        if self.is_static() {
            if self.duration.is_finite() {
                return self.duration;
            }

            // A live presentation that was frozen before its final duration was known
            return self.max_segment_end_time.unwrap_or(f64::INFINITY);
        }

        let raw_end = self.raw_availability_end();
        let end = match self.drift_correction {
            Some(correction) if self.auto_correct_drift => correction.apply(raw_end),
            _ => raw_end,
        };

        end.max(0.0).min(self.duration)
    }

    /// Start of the range of segments that can be fetched.
    pub fn segment_availability_start(&self) -> f64 {
        if self.is_static() || self.segment_availability_duration.is_infinite() {
            return 0.0;
        }

        (self.segment_availability_end() - self.segment_availability_duration).max(0.0)
    }

    /// Records the time span of newly discovered segments.
    ///
    /// With drift correction enabled on a dynamic timeline, the live edge is re-anchored so
    /// that it matches the newest segment end right away, whatever the wall clock says.
    pub fn notify_segments<I>(&mut self, references: I)
    where
        I: IntoIterator,
        I::Item: SegmentReference,
    {
        let mut count = 0usize;
        let mut min_start = f64::INFINITY;
        let mut max_end = f64::NEG_INFINITY;
        let mut max_duration = 0.0f64;
        for reference in references {
            count += 1;
            min_start = min_start.min(reference.start_time());
            max_end = max_end.max(reference.end_time());
            max_duration = max_duration.max(reference.duration());
        }
        if count == 0 {
            return;
        }
        tracing::trace!(count, min_start, max_end, "Segments notified");

        self.notify_min_segment_start_time(min_start);
        self.max_segment_end_time = Some(match self.max_segment_end_time {
            Some(current) => current.max(max_end),
            None => max_end,
        });
        if max_duration > 0.0 {
            self.notify_max_segment_duration(max_duration);
        }

        if self.auto_correct_drift && self.is_dynamic() {
            self.reanchor_drift_correction();
        }
    }

    /// Lowers the earliest known segment start.
    pub fn notify_min_segment_start_time(&mut self, start_time: f64) {
        self.min_segment_start_time = Some(match self.min_segment_start_time {
            Some(current) => current.min(start_time),
            None => start_time,
        });
    }

    fn reanchor_drift_correction(&mut self) {
        let Some(observed_end) = self.max_segment_end_time else {
            return;
        };

        let raw_end = self.raw_availability_end();
        tracing::debug!(
            observed_end,
            raw_end,
            drift = observed_end - raw_end,
            "Live edge re-anchored to segment end"
        );
        self.drift_correction = Some(DriftCorrection {
            observed_end,
            raw_end,
        });
    }
}
