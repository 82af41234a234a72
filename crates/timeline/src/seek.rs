use serde::Serialize;

use crate::{
    clock::WallClock,
    timeline::{PresentationMode, PresentationTimeline},
};

/// Rounds up to the next millisecond.
///
/// Seek targets get truncated further down the pipeline, so rounding down could land
/// before the first available sample.
pub(crate) fn ceil_to_milliseconds(time: f64) -> f64 {
    (time * 1000.0).ceil() / 1000.0
}

impl<C: WallClock> PresentationTimeline<C> {
    pub fn seek_range_start(&self) -> f64 {
        self.segment_availability_start()
    }

    pub fn seek_range_end(&self) -> f64 {
        (self.segment_availability_end() - self.presentation_delay).max(0.0)
    }

    /// Lowest seek target that still leaves `required_buffer` seconds before the
    /// window slides past it.
    ///
    /// Anchored on `end - availability` rather than on the window start, so it falls back
    /// to the real start while the window is still filling and saturates at the end when
    /// the buffer is wider than the whole window.
    pub fn safe_seek_range_start(&self, required_buffer: f64) -> f64 {
        let start = self.segment_availability_start();
        let end = self.segment_availability_end();

        let lower_bound = match self.user_seek_start {
            Some(user_start) => start.max(ceil_to_milliseconds(user_start)),
            None => start,
        };
        let desired = end - self.segment_availability_duration + required_buffer;

        desired.max(lower_bound).min(end)
    }

    /// Reads every window at the same instant.
    pub fn snapshot(&self, required_buffer: f64) -> TimelineSnapshot {
        TimelineSnapshot {
            mode: self.mode,
            is_live: self.is_live(),
            is_in_progress: self.is_in_progress(),
            duration: self.duration,
            segment_availability_start: self.segment_availability_start(),
            segment_availability_end: self.segment_availability_end(),
            seek_range_start: self.seek_range_start(),
            seek_range_end: self.seek_range_end(),
            required_buffer,
            safe_seek_range_start: self.safe_seek_range_start(required_buffer),
        }
    }
}

/// Availability and seek windows of a timeline at one point in time.
///
/// Infinite values are serialized as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineSnapshot {
    pub mode: PresentationMode,
    pub is_live: bool,
    pub is_in_progress: bool,
    pub duration: f64,
    pub segment_availability_start: f64,
    pub segment_availability_end: f64,
    pub seek_range_start: f64,
    pub seek_range_end: f64,
    pub required_buffer: f64,
    pub safe_seek_range_start: f64,
}

impl std::fmt::Display for TimelineSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match (self.mode, self.is_live, self.is_in_progress) {
            (PresentationMode::Static, _, _) => "static",
            (_, true, _) => "live",
            (_, _, true) => "in-progress",
            _ => "dynamic",
        };
        writeln!(f, "mode:                 {kind}")?;
        writeln!(f, "duration:             {}", self.duration)?;
        writeln!(
            f,
            "availability window:  [{}, {}]",
            self.segment_availability_start, self.segment_availability_end
        )?;
        writeln!(
            f,
            "seek range:           [{}, {}]",
            self.seek_range_start, self.seek_range_end
        )?;
        write!(
            f,
            "safe seek start:      {} (buffer {})",
            self.safe_seek_range_start, self.required_buffer
        )
    }
}
