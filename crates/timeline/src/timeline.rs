//! Implementation of the DASH presentation timeline
//!
//! References:
//! - [DASH-IF implementation guidelines: restricted timing model](https://dashif.org/Guidelines-TimingModel)
//! - [MPEG-DASH](https://www.mpeg.org/standards/MPEG-DASH/)

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::{
    clock::{Clock, SystemClock, WallClock},
    error::{TimelineError, TimelineResult},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationMode {
    /// In a static presentation (`MPD@type="static"`) any media segment may be
    /// presented at any time. The DASH client is in complete control over what
    /// content is presented when and the entire presentation is available at any time.
    Static,
    /// In a dynamic presentation (`MPD@type="dynamic"`) the MPD timeline is mapped to wall
    /// clock time, with each media segment on the MPD timeline intended to be presented at
    /// a specific moment in time (with some client-chosen time shift allowed).
    ///
    /// Media segments may become available and cease to be available with the passage of time.
    Dynamic,
}

/// Re-anchors the wall clock derived live edge onto the newest segment end seen.
///
/// Holds `observed_end - raw_end` as a constant offset, stored as both terms so that
/// applying it to the same `raw_end` gives back `observed_end` exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DriftCorrection {
    pub(crate) observed_end: f64,
    pub(crate) raw_end: f64,
}

impl DriftCorrection {
    pub(crate) fn apply(&self, raw_end: f64) -> f64 {
        self.observed_end + (raw_end - self.raw_end)
    }
}

/// Tracks which segments of a presentation are available, and where a user may seek.
///
/// Every query is computed from the current state and the clock at call time.
/// Nothing is cached, so setters take effect on the next read.
pub struct PresentationTimeline<C = SystemClock> {
    pub(crate) mode: PresentationMode,

    /// In a dynamic presentation, the zero point of the MPD timeline is mapped to this
    /// point in wall clock time, in seconds since the unix epoch.
    pub(crate) presentation_start_time: Option<f64>,
    /// Held back from the live edge before content is considered playable.
    pub(crate) presentation_delay: f64,
    /// `f64::INFINITY` when the end of the presentation is unknown.
    pub(crate) duration: f64,
    /// Time shift buffer depth. `f64::INFINITY` keeps every segment ever produced.
    pub(crate) segment_availability_duration: f64,
    /// Longest segment seen so far, kept off the live edge so partial segments are
    /// never reported as available.
    pub(crate) max_segment_duration: f64,

    pub(crate) clock: Clock<C>,
    pub(crate) auto_correct_drift: bool,
    pub(crate) drift_correction: Option<DriftCorrection>,

    pub(crate) max_segment_end_time: Option<f64>,
    pub(crate) min_segment_start_time: Option<f64>,

    pub(crate) user_seek_start: Option<f64>,
}

impl PresentationTimeline<SystemClock> {
    pub fn new(
        presentation_start_time: Option<f64>,
        presentation_delay: f64,
        auto_correct_drift: bool,
    ) -> Self {
        Self::with_clock(
            SystemClock,
            presentation_start_time,
            presentation_delay,
            auto_correct_drift,
        )
    }
}

impl<C: WallClock> PresentationTimeline<C> {
    /// Creates a timeline reading time from `clock`.
    ///
    /// The timeline starts dynamic when `presentation_start_time` is given and static otherwise,
    /// with infinite duration and availability and a max segment duration of one second.
    pub fn with_clock(
        clock: C,
        presentation_start_time: Option<f64>,
        presentation_delay: f64,
        auto_correct_drift: bool,
    ) -> Self {
        let mode = if presentation_start_time.is_some() {
            PresentationMode::Dynamic
        } else {
            PresentationMode::Static
        };

        Self {
            mode,
            presentation_start_time,
            presentation_delay,
            duration: f64::INFINITY,
            segment_availability_duration: f64::INFINITY,
            max_segment_duration: 1.0,
            clock: Clock::new(clock),
            auto_correct_drift,
            drift_correction: None,
            max_segment_end_time: None,
            min_segment_start_time: None,
            user_seek_start: None,
        }
    }

    pub fn mode(&self) -> PresentationMode {
        self.mode
    }

    pub fn is_static(&self) -> bool {
        matches!(self.mode, PresentationMode::Static)
    }

    pub fn is_dynamic(&self) -> bool {
        !self.is_static()
    }

    /// Dynamic with no known end.
    pub fn is_live(&self) -> bool {
        self.is_dynamic() && self.duration.is_infinite()
    }

    /// Dynamic with a known end that is still being produced.
    pub fn is_in_progress(&self) -> bool {
        self.is_dynamic() && self.duration.is_finite()
    }

    /// Freezes a dynamic timeline once the presentation ends.
    ///
    /// A static timeline never becomes dynamic again, so `set_static(false)` on one is ignored.
    pub fn set_static(&mut self, is_static: bool) {
        match (self.mode, is_static) {
            (PresentationMode::Dynamic, true) => {
                tracing::debug!("Presentation switched from dynamic to static");
                self.mode = PresentationMode::Static;
            }
            (PresentationMode::Static, false) => {
                tracing::warn!("Ignoring request to switch a static presentation to dynamic");
            }
            _ => {}
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn set_duration(&mut self, duration: f64) {
        tracing::debug!(duration, "Presentation duration set");
        self.duration = duration;
    }

    pub fn presentation_start_time(&self) -> Option<f64> {
        self.presentation_start_time
    }

    pub fn presentation_delay(&self) -> f64 {
        self.presentation_delay
    }

    pub fn segment_availability_duration(&self) -> f64 {
        self.segment_availability_duration
    }

    pub fn set_segment_availability_duration(&mut self, duration: f64) {
        tracing::debug!(duration, "Segment availability duration set");
        self.segment_availability_duration = duration;
    }

    pub fn max_segment_duration(&self) -> f64 {
        self.max_segment_duration
    }

    /// Raises the max segment duration. Shorter segments never shrink the margin.
    pub fn notify_max_segment_duration(&mut self, duration: f64) {
        if !duration.is_finite() {
            tracing::warn!(duration, "Ignoring non-finite segment duration");
            return;
        }
        if duration > self.max_segment_duration {
            self.max_segment_duration = duration;
        }
    }

    /// Clock offset in seconds.
    pub fn clock_offset(&self) -> f64 {
        self.clock.offset().num_milliseconds() as f64 / 1000.0
    }

    /// Sets the local clock correction, in milliseconds.
    pub fn set_clock_offset(&mut self, offset_ms: i64) {
        self.clock.set_offset(TimeDelta::milliseconds(offset_ms));
    }

    pub fn auto_correct_drift(&self) -> bool {
        self.auto_correct_drift
    }

    pub fn max_segment_end_time(&self) -> Option<f64> {
        self.max_segment_end_time
    }

    pub fn min_segment_start_time(&self) -> Option<f64> {
        self.min_segment_start_time
    }

    pub fn user_seek_start(&self) -> Option<f64> {
        self.user_seek_start
    }

    /// Pins the lowest seekable time, e.g. to a seek target chosen earlier.
    pub fn set_user_seek_start(&mut self, time: f64) {
        self.user_seek_start = Some(time);
    }

    pub fn clear_user_seek_start(&mut self) {
        self.user_seek_start = None;
    }

    pub fn clock(&self) -> &Clock<C> {
        &self.clock
    }

    /// Seconds since the presentation start, from the corrected clock.
    ///
    /// Zero for a timeline without a start time.
    pub fn elapsed(&self) -> f64 {
        match self.presentation_start_time {
            Some(start) => self.clock.now_seconds() - start,
            None => 0.0,
        }
    }

    /// Checks the configuration invariants.
    pub fn validate(&self) -> TimelineResult<()> {
        // Written as negations so NaN fails every check
        if !(self.duration > 0.0) {
            return Err(TimelineError::NonPositiveDuration(self.duration));
        }
        if self.is_static() && !self.duration.is_finite() {
            return Err(TimelineError::InfiniteStaticDuration);
        }
        if !(self.max_segment_duration > 0.0) {
            return Err(TimelineError::NonPositiveMaxSegmentDuration(
                self.max_segment_duration,
            ));
        }
        if self.is_dynamic() && self.presentation_start_time.is_none() {
            return Err(TimelineError::MissingPresentationStartTime);
        }
        if !(self.segment_availability_duration > 0.0) {
            return Err(TimelineError::NonPositiveAvailabilityDuration(
                self.segment_availability_duration,
            ));
        }
        if !(self.presentation_delay >= 0.0) {
            return Err(TimelineError::NegativePresentationDelay(
                self.presentation_delay,
            ));
        }

        Ok(())
    }

    /// Debug-time check of [`Self::validate`]. Logs in release builds instead of panicking.
    pub fn assert_valid(&self) {
        if let Err(e) = self.validate() {
            tracing::error!(error = %e, "Invalid presentation timeline");
            debug_assert!(false, "Invalid presentation timeline: {e}");
        }
    }
}

impl<C> std::fmt::Debug for PresentationTimeline<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresentationTimeline")
            .field("mode", &self.mode)
            .field("presentation_start_time", &self.presentation_start_time)
            .field("presentation_delay", &self.presentation_delay)
            .field("duration", &self.duration)
            .field(
                "segment_availability_duration",
                &self.segment_availability_duration,
            )
            .field("max_segment_duration", &self.max_segment_duration)
            .field("clock_offset", &self.clock.offset())
            .field("auto_correct_drift", &self.auto_correct_drift)
            .field("drift_correction", &self.drift_correction)
            .field("max_segment_end_time", &self.max_segment_end_time)
            .field("min_segment_start_time", &self.min_segment_start_time)
            .field("user_seek_start", &self.user_seek_start)
            .finish()
    }
}
