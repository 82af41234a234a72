use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    clock::{SystemClock, WallClock},
    error::{TimelineError, TimelineResult},
    timeline::PresentationTimeline,
};

/// Wall clock anchor of a dynamic presentation, either as seconds since the unix epoch
/// or as an RFC 3339 date like `MPD@availabilityStartTime`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StartTime {
    Seconds(f64),
    DateTime(String),
}

impl StartTime {
    pub fn as_seconds(&self) -> TimelineResult<f64> {
        match self {
            Self::Seconds(seconds) => Ok(*seconds),
            Self::DateTime(value) => {
                let datetime = DateTime::parse_from_rfc3339(value)
                    .map_err(|e| TimelineError::InvalidStartTime(format!("{value}: {e}")))?
                    .with_timezone(&Utc);
                Ok(datetime.timestamp() as f64
                    + datetime.timestamp_subsec_micros() as f64 / 1_000_000.0)
            }
        }
    }
}

/// Everything needed to set up a [`PresentationTimeline`].
///
/// Absent durations mean infinity, which TOML can not express directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    #[serde(rename = "static")]
    pub is_static: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presentation_start_time: Option<StartTime>,
    pub presentation_delay: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_availability_duration: Option<f64>,
    pub max_segment_duration: f64,
    pub clock_offset_ms: i64,
    pub auto_correct_drift: bool,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            is_static: false,
            presentation_start_time: None,
            presentation_delay: 0.0,
            duration: None,
            segment_availability_duration: None,
            max_segment_duration: 1.0,
            clock_offset_ms: 0,
            auto_correct_drift: true,
        }
    }
}

impl TimelineConfig {
    pub fn from_toml_str(data: &str) -> TimelineResult<Self> {
        Ok(toml::from_str(data)?)
    }

    pub fn load(path: impl AsRef<Path>) -> TimelineResult<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_toml_str(&data)
    }

    pub fn presentation_start_seconds(&self) -> TimelineResult<Option<f64>> {
        self.presentation_start_time
            .as_ref()
            .map(StartTime::as_seconds)
            .transpose()
    }

    pub fn build(&self) -> TimelineResult<PresentationTimeline<SystemClock>> {
        self.build_with_clock(SystemClock)
    }

    /// Applies every setting to a new timeline and validates it.
    pub fn build_with_clock<C: WallClock>(
        &self,
        clock: C,
    ) -> TimelineResult<PresentationTimeline<C>> {
        let presentation_start_time = self.presentation_start_seconds()?;
        if !self.is_static && presentation_start_time.is_none() {
            return Err(TimelineError::MissingPresentationStartTime);
        }

        let mut timeline = PresentationTimeline::with_clock(
            clock,
            presentation_start_time,
            self.presentation_delay,
            self.auto_correct_drift,
        );
        if self.is_static {
            timeline.set_static(true);
        }
        timeline.set_duration(self.duration.unwrap_or(f64::INFINITY));
        timeline.set_segment_availability_duration(
            self.segment_availability_duration.unwrap_or(f64::INFINITY),
        );
        // Declared value, not a lower bound, so validation sees it as written
        timeline.max_segment_duration = self.max_segment_duration;
        timeline.set_clock_offset(self.clock_offset_ms);
        timeline.validate()?;

        Ok(timeline)
    }
}
