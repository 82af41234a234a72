mod availability;
pub mod clock;
pub mod config;
pub mod error;
mod seek;
pub mod segment;
mod timeline;

pub use clock::{Clock, ManualClock, SystemClock, WallClock};
pub use config::{StartTime, TimelineConfig};
pub use error::{TimelineError, TimelineResult};
pub use seek::TimelineSnapshot;
pub use segment::{SegmentReference, SegmentTime};
pub use timeline::{PresentationMode, PresentationTimeline};

/// ```text
///           configuration ──────┐
///                               ▼
/// ┌──────────────┐    ┌───────────────────┐    ┌───────────────────┐
/// │  WallClock   ├────►   Availability    ├────►    Seek window    │
/// │ (+ offset)   │    │      window       │    │ (delay, buffer,   │
/// └──────────────┘    └─────────▲─────────┘    │  user seek start) │
///                               │              └───────────────────┘
///                       notify_segments
///                     (drift correction)
/// ```
pub type DashTimeline = PresentationTimeline<SystemClock>;
