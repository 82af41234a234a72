use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};

use chrono::{DateTime, TimeDelta, Utc};

/// Source of wall clock time.
///
/// This is the only way wall clock time enters a timeline, so tests and tools
/// can pin it without touching any global state.
pub trait WallClock {
    fn now(&self) -> DateTime<Utc>;
}

impl<F> WallClock for F
where
    F: Fn() -> DateTime<Utc>,
{
    fn now(&self) -> DateTime<Utc> {
        self()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A settable clock. Clones share the same time, so a test can keep one
/// handle while the timeline owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    micros: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            micros: Arc::new(AtomicI64::new(now.timestamp_micros())),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.micros.store(now.timestamp_micros(), Ordering::SeqCst);
    }

    /// Moves the clock by `delta`, saturating at the microsecond range of `i64`.
    pub fn advance(&self, delta: TimeDelta) {
        let micros = delta.num_microseconds().unwrap_or(if delta < TimeDelta::zero() {
            i64::MIN
        } else {
            i64::MAX
        });
        let _ = self
            .micros
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                Some(current.saturating_add(micros))
            });
    }

    /// Moves the clock to `seconds` after the unix epoch. Fractions are kept
    /// down to the microsecond.
    pub fn set_seconds(&self, seconds: f64) {
        self.micros
            .store((seconds * 1_000_000.0).round() as i64, Ordering::SeqCst);
    }
}

impl WallClock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_micros(self.micros.load(Ordering::SeqCst)).unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct Clock<C = SystemClock> {
    source: C,
    /// How much time the local clock is behind the remote clock
    offset: TimeDelta,
}

impl<C: WallClock> Clock<C> {
    pub fn new(source: C) -> Self {
        Self {
            source,
            offset: TimeDelta::zero(),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.source.now() + self.offset
    }

    /// Corrected time as seconds since the unix epoch.
    pub fn now_seconds(&self) -> f64 {
        let now = self.now();
        now.timestamp() as f64 + now.timestamp_subsec_micros() as f64 / 1_000_000.0
    }
}

impl<C> Clock<C> {
    pub fn offset(&self) -> TimeDelta {
        self.offset
    }

    pub fn set_offset(&mut self, offset: TimeDelta) {
        self.offset = offset;
        tracing::debug!(offset_milliseconds = %offset.num_milliseconds(), "Clock offset set");
    }
}
