use serde::{Deserialize, Serialize};

/// A segment whose position on the presentation timeline is known.
///
/// Times are in seconds relative to the presentation timeline zero point.
pub trait SegmentReference {
    fn start_time(&self) -> f64;

    fn end_time(&self) -> f64;

    fn duration(&self) -> f64 {
        self.end_time() - self.start_time()
    }
}

impl<T> SegmentReference for &T
where
    T: SegmentReference + ?Sized,
{
    fn start_time(&self) -> f64 {
        (**self).start_time()
    }

    fn end_time(&self) -> f64 {
        (**self).end_time()
    }
}

impl SegmentReference for (f64, f64) {
    fn start_time(&self) -> f64 {
        self.0
    }

    fn end_time(&self) -> f64 {
        self.1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentTime {
    pub start: f64,
    pub end: f64,
}

impl SegmentTime {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

impl From<(f64, f64)> for SegmentTime {
    fn from((start, end): (f64, f64)) -> Self {
        Self { start, end }
    }
}

impl SegmentReference for SegmentTime {
    fn start_time(&self) -> f64 {
        self.start
    }

    fn end_time(&self) -> f64 {
        self.end
    }
}

impl std::str::FromStr for SegmentTime {
    type Err = String;

    /// Parses `<start>:<end>`, e.g. `40:50`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once(':')
            .ok_or_else(|| format!("Expected <start>:<end>, got {s}"))?;
        let start: f64 = start
            .trim()
            .parse()
            .map_err(|e| format!("Invalid segment start {start}: {e}"))?;
        let end: f64 = end
            .trim()
            .parse()
            .map_err(|e| format!("Invalid segment end {end}: {e}"))?;
        if end < start {
            return Err(format!("Segment ends before it starts: {s}"));
        }

        Ok(Self { start, end })
    }
}
