use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimelineError {
    #[error("Duration must be positive, got {0}")]
    NonPositiveDuration(f64),

    #[error("Static presentation must have a finite duration")]
    InfiniteStaticDuration,

    #[error("Max segment duration must be positive, got {0}")]
    NonPositiveMaxSegmentDuration(f64),

    #[error("Dynamic presentation requires a presentation start time")]
    MissingPresentationStartTime,

    #[error("Segment availability duration must be positive, got {0}")]
    NonPositiveAvailabilityDuration(f64),

    #[error("Presentation delay must not be negative, got {0}")]
    NegativePresentationDelay(f64),

    #[error("Invalid presentation start time: {0}")]
    InvalidStartTime(String),

    #[error("Invalid timeline config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

pub type TimelineResult<T> = Result<T, TimelineError>;
