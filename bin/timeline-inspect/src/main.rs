use std::path::PathBuf;

use clap::Parser;
use dash_timeline::{ManualClock, PresentationTimeline, SegmentTime, TimelineConfig, WallClock};

#[derive(Parser, Debug, Clone)]
#[clap(version, author)]
/// Prints the availability and seek windows of a DASH presentation timeline.
pub struct InspectArgs {
    /// Timeline config in TOML format.
    pub config: PathBuf,

    /// Evaluate at this many seconds after the presentation start instead of the current time.
    #[clap(short, long, allow_negative_numbers = true)]
    pub elapsed: Option<f64>,

    /// Required look-ahead buffer in seconds for the safe seek start.
    #[clap(short, long, default_value = "0")]
    pub buffer: f64,

    /// Segments to notify before evaluating, as `<start>:<end>`. Can be repeated.
    #[clap(short, long = "segment")]
    pub segments: Vec<SegmentTime>,

    /// Lowest seek target chosen by the user.
    #[clap(long)]
    pub seek_floor: Option<f64>,

    /// Print the snapshot as JSON.
    #[clap(long)]
    pub json: bool,
}

fn inspect<C: WallClock>(
    mut timeline: PresentationTimeline<C>,
    args: &InspectArgs,
) -> anyhow::Result<()> {
    if !args.segments.is_empty() {
        timeline.notify_segments(&args.segments);
        tracing::info!(
            count = args.segments.len(),
            max_segment_end_time = ?timeline.max_segment_end_time(),
            "Segments notified"
        );
    }
    if let Some(seek_floor) = args.seek_floor {
        timeline.set_user_seek_start(seek_floor);
    }
    tracing::debug!(?timeline, elapsed = timeline.elapsed(), "Timeline ready");

    let snapshot = timeline.snapshot(args.buffer);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{snapshot}");
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
                .try_from_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = InspectArgs::parse();
    let config = TimelineConfig::load(&args.config)?;

    match args.elapsed {
        Some(elapsed) => {
            let start = config.presentation_start_seconds()?.unwrap_or_default();
            let clock = ManualClock::default();
            clock.set_seconds(start + elapsed);
            inspect(config.build_with_clock(clock)?, &args)
        }
        None => inspect(config.build()?, &args),
    }
}
