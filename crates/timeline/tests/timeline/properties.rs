use dash_timeline::{ManualClock, PresentationTimeline};

use crate::{
    base_clock, fifty_seconds_of_segments, make_ipr_timeline, make_live_timeline,
    make_vod_timeline, set_elapsed,
};

fn elapsed_steps() -> impl Iterator<Item = f64> {
    (0..=400).map(|i| i as f64 * 0.5)
}

fn assert_end_non_decreasing(clock: &ManualClock, timeline: &PresentationTimeline<ManualClock>) {
    let mut last = f64::NEG_INFINITY;
    for elapsed in elapsed_steps() {
        set_elapsed(clock, elapsed);
        let end = timeline.segment_availability_end();
        assert!(end >= last, "end went from {last} to {end} at {elapsed}");
        assert!(end <= timeline.duration());
        last = end;
    }
}

#[test]
fn test_availability_end_never_decreases() {
    let clock = base_clock();
    assert_end_non_decreasing(&clock, &make_live_timeline(&clock, 20.0, 0.0, true));
    assert_end_non_decreasing(&clock, &make_ipr_timeline(&clock, 60.0, 0.0));
    assert_end_non_decreasing(&clock, &make_vod_timeline(&clock, 60.0));

    let mut corrected = make_live_timeline(&clock, 20.0, 0.0, true);
    set_elapsed(&clock, 0.0);
    corrected.notify_segments(&fifty_seconds_of_segments());
    assert_end_non_decreasing(&clock, &corrected);
}

#[test]
fn test_live_window_matches_formula() {
    let clock = base_clock();
    let timeline = make_live_timeline(&clock, 20.0, 0.0, false);

    for elapsed in elapsed_steps() {
        set_elapsed(&clock, elapsed);
        let end = (elapsed - 10.0).max(0.0);
        assert_eq!(timeline.segment_availability_end(), end);
        assert_eq!(timeline.segment_availability_start(), (end - 20.0).max(0.0));
    }
}

#[test]
fn test_safe_seek_start_is_monotonic_in_buffer() {
    let clock = base_clock();
    let timelines = [
        make_live_timeline(&clock, 60.0, 0.0, true),
        make_live_timeline(&clock, f64::INFINITY, 0.0, true),
        make_ipr_timeline(&clock, 90.0, 0.0),
        make_vod_timeline(&clock, 60.0),
    ];

    for elapsed in [0.0, 15.0, 50.0, 120.0, 300.0] {
        set_elapsed(&clock, elapsed);
        for timeline in &timelines {
            let start = timeline.segment_availability_start();
            let end = timeline.segment_availability_end();
            assert_eq!(timeline.safe_seek_range_start(0.0), start);

            let mut last = f64::NEG_INFINITY;
            for buffer in (0..=300).map(|b| b as f64) {
                let safe = timeline.safe_seek_range_start(buffer);
                assert!(safe >= last);
                assert!(safe >= start);
                assert!(safe <= end);
                last = safe;
            }
        }
    }
}
