use crate::{base_clock, make_ipr_timeline, make_live_timeline, make_vod_timeline, set_elapsed};

#[test]
fn test_safe_seek_start_ignores_buffer_for_vod() {
    let clock = base_clock();
    let timeline = make_vod_timeline(&clock, 60.0);

    assert_eq!(timeline.safe_seek_range_start(0.0), 0.0);
    assert_eq!(timeline.safe_seek_range_start(10.0), 0.0);
    assert_eq!(timeline.safe_seek_range_start(25.0), 0.0);
}

#[test]
fn test_safe_seek_start_offsets_from_live_edge() {
    let clock = base_clock();
    let timeline = make_live_timeline(&clock, 60.0, 0.0, true);

    set_elapsed(&clock, 120.0);
    // now (120) - availability (60) - segment size (10)
    assert_eq!(timeline.seek_range_start(), 50.0);
    assert_eq!(timeline.safe_seek_range_start(0.0), 50.0);
    assert_eq!(timeline.safe_seek_range_start(10.0), 60.0);
    assert_eq!(timeline.safe_seek_range_start(25.0), 75.0);
}

#[test]
fn test_safe_seek_start_clamps_to_end() {
    let clock = base_clock();
    let timeline = make_live_timeline(&clock, 60.0, 0.0, true);

    set_elapsed(&clock, 120.0);
    assert_eq!(timeline.segment_availability_end(), 110.0);
    assert_eq!(timeline.safe_seek_range_start(70.0), 110.0);
    assert_eq!(timeline.safe_seek_range_start(85.0), 110.0);
    assert_eq!(timeline.safe_seek_range_start(200.0), 110.0);
}

#[test]
fn test_safe_seek_start_while_window_is_filling() {
    let clock = base_clock();
    let timeline = make_live_timeline(&clock, 60.0, 0.0, true);

    set_elapsed(&clock, 50.0);
    // now (50) - availability (60) - segment size (10) = -20
    assert_eq!(timeline.seek_range_start(), 0.0);
    assert_eq!(timeline.safe_seek_range_start(0.0), 0.0);
    assert_eq!(timeline.safe_seek_range_start(25.0), 5.0);
}

#[test]
fn test_user_seek_start_rounds_up_to_millisecond() {
    let clock = base_clock();
    let mut timeline = make_vod_timeline(&clock, 60.0);

    // Seeking to this exact number may land slightly before it
    timeline.set_user_seek_start(1.458666666666666);
    assert_eq!(timeline.safe_seek_range_start(0.0), 1.459);

    timeline.clear_user_seek_start();
    assert_eq!(timeline.safe_seek_range_start(0.0), 0.0);
}

#[test]
fn test_user_seek_start_below_window_is_ignored() {
    let clock = base_clock();
    let mut timeline = make_live_timeline(&clock, 60.0, 0.0, true);

    set_elapsed(&clock, 120.0);
    timeline.set_user_seek_start(12.0);
    assert_eq!(timeline.safe_seek_range_start(0.0), 50.0);

    timeline.set_user_seek_start(55.0001);
    assert_eq!(timeline.safe_seek_range_start(0.0), 55.001);
    assert_eq!(timeline.safe_seek_range_start(10.0), 60.0);
}

#[test]
fn test_seek_range_end_accounts_for_delay() {
    let clock = base_clock();
    let ipr = make_ipr_timeline(&clock, 60.0, 7.0);
    let live = make_live_timeline(&clock, 60.0, 7.0, true);

    for (elapsed, expected) in [(11.0, 0.0), (18.0, 1.0), (37.0, 20.0)] {
        set_elapsed(&clock, elapsed);
        assert_eq!(ipr.seek_range_end(), expected, "elapsed {elapsed}");
        assert_eq!(live.seek_range_end(), expected, "elapsed {elapsed}");
    }
}

#[test]
fn test_snapshot() -> anyhow::Result<()> {
    let clock = base_clock();
    let timeline = make_live_timeline(&clock, 60.0, 5.0, true);

    set_elapsed(&clock, 120.0);
    let snapshot = timeline.snapshot(10.0);
    assert!(snapshot.is_live);
    assert!(!snapshot.is_in_progress);
    assert_eq!(snapshot.segment_availability_start, 50.0);
    assert_eq!(snapshot.segment_availability_end, 110.0);
    assert_eq!(snapshot.seek_range_start, 50.0);
    assert_eq!(snapshot.seek_range_end, 105.0);
    assert_eq!(snapshot.safe_seek_range_start, 60.0);

    let json = serde_json::to_value(&snapshot)?;
    assert_eq!(json["mode"], "dynamic");
    assert!(json["duration"].is_null());
    assert_eq!(json["seek_range_end"], 105.0);

    Ok(())
}
