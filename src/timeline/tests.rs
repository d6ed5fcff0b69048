use super::*;
use crate::stage::{MemoryStage, Stage};
use crate::types::stage::VisualSpec;

fn sfx(key: &str) -> Action {
    Action::PlaySfx {
        key: key.to_string(),
    }
}

fn sfx_key(action: &Action) -> &str {
    match action {
        Action::PlaySfx { key } => key,
        other => panic!("expected PlaySfx, got {other:?}"),
    }
}

/// Tick in frame-sized steps so the catch-up cap never bites.
fn pump(tl: &mut CueTimeline, stage: &mut MemoryStage, seconds: f64) -> Vec<Action> {
    let mut fired = Vec::new();
    let mut left = seconds;
    while left > 1e-12 {
        let dt = left.min(0.05);
        fired.extend(tl.tick(dt, stage));
        left -= dt;
    }
    fired
}

#[test]
fn duration_is_max_end_time_regardless_of_append_order() {
    let mut a = CueTimeline::new();
    a.append(Segment::wait(2.0), At::End).unwrap();
    a.append(Segment::wait(1.0), At::End).unwrap();

    let mut b = CueTimeline::new();
    b.append(Segment::wait(1.0), At::End).unwrap();
    b.append(Segment::wait(2.0), At::End).unwrap();

    assert_eq!(a.duration(), 3.0);
    assert_eq!(b.duration(), 3.0);
}

#[test]
fn duration_includes_nested_sub_timelines() {
    let mut inner = CueTimeline::new();
    inner.append(Segment::wait(4.0), At::End).unwrap();

    let mut outer = CueTimeline::new();
    outer.append(Segment::wait(1.0), At::End).unwrap();
    outer
        .append(Segment::Sub { timeline: inner }, At::End)
        .unwrap();

    assert_eq!(outer.duration(), 5.0);
}

#[test]
fn negative_relative_offset_overlaps_previous_tail() {
    let mut tl = CueTimeline::new();
    tl.append(Segment::wait(1.0), At::End).unwrap();
    tl.append(Segment::wait(1.0), At::Relative { offset: -0.5 })
        .unwrap();
    // Second segment runs 0.5..1.5, so the total is 1.5, not 2.
    assert_eq!(tl.duration(), 1.5);
}

#[test]
fn tween_endpoint_is_exact_after_seek() {
    let mut stage = MemoryStage::new();
    let hero = stage.spawn(VisualSpec::new("hero", 0.0, 0.0).with_alpha(0.1));

    let mut tl = CueTimeline::new();
    tl.append(
        Segment::tween1(hero, Prop::Alpha, 0.73, 1.7, Ease::BounceOut),
        At::End,
    )
    .unwrap();

    tl.seek(1.7, &mut stage).unwrap();
    assert_eq!(stage.get(hero, Prop::Alpha), Some(0.73));
}

#[test]
fn seek_is_idempotent_for_rendered_state() {
    let mut stage = MemoryStage::new();
    let hero = stage.spawn(VisualSpec::new("hero", 0.0, 0.0));

    let mut tl = CueTimeline::new();
    tl.append(
        Segment::tween1(hero, Prop::X, 100.0, 2.0, Ease::QuadInOut),
        At::End,
    )
    .unwrap();

    tl.seek(0.8, &mut stage).unwrap();
    let first = stage.get(hero, Prop::X).unwrap();
    tl.seek(0.8, &mut stage).unwrap();
    assert_eq!(stage.get(hero, Prop::X), Some(first));
}

#[test]
fn tween_interpolates_from_current_value() {
    let mut stage = MemoryStage::new();
    let hero = stage.spawn(VisualSpec::new("hero", 10.0, 0.0));

    let mut tl = CueTimeline::new();
    tl.append(
        Segment::tween1(hero, Prop::X, 20.0, 1.0, Ease::Linear),
        At::End,
    )
    .unwrap();

    tl.play();
    pump(&mut tl, &mut stage, 0.5);
    let x = stage.get(hero, Prop::X).unwrap();
    assert!((x - 15.0).abs() < 1e-9, "halfway should be 15, got {x}");
}

#[test]
fn calls_fire_once_in_schedule_order() {
    let mut stage = MemoryStage::new();
    let mut tl = CueTimeline::new();
    tl.append(Segment::call(sfx("first")), At::End).unwrap();
    tl.append(Segment::wait(0.1), At::End).unwrap();
    tl.append(Segment::call(sfx("second")), At::End).unwrap();

    tl.play();
    let fired = tl.tick(0.2, &mut stage);
    let keys: Vec<_> = fired.iter().map(sfx_key).collect();
    assert_eq!(keys, vec!["first", "second"]);

    // Already fired; the next window is empty.
    assert!(tl.tick(0.2, &mut stage).is_empty());
}

#[test]
fn calls_at_equal_times_keep_append_order() {
    let mut stage = MemoryStage::new();
    let mut tl = CueTimeline::new();
    tl.add_label("hit", Some(0.5));
    tl.append(Segment::call(sfx("a")), At::label("hit", 0.0))
        .unwrap();
    tl.append(Segment::call(sfx("b")), At::label("hit", 0.0))
        .unwrap();
    tl.append(Segment::call(sfx("c")), At::label("hit", 0.0))
        .unwrap();
    tl.append(Segment::wait(1.0), At::End).unwrap();

    tl.play();
    let fired = pump(&mut tl, &mut stage, 1.0);
    let keys: Vec<_> = fired.iter().map(sfx_key).collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
}

#[test]
fn forward_seek_fires_skipped_calls_backward_seek_does_not() {
    let mut stage = MemoryStage::new();
    let mut tl = CueTimeline::new();
    tl.append(Segment::wait(1.0), At::End).unwrap();
    tl.append(Segment::call(sfx("mid")), At::End).unwrap();
    tl.append(Segment::wait(1.0), At::End).unwrap();

    let fired = tl.seek(1.5, &mut stage).unwrap();
    assert_eq!(fired.len(), 1);

    let fired = tl.seek(0.5, &mut stage).unwrap();
    assert!(fired.is_empty());

    // Crossing forward again re-fires the re-armed call.
    tl.play();
    let fired = pump(&mut tl, &mut stage, 1.0);
    assert_eq!(fired.len(), 1);
}

#[test]
fn backward_seek_restores_pre_tween_state() {
    let mut stage = MemoryStage::new();
    let hero = stage.spawn(VisualSpec::new("hero", 0.0, 0.0).with_alpha(0.0));

    let mut tl = CueTimeline::new();
    tl.append(Segment::wait(1.0), At::End).unwrap();
    tl.append(
        Segment::tween1(hero, Prop::Alpha, 1.0, 1.0, Ease::Linear),
        At::End,
    )
    .unwrap();

    tl.seek(2.0, &mut stage).unwrap();
    assert_eq!(stage.get(hero, Prop::Alpha), Some(1.0));

    tl.seek(0.5, &mut stage).unwrap();
    assert_eq!(stage.get(hero, Prop::Alpha), Some(0.0));
}

#[test]
fn pause_freezes_and_resume_continues_without_jump() {
    let mut stage = MemoryStage::new();
    let hero = stage.spawn(VisualSpec::new("hero", 0.0, 0.0));

    let mut tl = CueTimeline::new();
    tl.append(
        Segment::tween1(hero, Prop::X, 10.0, 1.0, Ease::Linear),
        At::End,
    )
    .unwrap();

    tl.play();
    pump(&mut tl, &mut stage, 0.4);
    let frozen = stage.get(hero, Prop::X).unwrap();
    tl.pause();

    // Wall-clock time passes; ticks while paused change nothing.
    for _ in 0..50 {
        assert!(tl.tick(0.1, &mut stage).is_empty());
    }
    assert!((tl.time() - 0.4).abs() < 1e-9);
    assert_eq!(stage.get(hero, Prop::X), Some(frozen));

    tl.resume();
    tl.tick(0.1, &mut stage);
    assert!((tl.time() - 0.5).abs() < 1e-9);
}

#[test]
fn tick_advance_is_capped() {
    let mut stage = MemoryStage::new();
    let mut tl = CueTimeline::new();
    tl.append(Segment::wait(10.0), At::End).unwrap();
    tl.play();
    tl.tick(5.0, &mut stage);
    assert_eq!(tl.time(), MAX_TICK_SECONDS);
}

#[test]
fn call_observes_values_written_by_tween_ending_at_same_instant() {
    let mut stage = MemoryStage::new();
    let hero = stage.spawn(VisualSpec::new("hero", 0.0, 0.0));

    let mut tl = CueTimeline::new();
    tl.append(
        Segment::tween1(hero, Prop::X, 42.0, 0.1, Ease::Linear),
        At::End,
    )
    .unwrap();
    tl.append(Segment::call(sfx("after")), At::End).unwrap();

    tl.play();
    let fired = tl.tick(0.2, &mut stage);
    assert_eq!(fired.len(), 1);
    // Tweens are applied before calls are handed out.
    assert_eq!(stage.get(hero, Prop::X), Some(42.0));
}

#[test]
fn tween_on_destroyed_target_is_silent_noop() {
    let mut stage = MemoryStage::new();
    let doomed = stage.spawn(VisualSpec::new("doomed", 0.0, 0.0));
    stage.destroy(doomed);

    let mut tl = CueTimeline::new();
    tl.append(
        Segment::tween1(doomed, Prop::X, 5.0, 0.1, Ease::Linear),
        At::End,
    )
    .unwrap();
    tl.append(Segment::call(sfx("still-runs")), At::End).unwrap();

    tl.play();
    let fired = tl.tick(0.2, &mut stage);
    assert_eq!(fired.len(), 1, "playback continues past the broken segment");
}

#[test]
fn append_at_unknown_label_fails_fast() {
    let mut tl = CueTimeline::new();
    let err = tl
        .append(Segment::wait(1.0), At::label("nowhere", 0.0))
        .unwrap_err();
    assert!(matches!(err, TimelineError::UnknownLabel { .. }));
}

#[test]
fn seek_out_of_range_fails_fast() {
    let mut stage = MemoryStage::new();
    let mut tl = CueTimeline::new();
    tl.append(Segment::wait(1.0), At::End).unwrap();
    assert!(matches!(
        tl.seek(2.0, &mut stage),
        Err(TimelineError::SeekOutOfRange { .. })
    ));
    assert!(tl.seek(-0.1, &mut stage).is_err());
}

#[test]
fn relabeling_overwrites_the_time() {
    let mut tl = CueTimeline::new();
    tl.add_label("mark", Some(1.0));
    tl.add_label("mark", Some(2.5));
    assert_eq!(tl.label_time("mark"), Some(2.5));
}

#[test]
fn label_segment_marks_current_position() {
    let mut tl = CueTimeline::new();
    tl.append(Segment::wait(1.5), At::End).unwrap();
    tl.append(
        Segment::Label {
            name: "here".to_string(),
        },
        At::End,
    )
    .unwrap();
    assert_eq!(tl.label_time("here"), Some(1.5));
}

#[test]
fn progress_runs_zero_to_one() {
    let mut stage = MemoryStage::new();
    let mut tl = CueTimeline::new();
    tl.append(Segment::wait(0.2), At::End).unwrap();
    assert_eq!(tl.progress(), 0.0);
    tl.play();
    tl.tick(0.1, &mut stage);
    assert!((tl.progress() - 0.5).abs() < 1e-9);
    tl.tick(0.2, &mut stage);
    assert_eq!(tl.progress(), 1.0);
    assert!(!tl.is_playing());
}

#[test]
fn restart_replays_opening_calls() {
    let mut stage = MemoryStage::new();
    let mut tl = CueTimeline::new();
    tl.append(Segment::call(sfx("opening")), At::End).unwrap();
    tl.append(Segment::wait(0.1), At::End).unwrap();

    tl.play();
    assert_eq!(tl.tick(0.2, &mut stage).len(), 1);

    tl.restart();
    assert_eq!(tl.tick(0.2, &mut stage).len(), 1);
}

#[test]
fn sub_timeline_calls_fire_at_offset_positions() {
    let mut stage = MemoryStage::new();

    let mut inner = CueTimeline::new();
    inner.append(Segment::wait(0.1), At::End).unwrap();
    inner.append(Segment::call(sfx("nested")), At::End).unwrap();

    let mut tl = CueTimeline::new();
    tl.append(Segment::wait(0.1), At::End).unwrap();
    tl.append(Segment::Sub { timeline: inner }, At::End).unwrap();

    tl.play();
    assert!(tl.tick(0.15, &mut stage).is_empty());
    let fired = tl.tick(0.1, &mut stage);
    assert_eq!(fired.len(), 1, "nested call fires at 0.2 absolute");
}
