//! Cue timeline engine
//!
//! A single pausable, seekable schedule of time-ordered segments: waits,
//! instant action calls, property tweens, labels and nested sub-timelines.
//! The whole presentation, across all scenes, lives in one timeline; scenes
//! append their blocks and the runner interprets the actions each tick
//! fires.

use crate::stage::Stage;
use crate::types::segment::{Action, At, Segment};
use crate::types::stage::{Prop, TargetId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod ease;

pub use ease::Ease;

#[cfg(test)]
mod tests;

/// Largest clock advance a single tick may apply. Keeps a suspended tab
/// from replaying minutes of cues in one frame on resume.
pub const MAX_TICK_SECONDS: f64 = 0.25;

/// Authoring-time mistakes; these fail fast at the call site instead of
/// degrading playback.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    #[error("unknown label '{name}'")]
    UnknownLabel { name: String },
    #[error("seek to {time:.3}s is outside the scheduled range 0..{duration:.3}s")]
    SeekOutOfRange { time: f64, duration: f64 },
}

/// A scheduled entry: a segment plus its absolute start time and the
/// runtime bookkeeping playback needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Entry {
    start: f64,
    kind: EntryKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum EntryKind {
    Wait {
        seconds: f64,
    },
    Call {
        action: Action,
        /// Fired flag: set when the head crosses the scheduled time going
        /// forward, reset again when a backward seek moves before it
        fired: bool,
    },
    Tween {
        target: TargetId,
        props: Vec<(Prop, f64)>,
        seconds: f64,
        ease: Ease,
        /// Property values sampled when the play head first enters the
        /// tween; cleared again when the head moves back before it
        from: Option<Vec<f64>>,
        /// Target vanished; the tween is a silent no-op from then on
        dead: bool,
    },
    Sub {
        timeline: CueTimeline,
    },
}

impl Entry {
    fn end(&self) -> f64 {
        let len = match &self.kind {
            EntryKind::Wait { seconds } => *seconds,
            EntryKind::Call { .. } => 0.0,
            EntryKind::Tween { seconds, .. } => *seconds,
            EntryKind::Sub { timeline } => timeline.duration(),
        };
        self.start + len
    }
}

/// The ordered schedule of all timed operations for a presentation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CueTimeline {
    entries: Vec<Entry>,
    labels: HashMap<String, f64>,
    clock: f64,
    playing: bool,
    /// End of the most recently appended segment, anchor for `At::Relative`
    last_end: f64,
}

impl CueTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a segment at the given position.
    ///
    /// `At::Label` with a name that was never recorded is an authoring bug
    /// and fails. A position resolving to a negative start is clamped to 0.
    pub fn append(&mut self, segment: Segment, at: At) -> Result<(), TimelineError> {
        let start = self.resolve_position(&at)?.max(0.0);
        self.insert_at(start, segment);
        Ok(())
    }

    /// Append at the end of the schedule. Unlike label-relative appends
    /// this cannot fail.
    pub fn push(&mut self, segment: Segment) {
        self.insert_at(self.duration(), segment);
    }

    /// Append relative to the previously appended segment's end; negative
    /// offsets overlap its tail. Cannot fail.
    pub fn push_offset(&mut self, segment: Segment, offset: f64) {
        self.insert_at((self.last_end + offset).max(0.0), segment);
    }

    fn insert_at(&mut self, start: f64, segment: Segment) {
        match segment {
            Segment::Label { name } => {
                // Labels occupy no time; they only mark the position.
                self.labels.insert(name, start);
                self.last_end = start;
            }
            Segment::Wait { seconds } => {
                self.push_entry(start, EntryKind::Wait { seconds });
            }
            Segment::Call { action } => {
                self.push_entry(
                    start,
                    EntryKind::Call {
                        action,
                        fired: false,
                    },
                );
            }
            Segment::Tween {
                target,
                props,
                seconds,
                ease,
            } => {
                self.push_entry(
                    start,
                    EntryKind::Tween {
                        target,
                        props,
                        seconds,
                        ease,
                        from: None,
                        dead: false,
                    },
                );
            }
            Segment::Sub { timeline } => {
                self.push_entry(start, EntryKind::Sub { timeline });
            }
        }
    }

    /// Append a whole block of positioned segments in order.
    pub fn append_all(
        &mut self,
        segments: impl IntoIterator<Item = (Segment, At)>,
    ) -> Result<(), TimelineError> {
        for (segment, at) in segments {
            self.append(segment, at)?;
        }
        Ok(())
    }

    fn push_entry(&mut self, start: f64, kind: EntryKind) {
        let entry = Entry { start, kind };
        self.last_end = entry.end();
        self.entries.push(entry);
    }

    fn resolve_position(&self, at: &At) -> Result<f64, TimelineError> {
        match at {
            At::End => Ok(self.duration()),
            At::Relative { offset } => Ok(self.last_end + offset),
            At::Label { name, offset } => {
                let base = self
                    .labels
                    .get(name)
                    .copied()
                    .ok_or_else(|| TimelineError::UnknownLabel { name: name.clone() })?;
                Ok(base + offset)
            }
        }
    }

    /// Record a named marker at the current cumulative end (or an explicit
    /// time). Re-adding a name overwrites its time.
    pub fn add_label(&mut self, name: impl Into<String>, time: Option<f64>) {
        let at = time.unwrap_or_else(|| self.duration());
        self.labels.insert(name.into(), at);
    }

    pub fn label_time(&self, name: &str) -> Option<f64> {
        self.labels.get(name).copied()
    }

    /// Labels and their times, unordered.
    pub fn labels(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels.iter().map(|(name, t)| (name.as_str(), *t))
    }

    /// Total scheduled time including all nested sub-timelines.
    pub fn duration(&self) -> f64 {
        self.entries.iter().map(Entry::end).fold(0.0, f64::max)
    }

    pub fn time(&self) -> f64 {
        self.clock
    }

    /// Elapsed fraction of the schedule, in [0, 1].
    pub fn progress(&self) -> f64 {
        let dur = self.duration();
        if dur <= 0.0 { 0.0 } else { self.clock / dur }
    }

    pub fn segment_count(&self) -> usize {
        self.entries.len()
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Freezes the clock instantly; every target keeps the value it had at
    /// the paused instant.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Continues from the paused instant with no time jump.
    pub fn resume(&mut self) {
        self.playing = true;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Back to the start, ready to play the schedule again from scratch.
    pub fn restart(&mut self) {
        self.clock = 0.0;
        self.playing = true;
        reset_entries(&mut self.entries);
    }

    /// Advance the clock by `dt` seconds of real time (capped) and return
    /// the actions whose scheduled time fell inside the tick's window, in
    /// ascending schedule order, stable for equal times.
    pub fn tick(&mut self, dt: f64, stage: &mut dyn Stage) -> Vec<Action> {
        if !self.playing || dt <= 0.0 {
            return Vec::new();
        }
        let dur = self.duration();
        let old = self.clock;
        let new = (old + dt.min(MAX_TICK_SECONDS)).min(dur);

        let fired = self.advance(old, new, stage);

        self.clock = new;
        if new >= dur {
            self.playing = false;
        }
        fired
    }

    /// Jump the clock to `time`.
    ///
    /// Forward: every not-yet-fired call up to `time` fires exactly once,
    /// in schedule order, and tween end/interpolated states are applied.
    /// Backward: nothing fires and performed side effects are not undone,
    /// but the rendered property state is exactly what playing up to
    /// `time` would have produced; calls past the new position are
    /// re-armed and fire again when the head crosses them.
    pub fn seek(&mut self, time: f64, stage: &mut dyn Stage) -> Result<Vec<Action>, TimelineError> {
        let dur = self.duration();
        if time < 0.0 || time > dur {
            return Err(TimelineError::SeekOutOfRange {
                time,
                duration: dur,
            });
        }

        let old = self.clock;
        let fired = if time >= old {
            let mut raw = Vec::new();
            collect_calls(&mut self.entries, old, time, 0.0, &mut raw);
            finish_order(raw)
        } else {
            // Re-arm everything past the new position so a later forward
            // pass fires it again; what already ran is not undone.
            rearm_calls(&mut self.entries, time, 0.0);
            Vec::new()
        };

        render_at(&mut self.entries, time, 0.0, stage);
        self.clock = time;
        Ok(fired)
    }

    /// `seek` to a previously recorded label.
    pub fn seek_label(
        &mut self,
        name: &str,
        stage: &mut dyn Stage,
    ) -> Result<Vec<Action>, TimelineError> {
        let time = self
            .labels
            .get(name)
            .copied()
            .ok_or_else(|| TimelineError::UnknownLabel {
                name: name.to_string(),
            })?;
        self.seek(time, stage)
    }

    fn advance(&mut self, old: f64, new: f64, stage: &mut dyn Stage) -> Vec<Action> {
        // Tweens first: a call scheduled at t observes every property a
        // tween completing at or before t has written.
        advance_tweens(&mut self.entries, old, new, 0.0, stage);

        let mut raw = Vec::new();
        collect_calls(&mut self.entries, old, new, 0.0, &mut raw);
        finish_order(raw)
    }
}

/// Entry indices in schedule order: by start time, append order for
/// equal starts. Property writers later in the schedule must win over
/// earlier ones, regardless of the order blocks were appended in.
fn schedule_order(entries: &[Entry]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..entries.len()).collect();
    order.sort_by(|&a, &b| {
        entries[a]
            .start
            .partial_cmp(&entries[b].start)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order
}

/// Stable-order the collected (time, action) pairs by schedule time.
/// `Vec::sort_by` is stable, so equal times keep append order, including
/// across nested sub-timelines.
fn finish_order(mut raw: Vec<(f64, Action)>) -> Vec<Action> {
    raw.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    raw.into_iter().map(|(_, action)| action).collect()
}

/// Collect unfired calls scheduled in `[old, new]` (absolute time),
/// walking nested timelines, and mark them fired. The inclusive window
/// plus the fired flag gives exactly-once-per-crossing: a boundary call
/// that fired last tick is flagged, and a call appended at exactly the
/// current head position (the scene hand-off case) is still picked up.
fn collect_calls(
    entries: &mut [Entry],
    old: f64,
    new: f64,
    base: f64,
    out: &mut Vec<(f64, Action)>,
) {
    for entry in entries {
        let at = base + entry.start;
        match &mut entry.kind {
            EntryKind::Call { action, fired } => {
                if !*fired && at >= old && at <= new {
                    *fired = true;
                    out.push((at, action.clone()));
                }
            }
            EntryKind::Sub { timeline } => {
                collect_calls(&mut timeline.entries, old, new, at, out);
            }
            _ => {}
        }
    }
}

/// Reset fired flags for calls scheduled strictly after `time`.
fn rearm_calls(entries: &mut [Entry], time: f64, base: f64) {
    for entry in entries {
        let at = base + entry.start;
        match &mut entry.kind {
            EntryKind::Call { fired, .. } => {
                if at > time {
                    *fired = false;
                }
            }
            EntryKind::Sub { timeline } => rearm_calls(&mut timeline.entries, time, at),
            _ => {}
        }
    }
}

/// Apply tween values for a tick window: every tween overlapping
/// `[old, new]` is written at `min(new, its end)`, with the exact end
/// value once the window passes its end. The inclusive bounds keep
/// zero-length placement tweens appended at the current head (scene
/// hand-off) from being skipped; rewriting an already-final value is
/// harmless because later entries write after earlier ones.
fn advance_tweens(entries: &mut [Entry], old: f64, new: f64, base: f64, stage: &mut dyn Stage) {
    for index in schedule_order(entries) {
        let entry = &mut entries[index];
        let start = base + entry.start;
        match &mut entry.kind {
            EntryKind::Tween {
                target,
                props,
                seconds,
                ease,
                from,
                dead,
            } => {
                let end = start + *seconds;
                if start <= new && end >= old {
                    write_tween(*target, props, start, *seconds, *ease, from, dead, new, stage);
                }
            }
            EntryKind::Sub { timeline } => {
                advance_tweens(&mut timeline.entries, old, new, start, stage);
            }
            _ => {}
        }
    }
}

/// Full in-order render of every tween at absolute time `now`; used by
/// `seek`, which must reconstruct state rather than advance it. Later
/// entries write last, so overlapping writers resolve to schedule order.
fn render_at(entries: &mut [Entry], now: f64, base: f64, stage: &mut dyn Stage) {
    for index in schedule_order(entries) {
        let entry = &mut entries[index];
        let start = base + entry.start;
        match &mut entry.kind {
            EntryKind::Tween {
                target,
                props,
                seconds,
                ease,
                from,
                dead,
            } => {
                if now >= start {
                    write_tween(*target, props, start, *seconds, *ease, from, dead, now, stage);
                } else if let Some(samples) = from.take() {
                    // Head moved back before the tween: restore what it
                    // sampled, and let it re-sample on the next entry.
                    for ((prop, _), value) in props.iter().zip(samples) {
                        stage.set(*target, *prop, value);
                    }
                }
            }
            EntryKind::Sub { timeline } => {
                render_at(&mut timeline.entries, now, start, stage);
            }
            _ => {}
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn write_tween(
    target: TargetId,
    props: &[(Prop, f64)],
    start: f64,
    seconds: f64,
    ease: Ease,
    from: &mut Option<Vec<f64>>,
    dead: &mut bool,
    now: f64,
    stage: &mut dyn Stage,
) {
    if *dead {
        return;
    }
    if from.is_none() {
        let mut samples = Vec::with_capacity(props.len());
        for (prop, _) in props {
            match stage.get(target, *prop) {
                Some(value) => samples.push(value),
                None => {
                    // One broken segment must not halt the presentation.
                    log::warn!("tween target {target:?} is gone; skipping segment");
                    *dead = true;
                    return;
                }
            }
        }
        *from = Some(samples);
    }

    let Some(samples) = from.as_ref() else {
        return;
    };
    if seconds <= 0.0 || now >= start + seconds {
        // Deterministic endpoint: the authored value, not an interpolation.
        for (prop, to) in props {
            stage.set(target, *prop, *to);
        }
        return;
    }
    let t = ease.apply((now - start) / seconds);
    for ((prop, to), sampled) in props.iter().zip(samples) {
        stage.set(target, *prop, sampled + (to - sampled) * t);
    }
}

fn reset_entries(entries: &mut [Entry]) {
    for entry in entries {
        match &mut entry.kind {
            EntryKind::Tween { from, dead, .. } => {
                *from = None;
                *dead = false;
            }
            EntryKind::Call { fired, .. } => {
                *fired = false;
            }
            EntryKind::Sub { timeline } => reset_entries(&mut timeline.entries),
            _ => {}
        }
    }
}
