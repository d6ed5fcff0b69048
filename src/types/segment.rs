//! Segment and action descriptors for the cue timeline
//!
//! Segments are data, not executed code. Scenes build them, the timeline
//! schedules them, and the runner interprets the actions they fire. No
//! closures cross the orchestrator boundary, so the whole schedule can be
//! inspected, serialized and tested without a rendering engine.

use crate::timeline::{CueTimeline, Ease};
use crate::types::dialogue::DialogueSequence;
use crate::types::scene::SceneId;
use crate::types::stage::{Prop, TargetId};
use serde::{Deserialize, Serialize};

/// One scheduled unit of work within a cue timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Segment {
    /// Pure time advance
    Wait { seconds: f64 },
    /// Fires its action instantaneously at the scheduled time
    Call { action: Action },
    /// Interpolates named numeric properties of a target from their
    /// current values to the given end values
    Tween {
        target: TargetId,
        props: Vec<(Prop, f64)>,
        seconds: f64,
        ease: Ease,
    },
    /// Named bookmark at the segment's position, usable for seeking and
    /// for anchoring later appends
    Label { name: String },
    /// Nested timeline inserted at a point; self-contained multi-step
    /// effects (camera shake, particle burst, typewriter run)
    Sub { timeline: CueTimeline },
}

impl Segment {
    /// Convenience for a single-property tween.
    pub fn tween1(target: TargetId, prop: Prop, end: f64, seconds: f64, ease: Ease) -> Self {
        Segment::Tween {
            target,
            props: vec![(prop, end)],
            seconds,
            ease,
        }
    }

    pub fn call(action: Action) -> Self {
        Segment::Call { action }
    }

    pub fn wait(seconds: f64) -> Self {
        Segment::Wait { seconds }
    }
}

/// Where to place an appended segment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum At {
    /// After everything appended so far
    End,
    /// Relative to a named label; offset may be negative
    Label { name: String, offset: f64 },
    /// Relative to the end of the previously appended segment; a negative
    /// offset overlaps its tail (staggered parallel tweens)
    Relative { offset: f64 },
}

impl At {
    pub fn label(name: impl Into<String>, offset: f64) -> Self {
        At::Label {
            name: name.into(),
            offset,
        }
    }
}

/// Side effect fired by a `Call` segment, interpreted by the runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Action {
    /// Start a music cue, replacing any currently playing track
    PlayMusic { key: String, looped: bool },
    /// Fade the current track to silence, then stop it
    StopMusic { fade_seconds: f64 },
    /// Trigger a sound effect cue, restarting it if mid-play
    PlaySfx { key: String },
    /// Ramp the current track's gain toward a lower target
    DuckMusic { gain: f64, seconds: f64 },
    /// Ramp the current track's gain back to nominal
    RestoreMusic { seconds: f64 },
    /// Hand a fresh sequence to the dialogue sequencer
    ShowDialogue { sequence: DialogueSequence },
    /// Scripted advance, equivalent to the external input
    AdvanceDialogue,
    /// Discard the active sequence, if any
    HideDialogue,
    /// Instant stage mutation
    Stage { op: StageOp },
    /// Terminal marker of a scene's segment block; the runner looks up
    /// the scene's recorded transition when this fires
    SceneFinished { scene: SceneId },
}

/// Instant, non-interpolated stage mutations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StageOp {
    SetText { target: TargetId, text: String },
    SetVisible { target: TargetId, visible: bool },
    Destroy { target: TargetId },
    /// One-shot particle burst at a point
    Burst { x: f64, y: f64, count: u32 },
}
