//! Prefab effect composition
//!
//! Pure helpers that build `Segment`s for the common visual effects:
//! fades, pans, shakes, flashes, glitches, bounces and typewriter runs.
//! Nothing here touches a stage or a clock; callers append the result to
//! their position in the cue timeline.

use crate::timeline::{CueTimeline, Ease};
use crate::types::segment::{Action, Segment, StageOp};
use crate::types::stage::{Prop, TargetId};

/// Fade a target's opacity.
pub fn fade_to(target: TargetId, alpha: f64, seconds: f64) -> Segment {
    Segment::tween1(target, Prop::Alpha, alpha, seconds, Ease::QuadInOut)
}

/// Glide a target to a position.
pub fn move_to(target: TargetId, x: f64, y: f64, seconds: f64, ease: Ease) -> Segment {
    Segment::Tween {
        target,
        props: vec![(Prop::X, x), (Prop::Y, y)],
        seconds,
        ease,
    }
}

/// Scale a target uniformly.
pub fn scale_to(target: TargetId, scale: f64, seconds: f64, ease: Ease) -> Segment {
    Segment::Tween {
        target,
        props: vec![(Prop::ScaleX, scale), (Prop::ScaleY, scale)],
        seconds,
        ease,
    }
}

/// One step of a keyframed sprite run.
#[derive(Debug, Clone)]
pub struct Keyframe {
    pub x: f64,
    pub y: f64,
    pub seconds: f64,
    pub ease: Ease,
    pub scale: Option<f64>,
    pub alpha: Option<f64>,
    pub rotation: Option<f64>,
}

impl Keyframe {
    pub fn new(x: f64, y: f64, seconds: f64) -> Self {
        Self {
            x,
            y,
            seconds,
            ease: Ease::Linear,
            scale: None,
            alpha: None,
            rotation: None,
        }
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = Some(rotation);
        self
    }
}

/// Run a sprite through keyframes as a self-contained sub-timeline.
/// Consecutive steps overlap slightly so the motion reads as one gesture;
/// scale/alpha/rotation changes ride along with their step.
pub fn keyframes(target: TargetId, steps: &[Keyframe]) -> Segment {
    let mut timeline = CueTimeline::new();
    for (i, step) in steps.iter().enumerate() {
        let motion = move_to(target, step.x, step.y, step.seconds, step.ease);
        if i == 0 {
            timeline.push(motion);
        } else {
            timeline.push_offset(motion, -step.seconds * 0.1);
        }

        let mut extra = Vec::new();
        if let Some(scale) = step.scale {
            extra.push((Prop::ScaleX, scale));
            extra.push((Prop::ScaleY, scale));
        }
        if let Some(alpha) = step.alpha {
            extra.push((Prop::Alpha, alpha));
        }
        if let Some(rotation) = step.rotation {
            extra.push((Prop::Rotation, rotation));
        }
        if !extra.is_empty() {
            // Rides along with the motion step it belongs to.
            timeline.push_offset(
                Segment::Tween {
                    target,
                    props: extra,
                    seconds: step.seconds,
                    ease: step.ease,
                },
                -step.seconds,
            );
        }
    }
    Segment::Sub { timeline }
}

/// Pan the camera so `(x, y)` lands in the center of the view.
pub fn camera_pan(x: f64, y: f64, view: (f64, f64), seconds: f64, ease: Ease) -> Segment {
    Segment::Tween {
        target: TargetId::CAMERA,
        props: vec![
            (Prop::ScrollX, x - view.0 / 2.0),
            (Prop::ScrollY, y - view.1 / 2.0),
        ],
        seconds,
        ease,
    }
}

pub fn camera_zoom(zoom: f64, seconds: f64, ease: Ease) -> Segment {
    Segment::tween1(TargetId::CAMERA, Prop::Zoom, zoom, seconds, ease)
}

/// Fade the full-screen overlay toward `alpha` (1 = black).
pub fn fade_screen(alpha: f64, seconds: f64) -> Segment {
    Segment::tween1(TargetId::OVERLAY, Prop::Alpha, alpha, seconds, Ease::QuadInOut)
}

/// Quick overlay flash: snap bright, then decay back to clear.
pub fn screen_flash(seconds: f64) -> Segment {
    let mut timeline = CueTimeline::new();
    timeline.push(Segment::tween1(
        TargetId::OVERLAY,
        Prop::Alpha,
        0.8,
        seconds * 0.1,
        Ease::QuadOut,
    ));
    timeline.push(Segment::tween1(
        TargetId::OVERLAY,
        Prop::Alpha,
        0.0,
        seconds * 0.9,
        Ease::QuadIn,
    ));
    Segment::Sub { timeline }
}

/// Rattle the camera around its current scroll position, ending exactly
/// back at `(base_x, base_y)`. Offsets are seeded so the shake is
/// deterministic and replays identically after a seek.
pub fn camera_shake(base_x: f64, base_y: f64, intensity: f64, seconds: f64, seed: u64) -> Segment {
    let mut jitter = Jitter::new(seed);
    let step = seconds / 10.0;
    let mut timeline = CueTimeline::new();
    for _ in 0..5 {
        let dx = jitter.offset(intensity);
        let dy = jitter.offset(intensity);
        timeline.push(Segment::Tween {
            target: TargetId::CAMERA,
            props: vec![(Prop::ScrollX, base_x + dx), (Prop::ScrollY, base_y + dy)],
            seconds: step,
            ease: Ease::Linear,
        });
    }
    timeline.push(Segment::Tween {
        target: TargetId::CAMERA,
        props: vec![(Prop::ScrollX, base_x), (Prop::ScrollY, base_y)],
        seconds: step,
        ease: Ease::Linear,
    });
    Segment::Sub { timeline }
}

/// Jitter a sprite around its resting point, then snap it back.
pub fn glitch(target: TargetId, base_x: f64, base_y: f64, intensity: f64, seed: u64) -> Segment {
    let mut jitter = Jitter::new(seed);
    let mut timeline = CueTimeline::new();
    for _ in 0..8 {
        timeline.push(move_to(
            target,
            base_x + jitter.offset(intensity),
            base_y + jitter.offset(intensity),
            0.02,
            Ease::Linear,
        ));
    }
    timeline.push(move_to(target, base_x, base_y, 0.02, Ease::Linear));
    Segment::Sub { timeline }
}

/// Hop a sprite up from `base_y` and drop it back with a bounce.
pub fn bounce(target: TargetId, base_y: f64, height: f64, seconds: f64) -> Segment {
    let mut timeline = CueTimeline::new();
    timeline.push(Segment::tween1(
        target,
        Prop::Y,
        base_y - height,
        seconds / 2.0,
        Ease::QuadOut,
    ));
    timeline.push(Segment::tween1(
        target,
        Prop::Y,
        base_y,
        seconds / 2.0,
        Ease::BounceOut,
    ));
    Segment::Sub { timeline }
}

/// One-shot particle burst at a point.
pub fn particle_burst(x: f64, y: f64, count: u32) -> Segment {
    Segment::call(Action::Stage {
        op: StageOp::Burst { x, y, count },
    })
}

/// Reveal text on a stage object character by character, as a
/// self-contained sub-timeline of `SetText` calls. This is the caption
/// typewriter; spoken dialogue goes through the dialogue sequencer.
pub fn typewriter_run(target: TargetId, text: &str, char_delay_ms: u64) -> Segment {
    let delay = char_delay_ms as f64 / 1000.0;
    let mut timeline = CueTimeline::new();
    for (byte, ch) in text.char_indices() {
        let shown = text[..byte + ch.len_utf8()].to_string();
        timeline.push(Segment::Wait { seconds: delay });
        timeline.push(Segment::call(Action::Stage {
            op: StageOp::SetText {
                target,
                text: shown,
            },
        }));
    }
    Segment::Sub { timeline }
}

/// Deterministic jitter source for shakes and glitches.
struct Jitter {
    state: u64,
}

impl Jitter {
    fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1,
        }
    }

    /// Uniform-ish offset in `(-intensity/2, intensity/2)`.
    fn offset(&mut self, intensity: f64) -> f64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        let unit = (self.state >> 11) as f64 / (1u64 << 53) as f64;
        (unit - 0.5) * intensity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyframed_run_overlaps_steps() {
        let steps = [
            Keyframe::new(10.0, 0.0, 1.0),
            Keyframe::new(20.0, 0.0, 1.0).with_alpha(0.5),
        ];
        let Segment::Sub { timeline } = keyframes(TargetId(7), &steps) else {
            panic!("keyframes builds a sub-timeline");
        };
        // Second step starts 0.1s before the first ends.
        assert!((timeline.duration() - 1.9).abs() < 1e-9);
    }

    #[test]
    fn typewriter_run_schedules_one_call_per_character() {
        let Segment::Sub { timeline } = typewriter_run(TargetId(7), "héllo", 50) else {
            panic!("typewriter_run builds a sub-timeline");
        };
        // One wait plus one call per character.
        assert_eq!(timeline.segment_count(), 10);
        assert!((timeline.duration() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn shake_is_deterministic_per_seed() {
        let a = camera_shake(0.0, 0.0, 5.0, 0.5, 42);
        let b = camera_shake(0.0, 0.0, 5.0, 0.5, 42);
        let (Segment::Sub { timeline: ta }, Segment::Sub { timeline: tb }) = (a, b) else {
            panic!("camera_shake builds sub-timelines");
        };
        assert_eq!(
            serde_json::to_string(&ta).expect("serializes"),
            serde_json::to_string(&tb).expect("serializes"),
        );
    }

    #[test]
    fn bounce_returns_to_base() {
        let Segment::Sub { timeline } = bounce(TargetId(7), 100.0, 20.0, 0.5) else {
            panic!("bounce builds a sub-timeline");
        };
        assert!((timeline.duration() - 0.5).abs() < 1e-9);
    }
}
