//! Interaction illusionist
//!
//! Scripted, non-real cursor motion for narrative effect: the cursor is
//! an ordinary stage sprite and every "interaction" is a tween/call
//! composition appended into the caller's position in the cue timeline.
//! The rig carries no narrative state, only where the cursor currently is
//! and whether it shows.

use crate::compose;
use crate::stage::Stage;
use crate::timeline::{CueTimeline, Ease};
use crate::types::segment::{Action, Segment, StageOp};
use crate::types::stage::{Prop, TargetId, VisualSpec};

/// Resting scale of the cursor sprite; clicks pulse below it.
const CURSOR_SCALE: f64 = 2.0;
const CLICK_SCALE: f64 = 1.5;

/// The scripted cursor.
pub struct CursorRig {
    target: TargetId,
    x: f64,
    y: f64,
    visible: bool,
}

impl CursorRig {
    /// Spawn the cursor sprite, hidden, above everything else.
    pub fn new(stage: &mut dyn Stage) -> Self {
        let target = stage.spawn(
            VisualSpec::new("cursor", 0.0, 0.0)
                .with_scale(CURSOR_SCALE)
                .with_depth(10_000.0)
                .hidden(),
        );
        Self {
            target,
            x: 0.0,
            y: 0.0,
            visible: false,
        }
    }

    pub fn target(&self) -> TargetId {
        self.target
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Snap to a position and appear.
    pub fn show(&mut self, x: f64, y: f64) -> Vec<Segment> {
        self.x = x;
        self.y = y;
        self.visible = true;
        vec![
            Segment::Tween {
                target: self.target,
                props: vec![(Prop::X, x), (Prop::Y, y)],
                seconds: 0.0,
                ease: Ease::Linear,
            },
            Segment::call(Action::Stage {
                op: StageOp::SetVisible {
                    target: self.target,
                    visible: true,
                },
            }),
        ]
    }

    pub fn hide(&mut self) -> Segment {
        self.visible = false;
        Segment::call(Action::Stage {
            op: StageOp::SetVisible {
                target: self.target,
                visible: false,
            },
        })
    }

    /// Glide the cursor to a point.
    pub fn move_to(&mut self, x: f64, y: f64, seconds: f64, ease: Ease) -> Segment {
        self.x = x;
        self.y = y;
        compose::move_to(self.target, x, y, seconds, ease)
    }

    /// Press-and-release pulse with a click burst at the midpoint.
    pub fn click(&mut self, seconds: f64) -> Segment {
        let mut timeline = CueTimeline::new();
        timeline.push(compose::scale_to(
            self.target,
            CLICK_SCALE,
            seconds * 0.5,
            Ease::QuadOut,
        ));
        timeline.push(compose::particle_burst(self.x, self.y, 6));
        timeline.push(compose::scale_to(
            self.target,
            CURSOR_SCALE,
            seconds * 0.5,
            Ease::QuadOut,
        ));
        Segment::Sub { timeline }
    }

    /// Hover over a point, then click it.
    pub fn hover_and_click(
        &mut self,
        x: f64,
        y: f64,
        hover_seconds: f64,
        click_seconds: f64,
    ) -> Vec<Segment> {
        vec![
            self.move_to(x, y, hover_seconds, Ease::QuadInOut),
            self.click(click_seconds),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::MemoryStage;

    #[test]
    fn rig_tracks_authored_position() {
        let mut stage = MemoryStage::new();
        let mut cursor = CursorRig::new(&mut stage);
        cursor.show(10.0, 10.0);
        cursor.move_to(50.0, 60.0, 0.5, Ease::QuadInOut);
        assert_eq!(cursor.position(), (50.0, 60.0));
        assert!(cursor.is_visible());
        cursor.hide();
        assert!(!cursor.is_visible());
    }

    #[test]
    fn click_pulses_down_and_back_with_a_burst() {
        let mut stage = MemoryStage::new();
        let mut cursor = CursorRig::new(&mut stage);
        cursor.show(30.0, 40.0);

        let Segment::Sub { timeline } = cursor.click(0.1) else {
            panic!("click builds a sub-timeline");
        };
        assert_eq!(timeline.segment_count(), 3);
        assert!((timeline.duration() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn cursor_spawns_hidden_on_top() {
        let mut stage = MemoryStage::new();
        let cursor = CursorRig::new(&mut stage);
        let visual = stage.visual(cursor.target()).expect("cursor exists");
        assert!(!visual.visible);
        assert_eq!(visual.props[&crate::types::stage::Prop::Depth], 10_000.0);
    }
}
