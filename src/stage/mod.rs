//! Rendering collaborator seam
//!
//! The timeline and scenes never draw anything; they talk to a `Stage`
//! implementation through handles and numeric properties. The camera and
//! the full-screen fade overlay are reserved targets animated through the
//! same property channel as any sprite. `MemoryStage` backs tests and the
//! headless CLI player.

use crate::types::stage::{Prop, TargetId, VisualSpec};
use std::collections::HashMap;

/// Capability set the presentation core needs from a renderer.
pub trait Stage {
    /// Create a positioned visual object and return its handle.
    fn spawn(&mut self, spec: VisualSpec) -> TargetId;

    fn exists(&self, target: TargetId) -> bool;

    /// Read a numeric property. `None` if the target is gone or the
    /// property does not apply to it.
    fn get(&self, target: TargetId, prop: Prop) -> Option<f64>;

    /// Write a numeric property. Returns false if the target is gone.
    fn set(&mut self, target: TargetId, prop: Prop, value: f64) -> bool;

    fn set_text(&mut self, target: TargetId, text: &str) -> bool;

    fn set_visible(&mut self, target: TargetId, visible: bool) -> bool;

    fn destroy(&mut self, target: TargetId);

    /// One-shot particle burst at a point; purely visual.
    fn burst(&mut self, x: f64, y: f64, count: u32);
}

/// One visual object held by the in-memory stage.
#[derive(Debug, Clone)]
pub struct Visual {
    pub key: String,
    pub props: HashMap<Prop, f64>,
    pub text: Option<String>,
    pub visible: bool,
}

/// In-memory stage: a property store with no rendering at all.
#[derive(Debug)]
pub struct MemoryStage {
    visuals: HashMap<TargetId, Visual>,
    next_id: u32,
    bursts: Vec<(f64, f64, u32)>,
}

impl MemoryStage {
    pub fn new() -> Self {
        let mut visuals = HashMap::new();
        visuals.insert(
            TargetId::CAMERA,
            Visual {
                key: "camera".to_string(),
                props: HashMap::from([(Prop::ScrollX, 0.0), (Prop::ScrollY, 0.0), (Prop::Zoom, 1.0)]),
                text: None,
                visible: true,
            },
        );
        visuals.insert(
            TargetId::OVERLAY,
            Visual {
                key: "overlay".to_string(),
                props: HashMap::from([(Prop::Alpha, 0.0)]),
                text: None,
                visible: true,
            },
        );
        Self {
            visuals,
            next_id: TargetId::FIRST_SPAWNED,
            bursts: Vec::new(),
        }
    }

    pub fn visual(&self, target: TargetId) -> Option<&Visual> {
        self.visuals.get(&target)
    }

    pub fn visual_count(&self) -> usize {
        self.visuals.len()
    }

    pub fn burst_count(&self) -> usize {
        self.bursts.len()
    }

    /// Remove everything a scene spawned, keeping the reserved targets.
    pub fn clear_spawned(&mut self) {
        self.visuals
            .retain(|id, _| *id == TargetId::CAMERA || *id == TargetId::OVERLAY);
    }
}

impl Default for MemoryStage {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle so a host or test can keep inspecting the stage while
/// the presentation owns it.
impl Stage for std::rc::Rc<std::cell::RefCell<MemoryStage>> {
    fn spawn(&mut self, spec: VisualSpec) -> TargetId {
        self.borrow_mut().spawn(spec)
    }

    fn exists(&self, target: TargetId) -> bool {
        self.borrow().exists(target)
    }

    fn get(&self, target: TargetId, prop: Prop) -> Option<f64> {
        self.borrow().get(target, prop)
    }

    fn set(&mut self, target: TargetId, prop: Prop, value: f64) -> bool {
        self.borrow_mut().set(target, prop, value)
    }

    fn set_text(&mut self, target: TargetId, text: &str) -> bool {
        self.borrow_mut().set_text(target, text)
    }

    fn set_visible(&mut self, target: TargetId, visible: bool) -> bool {
        self.borrow_mut().set_visible(target, visible)
    }

    fn destroy(&mut self, target: TargetId) {
        self.borrow_mut().destroy(target);
    }

    fn burst(&mut self, x: f64, y: f64, count: u32) {
        self.borrow_mut().burst(x, y, count);
    }
}

impl Stage for MemoryStage {
    fn spawn(&mut self, spec: VisualSpec) -> TargetId {
        let id = TargetId(self.next_id);
        self.next_id += 1;

        let props = HashMap::from([
            (Prop::X, spec.x),
            (Prop::Y, spec.y),
            (Prop::ScaleX, spec.scale),
            (Prop::ScaleY, spec.scale),
            (Prop::Alpha, spec.alpha),
            (Prop::Rotation, spec.rotation),
            (Prop::Depth, spec.depth),
        ]);
        self.visuals.insert(
            id,
            Visual {
                key: spec.key,
                props,
                text: spec.text,
                visible: spec.visible,
            },
        );
        id
    }

    fn exists(&self, target: TargetId) -> bool {
        self.visuals.contains_key(&target)
    }

    fn get(&self, target: TargetId, prop: Prop) -> Option<f64> {
        self.visuals.get(&target)?.props.get(&prop).copied()
    }

    fn set(&mut self, target: TargetId, prop: Prop, value: f64) -> bool {
        match self.visuals.get_mut(&target) {
            Some(visual) => {
                visual.props.insert(prop, value);
                true
            }
            None => false,
        }
    }

    fn set_text(&mut self, target: TargetId, text: &str) -> bool {
        match self.visuals.get_mut(&target) {
            Some(visual) => {
                visual.text = Some(text.to_string());
                true
            }
            None => false,
        }
    }

    fn set_visible(&mut self, target: TargetId, visible: bool) -> bool {
        match self.visuals.get_mut(&target) {
            Some(visual) => {
                visual.visible = visible;
                true
            }
            None => false,
        }
    }

    fn destroy(&mut self, target: TargetId) {
        self.visuals.remove(&target);
    }

    fn burst(&mut self, x: f64, y: f64, count: u32) {
        self.bursts.push((x, y, count));
    }
}
