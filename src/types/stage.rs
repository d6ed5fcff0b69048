//! Handles and animatable properties of the rendering collaborator

use serde::{Deserialize, Serialize};

/// Opaque handle to a visual object owned by the stage.
///
/// Two targets are reserved: the camera and the full-screen overlay used
/// for fades and flashes. Everything else is allocated by `Stage::spawn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetId(pub u32);

impl TargetId {
    /// The camera; animate it through `Prop::ScrollX`/`ScrollY`/`Zoom`.
    pub const CAMERA: TargetId = TargetId(0);
    /// Full-screen overlay rectangle; animate `Prop::Alpha` for fades.
    pub const OVERLAY: TargetId = TargetId(1);

    /// First id handed out for spawned visuals.
    pub const FIRST_SPAWNED: u32 = 2;
}

/// Numeric properties a tween can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prop {
    X,
    Y,
    ScaleX,
    ScaleY,
    Alpha,
    Rotation,
    Depth,
    ScrollX,
    ScrollY,
    Zoom,
}

/// Declarative description of a visual object to place on the stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualSpec {
    /// Asset key of the sprite or text object
    pub key: String,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub alpha: f64,
    pub depth: f64,
    pub rotation: f64,
    pub visible: bool,
    /// Initial text content for text objects
    pub text: Option<String>,
}

impl VisualSpec {
    pub fn new(key: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            key: key.into(),
            x,
            y,
            scale: 1.0,
            alpha: 1.0,
            depth: 0.0,
            rotation: 0.0,
            visible: true,
            text: None,
        }
    }

    /// A text object, initially empty unless content is given.
    pub fn text(key: impl Into<String>, x: f64, y: f64, content: impl Into<String>) -> Self {
        let mut spec = Self::new(key, x, y);
        spec.text = Some(content.into());
        spec
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_depth(mut self, depth: f64) -> Self {
        self.depth = depth;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}
