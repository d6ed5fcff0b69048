//! Scene identifiers, terminal transitions and scene scripts

use crate::types::segment::{Action, At, Segment};
use serde::{Deserialize, Serialize};

/// The fixed, strictly linear sequence of narrative beats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneId {
    ColdOpen,
    Interruption,
    Title,
    StartingRoom,
    ArcadeWorld,
    BlockWorld,
    SandboxWorld,
    OnlineWorld,
    Campus,
    Finale,
}

impl SceneId {
    /// All beats in presentation order.
    pub const ALL: [SceneId; 10] = [
        SceneId::ColdOpen,
        SceneId::Interruption,
        SceneId::Title,
        SceneId::StartingRoom,
        SceneId::ArcadeWorld,
        SceneId::BlockWorld,
        SceneId::SandboxWorld,
        SceneId::OnlineWorld,
        SceneId::Campus,
        SceneId::Finale,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SceneId::ColdOpen => "cold_open",
            SceneId::Interruption => "interruption",
            SceneId::Title => "title",
            SceneId::StartingRoom => "starting_room",
            SceneId::ArcadeWorld => "arcade_world",
            SceneId::BlockWorld => "block_world",
            SceneId::SandboxWorld => "sandbox_world",
            SceneId::OnlineWorld => "online_world",
            SceneId::Campus => "campus",
            SceneId::Finale => "finale",
        }
    }
}

impl std::fmt::Display for SceneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed terminal transition returned by a scene, interpreted by the
/// runner. Narrative order lives here, not inside scene bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    Next(SceneId),
    End,
}

/// A scene's contribution to the shared cue timeline: an ordered list of
/// positioned segments plus the transition taken when the block finishes.
#[derive(Debug, Clone)]
pub struct SceneScript {
    pub segments: Vec<(Segment, At)>,
    pub transition: Transition,
}

impl SceneScript {
    pub fn new(transition: Transition) -> Self {
        Self {
            segments: Vec::new(),
            transition,
        }
    }

    /// Append a segment at an explicit position.
    pub fn push(&mut self, segment: Segment, at: At) {
        self.segments.push((segment, at));
    }

    /// Append a segment at the end of the block.
    pub fn then(&mut self, segment: Segment) {
        self.push(segment, At::End);
    }

    pub fn wait(&mut self, seconds: f64) {
        self.then(Segment::Wait { seconds });
    }

    pub fn call(&mut self, action: Action) {
        self.then(Segment::Call { action });
    }

    pub fn label(&mut self, name: impl Into<String>) {
        self.then(Segment::Label { name: name.into() });
    }
}
