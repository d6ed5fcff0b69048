//! Core types for the showreel library
//!
//! This module contains the fundamental types that form the public API:
//! - Segment: one scheduled unit of work in a cue timeline
//! - Action: tagged side effects fired by the timeline, interpreted by the runner
//! - Dialogue: lines, sequences and the events the sequencer emits
//! - Scene: the fixed narrative beats and their terminal transitions
//! - Stage: handles and properties of the rendering collaborator

pub mod dialogue;
pub mod scene;
pub mod segment;
pub mod stage;

pub use dialogue::{DialogueEvent, DialogueLine, DialogueSequence};
pub use scene::{SceneId, SceneScript, Transition};
pub use segment::{Action, At, Segment, StageOp};
pub use stage::{Prop, TargetId, VisualSpec};
