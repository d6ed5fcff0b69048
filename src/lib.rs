//! # showreel
//!
//! A linear, scripted cutscene presentation engine: one shared, seekable
//! cue timeline composes every scene's tweens, waits, labels and action
//! calls into a single deterministic playback stream, synchronized with a
//! character-by-character dialogue sequencer and an audio cue layer.
//!
//! Rendering and sample playback are external collaborators behind the
//! [`stage::Stage`] and [`audio::AudioBackend`] traits; the in-memory
//! implementations back tests and the headless CLI player.
//!
//! ## Quick Start
//!
//! ```rust
//! use showreel::{At, CueTimeline, Ease, MemoryStage, Prop, Segment};
//! use showreel::stage::Stage;
//! use showreel::types::VisualSpec;
//!
//! # fn main() -> Result<(), showreel::TimelineError> {
//! let mut stage = MemoryStage::new();
//! let hero = stage.spawn(VisualSpec::new("hero", 0.0, 0.0));
//!
//! let mut timeline = CueTimeline::new();
//! timeline.append(
//!     Segment::tween1(hero, Prop::X, 100.0, 1.0, Ease::QuadOut),
//!     At::End,
//! )?;
//! timeline.play();
//!
//! // One frame of playback; the tween endpoint lands exactly at 100.
//! timeline.tick(0.016, &mut stage);
//! timeline.seek(1.0, &mut stage)?;
//! assert_eq!(stage.get(hero, Prop::X), Some(100.0));
//! # Ok(())
//! # }
//! ```
//!
//! ## Running the whole show
//!
//! [`runner::Presentation`] owns the timeline, the dialogue sequencer,
//! the audio director and the store; scenes append their blocks and chain
//! through typed transitions. See `src/cli/play.rs` for the headless
//! driver.

pub mod assets;
pub mod audio;
pub mod cli;
pub mod compose;
pub mod config;
pub mod cursor;
pub mod dialogue;
pub mod runner;
pub mod scenes;
pub mod stage;
pub mod store;
pub mod timeline;
pub mod types;

// The main API surface for library users.
pub use audio::{AudioBackend, AudioDirector, MemoryBackend, Startup};
pub use config::{PresentationConfig, load_config};
pub use dialogue::DialogueSequencer;
pub use runner::Presentation;
pub use stage::{MemoryStage, Stage};
pub use store::{Snapshot, StateStore};
pub use timeline::{CueTimeline, Ease, TimelineError};
pub use types::{
    Action, At, DialogueEvent, DialogueLine, DialogueSequence, Prop, SceneId, Segment, StageOp,
    TargetId, Transition,
};
