//! Dialogue sequences and the events the sequencer emits

use serde::{Deserialize, Serialize};

/// Default per-character reveal delay, in milliseconds.
pub const DEFAULT_CHAR_DELAY_MS: u64 = 30;

/// One line of typed dialogue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DialogueLine {
    /// Speaker name (None for narration)
    pub speaker: Option<String>,
    pub text: String,
    /// Per-character delay override, in milliseconds
    pub char_delay_ms: Option<u64>,
    /// Sfx cue triggered on each revealed non-space character
    pub tick_sfx: Option<String>,
}

impl DialogueLine {
    pub fn spoken(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: Some(speaker.into()),
            text: text.into(),
            char_delay_ms: None,
            tick_sfx: None,
        }
    }

    pub fn narration(text: impl Into<String>) -> Self {
        Self {
            speaker: None,
            text: text.into(),
            char_delay_ms: None,
            tick_sfx: None,
        }
    }

    pub fn with_delay_ms(mut self, ms: u64) -> Self {
        self.char_delay_ms = Some(ms);
        self
    }

    pub fn with_tick_sfx(mut self, key: impl Into<String>) -> Self {
        self.tick_sfx = Some(key.into());
        self
    }
}

/// An ordered run of dialogue lines, created fresh per invocation and
/// discarded once completed or hidden
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DialogueSequence {
    pub lines: Vec<DialogueLine>,
}

impl DialogueSequence {
    pub fn new(lines: Vec<DialogueLine>) -> Self {
        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// What the sequencer reports back to the runner each pump
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum DialogueEvent {
    /// A new line began typing; displayed text was reset to empty
    LineStarted {
        index: usize,
        speaker: Option<String>,
    },
    /// One character was revealed; `sfx` is set for non-space characters
    /// of lines that declare a tick sound
    CharTyped { ch: char, sfx: Option<String> },
    /// The line is fully displayed and the continue indicator is visible
    LineDone { index: usize },
    /// The last line was advanced past; the sequence is discarded
    SequenceDone,
    /// The sequence was discarded without completing
    Hidden,
}
