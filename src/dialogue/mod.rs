//! Dialogue sequencer and typewriter
//!
//! An explicit state machine: `Idle → Typing(i) → LineDone(i) →
//! Typing(i+1) → … → Idle`, driven by the per-frame tick and a single
//! external `advance` input. The sequencer owns no audio or store
//! handles; it reports what happened as `DialogueEvent`s and the runner
//! interprets them.

use crate::types::dialogue::{DEFAULT_CHAR_DELAY_MS, DialogueEvent, DialogueLine, DialogueSequence};

#[cfg(test)]
mod tests;

/// Character-by-character reveal of one line.
///
/// `revealed` counts characters, not bytes, and only ever grows within a
/// line; it resets to zero when the next line starts.
#[derive(Debug, Clone)]
pub struct TypingState {
    target: String,
    revealed: usize,
    total: usize,
    carry: f64,
    delay: f64,
}

impl TypingState {
    fn new(line: &DialogueLine, default_delay_ms: u64) -> Self {
        Self {
            target: line.text.clone(),
            revealed: 0,
            total: line.text.chars().count(),
            carry: 0.0,
            delay: line.char_delay_ms.unwrap_or(default_delay_ms) as f64 / 1000.0,
        }
    }

    /// The currently visible prefix of the line.
    pub fn visible_text(&self) -> &str {
        match self.target.char_indices().nth(self.revealed) {
            Some((byte, _)) => &self.target[..byte],
            None => &self.target,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.revealed >= self.total
    }

    fn reveal_next(&mut self) -> Option<char> {
        let next = self.target.chars().nth(self.revealed)?;
        self.revealed += 1;
        Some(next)
    }

    fn reveal_all(&mut self) {
        self.revealed = self.total;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinePhase {
    Typing,
    /// Fully displayed; the continue indicator invites the advance input
    LineDone,
}

#[derive(Debug)]
enum SequencerState {
    Idle,
    Active {
        sequence: DialogueSequence,
        index: usize,
        typing: TypingState,
        phase: LinePhase,
    },
}

/// Drives one `DialogueSequence` at a time through the typewriter.
#[derive(Debug)]
pub struct DialogueSequencer {
    state: SequencerState,
    default_delay_ms: u64,
}

impl DialogueSequencer {
    pub fn new() -> Self {
        Self {
            state: SequencerState::Idle,
            default_delay_ms: DEFAULT_CHAR_DELAY_MS,
        }
    }

    /// Override the cadence used by lines without their own delay.
    pub fn with_default_delay_ms(mut self, ms: u64) -> Self {
        self.default_delay_ms = ms;
        self
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, SequencerState::Idle)
    }

    /// Whether the continue indicator should be visible.
    pub fn indicator_visible(&self) -> bool {
        matches!(
            self.state,
            SequencerState::Active {
                phase: LinePhase::LineDone,
                ..
            }
        )
    }

    pub fn current_line_index(&self) -> Option<usize> {
        match &self.state {
            SequencerState::Active { index, .. } => Some(*index),
            SequencerState::Idle => None,
        }
    }

    pub fn current_speaker(&self) -> Option<&str> {
        match &self.state {
            SequencerState::Active {
                sequence, index, ..
            } => sequence.lines[*index].speaker.as_deref(),
            SequencerState::Idle => None,
        }
    }

    /// Text currently on screen (empty while idle).
    pub fn displayed_text(&self) -> &str {
        match &self.state {
            SequencerState::Active { typing, .. } => typing.visible_text(),
            SequencerState::Idle => "",
        }
    }

    /// Start a fresh sequence. A second `show` while one is active is a
    /// no-op; the active sequence is untouched.
    pub fn show(&mut self, sequence: DialogueSequence) -> Vec<DialogueEvent> {
        if self.is_active() {
            log::debug!("dialogue already active; ignoring show");
            return Vec::new();
        }
        if sequence.is_empty() {
            log::warn!("ignoring empty dialogue sequence");
            return Vec::new();
        }

        let typing = TypingState::new(&sequence.lines[0], self.default_delay_ms);
        let speaker = sequence.lines[0].speaker.clone();
        self.state = SequencerState::Active {
            sequence,
            index: 0,
            typing,
            phase: LinePhase::Typing,
        };
        vec![DialogueEvent::LineStarted { index: 0, speaker }]
    }

    /// Discard the active sequence without completing it.
    pub fn hide(&mut self) -> Vec<DialogueEvent> {
        if !self.is_active() {
            return Vec::new();
        }
        self.state = SequencerState::Idle;
        vec![DialogueEvent::Hidden]
    }

    /// The one external input. While typing: reveal the whole line
    /// instantly. While a completed line is showing: move to the next
    /// line, or finish the sequence after the last one.
    pub fn advance(&mut self) -> Vec<DialogueEvent> {
        let SequencerState::Active {
            sequence,
            index,
            typing,
            phase,
        } = &mut self.state
        else {
            return Vec::new();
        };

        match phase {
            LinePhase::Typing => {
                typing.reveal_all();
                *phase = LinePhase::LineDone;
                vec![DialogueEvent::LineDone { index: *index }]
            }
            LinePhase::LineDone => {
                let next = *index + 1;
                if next < sequence.lines.len() {
                    *typing = TypingState::new(&sequence.lines[next], self.default_delay_ms);
                    *index = next;
                    *phase = LinePhase::Typing;
                    vec![DialogueEvent::LineStarted {
                        index: next,
                        speaker: sequence.lines[next].speaker.clone(),
                    }]
                } else {
                    self.state = SequencerState::Idle;
                    vec![DialogueEvent::SequenceDone]
                }
            }
        }
    }

    /// Advance the typewriter by `dt` seconds. Reveals as many characters
    /// as the per-character cadence allows, reporting each one; reaching
    /// the end of the line transitions to `LineDone` on its own.
    pub fn tick(&mut self, dt: f64) -> Vec<DialogueEvent> {
        let SequencerState::Active {
            sequence,
            index,
            typing,
            phase,
        } = &mut self.state
        else {
            return Vec::new();
        };
        if *phase != LinePhase::Typing {
            return Vec::new();
        }

        // Tolerance keeps accumulated float error from postponing a
        // character by a whole period.
        const SLACK: f64 = 1e-9;

        let mut events = Vec::new();
        typing.carry += dt;
        while typing.carry + SLACK >= typing.delay && !typing.is_complete() {
            typing.carry -= typing.delay;
            let Some(ch) = typing.reveal_next() else { break };

            let sfx = if ch != ' ' {
                sequence.lines[*index].tick_sfx.clone()
            } else {
                None
            };
            events.push(DialogueEvent::CharTyped { ch, sfx });
        }

        if typing.is_complete() {
            *phase = LinePhase::LineDone;
            events.push(DialogueEvent::LineDone { index: *index });
        }
        events
    }
}

impl Default for DialogueSequencer {
    fn default() -> Self {
        Self::new()
    }
}
