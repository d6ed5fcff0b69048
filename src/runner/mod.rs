//! Top-level presentation runner
//!
//! Owns the one cue timeline, the dialogue sequencer, the audio director,
//! a stage implementation and the state store; scenes get references,
//! never globals. The runner pumps the timeline each frame and interprets
//! everything it fires: audio cues, dialogue invocations, stage ops and
//! the typed scene transitions that chain the beats together.

use crate::assets::{AssetKind, SampleSource};
use crate::audio::{AudioBackend, AudioDirector, Startup};
use crate::config::PresentationConfig;
use crate::dialogue::DialogueSequencer;
use crate::scenes::{Scene, SceneContext, all_scenes};
use crate::stage::Stage;
use crate::store::StateStore;
use crate::timeline::{CueTimeline, TimelineError};
use crate::types::dialogue::DialogueEvent;
use crate::types::scene::{SceneId, Transition};
use crate::types::segment::{Action, At, Segment, StageOp};

/// The whole show, explicitly constructed and owned by the caller.
pub struct Presentation {
    timeline: CueTimeline,
    dialogue: DialogueSequencer,
    audio: AudioDirector,
    stage: Box<dyn Stage>,
    store: StateStore,
    scenes: Vec<Box<dyn Scene>>,
    /// Transition recorded when each scene's block was appended; consumed
    /// when its terminal call fires
    transitions: std::collections::HashMap<SceneId, Transition>,
    context: SceneContext,
    paused: bool,
    finished: bool,
}

impl Presentation {
    pub fn new(
        stage: Box<dyn Stage>,
        backend: Box<dyn AudioBackend>,
        config: &PresentationConfig,
    ) -> Self {
        let mut audio = AudioDirector::new(backend);
        audio.set_music_gain(config.music_gain);
        audio.set_sfx_gain(config.sfx_gain);
        Self {
            timeline: CueTimeline::new(),
            dialogue: DialogueSequencer::new().with_default_delay_ms(config.default_char_delay_ms),
            audio,
            stage,
            store: StateStore::new(),
            scenes: all_scenes(),
            transitions: std::collections::HashMap::new(),
            context: SceneContext {
                view: config.view(),
                seed: 0x5EED,
            },
            paused: false,
            finished: false,
        }
    }

    /// Load every scene's audio manifest and bring the audio layer up.
    /// Missing samples degrade to silent cues; a source that cannot
    /// deliver anything still leaves the presentation playable.
    pub async fn prepare(&mut self, source: &dyn SampleSource) {
        for scene in &self.scenes {
            for spec in scene.audio_assets() {
                match source.load(&spec.path).await {
                    Ok(bytes) => match spec.kind {
                        AssetKind::Music => self.audio.install_music(spec.key, bytes),
                        AssetKind::Sfx => self.audio.install_sfx(spec.key, bytes),
                    },
                    Err(err) => {
                        log::warn!("asset '{}' unavailable: {err}; cue will be silent", spec.key);
                    }
                }
            }
        }
        self.audio.set_startup(Startup::Ready);
    }

    /// Report audio startup state explicitly (tests, or a host that
    /// brings the subsystem up itself).
    pub fn set_audio_startup(&mut self, startup: Startup) {
        self.audio.set_startup(startup);
    }

    /// Enter the first beat and start the clock.
    pub fn start(&mut self) -> Result<(), TimelineError> {
        self.store.set_is_playing(true);
        let first = SceneId::ALL[0];
        self.enter_scene(first)?;
        self.timeline.play();
        Ok(())
    }

    /// Advance the whole show by `dt` seconds of real time. While paused
    /// everything freezes: timeline, typewriter and audio fades alike.
    pub fn tick(&mut self, dt: f64) {
        if self.paused {
            return;
        }
        let actions = self.timeline.tick(dt, self.stage.as_mut());
        for action in actions {
            self.dispatch(action);
        }

        let events = self.dialogue.tick(dt);
        self.apply_dialogue_events(events);

        self.audio.tick(dt);
        self.store.set_timeline_progress(self.timeline.progress());
    }

    /// The external advance input (key press, click, scripted trigger).
    pub fn advance(&mut self) {
        let events = self.dialogue.advance();
        self.apply_dialogue_events(events);
    }

    /// Transport controls.
    pub fn pause(&mut self) {
        self.paused = true;
        self.timeline.pause();
        self.store.set_is_playing(false);
    }

    pub fn resume(&mut self) {
        self.paused = false;
        self.timeline.resume();
        self.store.set_is_playing(true);
    }

    /// Jump to a recorded label; forward jumps fire skipped cues.
    pub fn seek_label(&mut self, name: &str) -> Result<(), TimelineError> {
        let actions = self.timeline.seek_label(name, self.stage.as_mut())?;
        for action in actions {
            self.dispatch(action);
        }
        self.store.set_timeline_progress(self.timeline.progress());
        Ok(())
    }

    /// True once the terminal beat's transition has fired.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut StateStore {
        &mut self.store
    }

    pub fn dialogue(&self) -> &DialogueSequencer {
        &self.dialogue
    }

    pub fn timeline(&self) -> &CueTimeline {
        &self.timeline
    }

    pub fn stage(&self) -> &dyn Stage {
        self.stage.as_ref()
    }

    fn enter_scene(&mut self, id: SceneId) -> Result<(), TimelineError> {
        log::info!("entering scene '{id}'");
        self.store.set_current_scene(id);

        let Some(scene) = self.scenes.iter().find(|scene| scene.id() == id) else {
            // Unreachable with the built-in registry; degrade if a host
            // ever swaps in a partial one.
            log::error!("no scene registered for '{id}'; ending presentation");
            self.finished = true;
            self.store.set_is_playing(false);
            return Ok(());
        };

        let script = scene.build(self.stage.as_mut(), &self.context);
        self.transitions.insert(id, script.transition);

        self.timeline.add_label(format!("scene:{id}"), None);
        self.timeline.append_all(script.segments)?;
        self.timeline
            .append(Segment::call(Action::SceneFinished { scene: id }), At::End)?;
        // Appending re-opens a timeline that already ran dry.
        self.timeline.play();
        Ok(())
    }

    fn dispatch(&mut self, action: Action) {
        match action {
            Action::PlayMusic { key, looped } => self.audio.play_music(&key, looped),
            Action::StopMusic { fade_seconds } => self.audio.stop_music(fade_seconds),
            Action::PlaySfx { key } => self.audio.play_sfx(&key),
            Action::DuckMusic { gain, seconds } => self.audio.duck(gain, seconds),
            Action::RestoreMusic { seconds } => self.audio.restore(seconds),
            Action::ShowDialogue { sequence } => {
                let events = self.dialogue.show(sequence);
                self.apply_dialogue_events(events);
            }
            Action::AdvanceDialogue => self.advance(),
            Action::HideDialogue => {
                let events = self.dialogue.hide();
                self.apply_dialogue_events(events);
            }
            Action::Stage { op } => self.apply_stage_op(op),
            Action::SceneFinished { scene } => self.finish_scene(scene),
        }
    }

    fn finish_scene(&mut self, scene: SceneId) {
        match self.transitions.remove(&scene) {
            Some(Transition::Next(next)) => {
                if let Err(err) = self.enter_scene(next) {
                    // A broken block is an authoring bug, but the show
                    // must degrade, not crash the host.
                    log::error!("failed to enter scene '{next}': {err}");
                    self.finished = true;
                    self.store.set_is_playing(false);
                }
            }
            Some(Transition::End) => {
                log::info!("presentation complete");
                self.finished = true;
                self.store.set_is_playing(false);
            }
            None => {
                log::warn!("scene '{scene}' finished twice; ignoring");
            }
        }
    }

    fn apply_stage_op(&mut self, op: StageOp) {
        let applied = match &op {
            StageOp::SetText { target, text } => self.stage.set_text(*target, text),
            StageOp::SetVisible { target, visible } => self.stage.set_visible(*target, *visible),
            StageOp::Destroy { target } => {
                self.stage.destroy(*target);
                true
            }
            StageOp::Burst { x, y, count } => {
                self.stage.burst(*x, *y, *count);
                true
            }
        };
        if !applied {
            log::warn!("stage op on missing target ignored: {op:?}");
        }
    }

    fn apply_dialogue_events(&mut self, events: Vec<DialogueEvent>) {
        for event in events {
            match event {
                DialogueEvent::LineStarted { .. } => {
                    self.store.set_dialogue_active(true);
                }
                DialogueEvent::CharTyped { sfx: Some(key), .. } => {
                    self.audio.play_sfx(&key);
                }
                DialogueEvent::CharTyped { sfx: None, .. } => {}
                DialogueEvent::LineDone { .. } => {}
                DialogueEvent::SequenceDone | DialogueEvent::Hidden => {
                    self.store.set_dialogue_active(false);
                }
            }
        }
    }
}
