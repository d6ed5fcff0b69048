//! Audio cue layer
//!
//! Keyed lookup from logical cue names to loaded samples, with separate
//! music and sound-effect namespaces. At most one music track is active;
//! replacing it is a clean stop-then-start, never an overlap. Fades are
//! scheduled time like everything else and complete through `tick`.
//!
//! The sample playback itself is an external collaborator behind
//! `AudioBackend`. Startup of that subsystem is asynchronous and may fail;
//! every cue call before readiness logs and degrades to a no-op so the
//! presentation continues visually.

use std::collections::HashSet;

/// Capability set required from the sample playback collaborator.
/// Gains are linear in [0, 1]; a backend maps them to its own scale.
pub trait AudioBackend {
    /// Register a decoded sample under a key.
    fn load(&mut self, key: &str, bytes: Vec<u8>);
    fn is_loaded(&self, key: &str) -> bool;
    /// Start playback from the beginning.
    fn start(&mut self, key: &str, looped: bool);
    fn stop(&mut self, key: &str);
    fn set_gain(&mut self, key: &str, gain: f64);
    /// Ramp the key's gain toward `target` over `seconds`.
    fn ramp_gain(&mut self, key: &str, target: f64, seconds: f64);
}

/// Audio subsystem startup progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Startup {
    /// Still coming up; cues are dropped with a warning
    Pending,
    Ready,
    /// Came up broken; the show goes on without sound
    Failed,
}

/// Nominal gains, mirroring the original presentation's mix.
pub const DEFAULT_MUSIC_GAIN: f64 = 0.5;
pub const DEFAULT_SFX_GAIN: f64 = 0.7;

#[derive(Debug)]
struct PendingStop {
    key: String,
    remaining: f64,
}

/// Front of the audio layer: cue registry plus transport rules.
pub struct AudioDirector {
    backend: Box<dyn AudioBackend>,
    startup: Startup,
    music: HashSet<String>,
    sfx: HashSet<String>,
    current_music: Option<String>,
    music_gain: f64,
    sfx_gain: f64,
    pending_stop: Option<PendingStop>,
}

impl AudioDirector {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            startup: Startup::Pending,
            music: HashSet::new(),
            sfx: HashSet::new(),
            current_music: None,
            music_gain: DEFAULT_MUSIC_GAIN,
            sfx_gain: DEFAULT_SFX_GAIN,
            pending_stop: None,
        }
    }

    /// Report the outcome of the asynchronous subsystem startup.
    pub fn set_startup(&mut self, startup: Startup) {
        if startup == Startup::Failed {
            log::warn!("audio subsystem failed to start; continuing without sound");
        }
        self.startup = startup;
    }

    pub fn is_ready(&self) -> bool {
        self.startup == Startup::Ready
    }

    pub fn install_music(&mut self, key: impl Into<String>, bytes: Vec<u8>) {
        let key = key.into();
        self.backend.load(&full_key("music", &key), bytes);
        self.music.insert(key);
    }

    pub fn install_sfx(&mut self, key: impl Into<String>, bytes: Vec<u8>) {
        let key = key.into();
        self.backend.load(&full_key("sfx", &key), bytes);
        self.sfx.insert(key);
    }

    pub fn has_music(&self, key: &str) -> bool {
        self.music.contains(key)
    }

    pub fn has_sfx(&self, key: &str) -> bool {
        self.sfx.contains(key)
    }

    pub fn current_music(&self) -> Option<&str> {
        self.current_music.as_deref()
    }

    /// Start a music cue. A different active track is stopped cleanly
    /// first; there is no crossfade overlap.
    pub fn play_music(&mut self, key: &str, looped: bool) {
        if !self.cue_ready("music", key, self.music.contains(key)) {
            return;
        }
        if let Some(current) = self.current_music.take()
            && current != key
        {
            self.backend.stop(&full_key("music", &current));
        }
        // A stop fading out right now would kill the new track's gain.
        if let Some(pending) = self.pending_stop.take() {
            self.backend.stop(&full_key("music", &pending.key));
            self.backend
                .set_gain(&full_key("music", &pending.key), self.music_gain);
        }
        let fkey = full_key("music", key);
        self.backend.set_gain(&fkey, self.music_gain);
        self.backend.start(&fkey, looped);
        self.current_music = Some(key.to_string());
    }

    /// Ramp the active track to silence over `fade_seconds`, then stop it
    /// and restore its nominal gain for next use. Zero stops immediately.
    pub fn stop_music(&mut self, fade_seconds: f64) {
        let Some(key) = self.current_music.take() else {
            return;
        };
        let fkey = full_key("music", &key);
        if fade_seconds <= 0.0 {
            self.backend.stop(&fkey);
            self.backend.set_gain(&fkey, self.music_gain);
        } else {
            self.backend.ramp_gain(&fkey, 0.0, fade_seconds);
            self.pending_stop = Some(PendingStop {
                key,
                remaining: fade_seconds,
            });
        }
    }

    /// Trigger a sound effect, restarting it from the beginning if it is
    /// already mid-play.
    pub fn play_sfx(&mut self, key: &str) {
        if !self.cue_ready("sfx", key, self.sfx.contains(key)) {
            return;
        }
        let fkey = full_key("sfx", key);
        self.backend.stop(&fkey);
        self.backend.set_gain(&fkey, self.sfx_gain);
        self.backend.start(&fkey, false);
    }

    /// Lower the active track under dialogue beeps.
    pub fn duck(&mut self, gain: f64, seconds: f64) {
        if let Some(key) = &self.current_music {
            self.backend.ramp_gain(&full_key("music", key), gain, seconds);
        }
    }

    /// Bring the active track back to nominal gain.
    pub fn restore(&mut self, seconds: f64) {
        if let Some(key) = &self.current_music {
            self.backend
                .ramp_gain(&full_key("music", key), self.music_gain, seconds);
        }
    }

    pub fn set_music_gain(&mut self, gain: f64) {
        self.music_gain = gain.clamp(0.0, 1.0);
        for key in &self.music {
            self.backend.set_gain(&full_key("music", key), self.music_gain);
        }
    }

    pub fn set_sfx_gain(&mut self, gain: f64) {
        self.sfx_gain = gain.clamp(0.0, 1.0);
        for key in &self.sfx {
            self.backend.set_gain(&full_key("sfx", key), self.sfx_gain);
        }
    }

    /// Complete scheduled fade-outs.
    pub fn tick(&mut self, dt: f64) {
        if let Some(pending) = &mut self.pending_stop {
            pending.remaining -= dt;
            if pending.remaining <= 0.0 {
                let fkey = full_key("music", &pending.key);
                self.backend.stop(&fkey);
                self.backend.set_gain(&fkey, self.music_gain);
                self.pending_stop = None;
            }
        }
    }

    fn cue_ready(&self, namespace: &str, key: &str, registered: bool) -> bool {
        match self.startup {
            Startup::Ready => {
                if !registered {
                    log::warn!("unknown {namespace} cue '{key}'; skipping");
                }
                registered
            }
            Startup::Pending => {
                log::warn!("audio still starting up; dropping {namespace} cue '{key}'");
                false
            }
            Startup::Failed => false,
        }
    }
}

fn full_key(namespace: &str, key: &str) -> String {
    format!("{namespace}/{key}")
}

/// What a `MemoryBackend` was asked to do, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    Started { key: String, looped: bool },
    Stopped { key: String },
    GainSet { key: String, gain: f64 },
    GainRamped { key: String, target: f64, seconds: f64 },
}

/// In-memory backend: records every operation instead of making sound.
/// Backs tests and the headless CLI player.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    samples: HashSet<String>,
    events: Vec<BackendEvent>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the recorded operations.
    pub fn take_events(&mut self) -> Vec<BackendEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Shared handle so a test or the CLI player can keep inspecting the
/// journal while the director owns the backend.
impl AudioBackend for std::rc::Rc<std::cell::RefCell<MemoryBackend>> {
    fn load(&mut self, key: &str, bytes: Vec<u8>) {
        self.borrow_mut().load(key, bytes);
    }

    fn is_loaded(&self, key: &str) -> bool {
        self.borrow().is_loaded(key)
    }

    fn start(&mut self, key: &str, looped: bool) {
        self.borrow_mut().start(key, looped);
    }

    fn stop(&mut self, key: &str) {
        self.borrow_mut().stop(key);
    }

    fn set_gain(&mut self, key: &str, gain: f64) {
        self.borrow_mut().set_gain(key, gain);
    }

    fn ramp_gain(&mut self, key: &str, target: f64, seconds: f64) {
        self.borrow_mut().ramp_gain(key, target, seconds);
    }
}

impl AudioBackend for MemoryBackend {
    fn load(&mut self, key: &str, _bytes: Vec<u8>) {
        self.samples.insert(key.to_string());
    }

    fn is_loaded(&self, key: &str) -> bool {
        self.samples.contains(key)
    }

    fn start(&mut self, key: &str, looped: bool) {
        self.events.push(BackendEvent::Started {
            key: key.to_string(),
            looped,
        });
    }

    fn stop(&mut self, key: &str) {
        self.events.push(BackendEvent::Stopped {
            key: key.to_string(),
        });
    }

    fn set_gain(&mut self, key: &str, gain: f64) {
        self.events.push(BackendEvent::GainSet {
            key: key.to_string(),
            gain,
        });
    }

    fn ramp_gain(&mut self, key: &str, target: f64, seconds: f64) {
        self.events.push(BackendEvent::GainRamped {
            key: key.to_string(),
            target,
            seconds,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Spy = Rc<RefCell<MemoryBackend>>;

    fn ready_director() -> (AudioDirector, Spy) {
        let spy: Spy = Rc::new(RefCell::new(MemoryBackend::new()));
        let mut director = AudioDirector::new(Box::new(spy.clone()));
        director.set_startup(Startup::Ready);
        director.install_music("a", vec![]);
        director.install_music("b", vec![]);
        director.install_sfx("beep", vec![]);
        spy.borrow_mut().take_events();
        (director, spy)
    }

    #[test]
    fn replacing_music_stops_the_old_track_first() {
        let (mut director, spy) = ready_director();
        director.play_music("a", true);
        director.play_music("b", true);

        let events = spy.borrow_mut().take_events();
        let stop_a = events
            .iter()
            .position(|e| matches!(e, BackendEvent::Stopped { key } if key == "music/a"))
            .expect("track a must be stopped");
        let start_b = events
            .iter()
            .position(
                |e| matches!(e, BackendEvent::Started { key, .. } if key == "music/b"),
            )
            .expect("track b must start");
        assert!(stop_a < start_b, "no overlap: stop happens before start");
        assert_eq!(director.current_music(), Some("b"));
    }

    #[test]
    fn stop_music_with_fade_finishes_through_tick() {
        let (mut director, spy) = ready_director();
        director.play_music("a", true);
        director.stop_music(0.5);
        assert_eq!(director.current_music(), None);

        director.tick(0.3);
        let mid = spy.borrow_mut().take_events();
        assert!(
            !mid.iter()
                .any(|e| matches!(e, BackendEvent::Stopped { key } if key == "music/a")),
            "still fading, not yet stopped"
        );

        director.tick(0.3);
        let done = spy.borrow_mut().take_events();
        assert!(
            done.iter()
                .any(|e| matches!(e, BackendEvent::Stopped { key } if key == "music/a"))
        );
        // Nominal gain restored for next use.
        assert!(done.iter().any(|e| matches!(
            e,
            BackendEvent::GainSet { key, gain } if key == "music/a" && *gain == DEFAULT_MUSIC_GAIN
        )));
    }

    #[test]
    fn stop_music_with_zero_fade_is_immediate() {
        let (mut director, spy) = ready_director();
        director.play_music("a", true);
        director.stop_music(0.0);
        let events = spy.borrow_mut().take_events();
        assert!(
            events
                .iter()
                .any(|e| matches!(e, BackendEvent::Stopped { key } if key == "music/a"))
        );
    }

    #[test]
    fn sfx_retrigger_restarts_from_the_beginning() {
        let (mut director, spy) = ready_director();
        director.play_sfx("beep");
        director.play_sfx("beep");
        let events = spy.borrow_mut().take_events();
        let pattern: Vec<_> = events
            .iter()
            .filter(|e| {
                matches!(e, BackendEvent::Started { key, .. } | BackendEvent::Stopped { key }
                    if key == "sfx/beep")
            })
            .collect();
        // stop, start, stop, start — never two overlapping plays.
        assert!(matches!(
            pattern.as_slice(),
            [
                BackendEvent::Stopped { .. },
                BackendEvent::Started { .. },
                BackendEvent::Stopped { .. },
                BackendEvent::Started { .. },
            ]
        ));
    }

    #[test]
    fn ducking_targets_the_active_track() {
        let (mut director, spy) = ready_director();
        director.play_music("a", true);
        director.duck(0.2, 0.1);
        director.restore(0.1);

        let events = spy.borrow_mut().take_events();
        assert!(events.iter().any(|e| matches!(
            e,
            BackendEvent::GainRamped { key, target, .. } if key == "music/a" && *target == 0.2
        )));
        assert!(events.iter().any(|e| matches!(
            e,
            BackendEvent::GainRamped { key, target, .. }
                if key == "music/a" && *target == DEFAULT_MUSIC_GAIN
        )));
    }

    #[test]
    fn cues_before_startup_are_dropped_not_fatal() {
        let mut director = AudioDirector::new(Box::new(MemoryBackend::new()));
        director.install_music("a", vec![]);
        director.play_music("a", true);
        assert_eq!(director.current_music(), None);

        director.set_startup(Startup::Ready);
        director.play_music("a", true);
        assert_eq!(director.current_music(), Some("a"));
    }

    #[test]
    fn unknown_cue_is_a_warned_noop() {
        let (mut director, _spy) = ready_director();
        director.play_music("missing", true);
        assert_eq!(director.current_music(), None);
        director.play_sfx("missing");
    }

    #[test]
    fn failed_startup_silences_everything() {
        let mut director = AudioDirector::new(Box::new(MemoryBackend::new()));
        director.install_music("a", vec![]);
        director.set_startup(Startup::Failed);
        director.play_music("a", true);
        assert_eq!(director.current_music(), None);
    }
}
