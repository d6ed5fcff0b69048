//! Observable app state
//!
//! One process-wide snapshot of where the presentation is, written by the
//! runner and read by whatever UI chrome is attached. Listeners get the
//! full snapshot after every mutation.

use crate::types::scene::SceneId;
use serde::{Deserialize, Serialize};

/// What the chrome can see.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub current_scene: Option<SceneId>,
    pub is_playing: bool,
    /// Overall timeline progress in [0, 1]
    pub timeline_progress: f64,
    pub dialogue_active: bool,
}

type Listener = Box<dyn FnMut(&Snapshot)>;

/// Holder of the snapshot plus its subscribers.
#[derive(Default)]
pub struct StateStore {
    snapshot: Snapshot,
    listeners: Vec<Listener>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot
    }

    /// Register a listener; it is called after every mutation for the
    /// rest of the store's life.
    pub fn subscribe(&mut self, listener: impl FnMut(&Snapshot) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn set_current_scene(&mut self, scene: SceneId) {
        self.snapshot.current_scene = Some(scene);
        self.notify();
    }

    pub fn set_is_playing(&mut self, playing: bool) {
        self.snapshot.is_playing = playing;
        self.notify();
    }

    pub fn set_timeline_progress(&mut self, progress: f64) {
        self.snapshot.timeline_progress = progress.clamp(0.0, 1.0);
        self.notify();
    }

    pub fn set_dialogue_active(&mut self, active: bool) {
        self.snapshot.dialogue_active = active;
        self.notify();
    }

    pub fn reset(&mut self) {
        self.snapshot = Snapshot::default();
        self.notify();
    }

    fn notify(&mut self) {
        for listener in &mut self.listeners {
            listener(&self.snapshot);
        }
    }
}

impl std::fmt::Debug for StateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStore")
            .field("snapshot", &self.snapshot)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn listeners_see_every_mutation() {
        let seen: Rc<RefCell<Vec<Snapshot>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();

        let mut store = StateStore::new();
        store.subscribe(move |snap| sink.borrow_mut().push(*snap));

        store.set_is_playing(true);
        store.set_current_scene(SceneId::Title);
        store.set_timeline_progress(0.5);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert!(seen[0].is_playing);
        assert_eq!(seen[1].current_scene, Some(SceneId::Title));
        assert_eq!(seen[2].timeline_progress, 0.5);
    }

    #[test]
    fn progress_is_clamped_to_unit_range() {
        let mut store = StateStore::new();
        store.set_timeline_progress(1.7);
        assert_eq!(store.snapshot().timeline_progress, 1.0);
        store.set_timeline_progress(-0.2);
        assert_eq!(store.snapshot().timeline_progress, 0.0);
    }

    #[test]
    fn reset_returns_to_the_initial_snapshot() {
        let mut store = StateStore::new();
        store.set_is_playing(true);
        store.set_dialogue_active(true);
        store.reset();
        assert_eq!(store.snapshot(), Snapshot::default());
    }
}
