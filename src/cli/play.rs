//! Headless player mode
//!
//! Runs the entire presentation against the in-memory stage and audio
//! backend with a simulated fixed-step clock, printing scene changes,
//! completed dialogue lines and audio activity as they happen. The
//! scripted advance triggers baked into each scene drive the dialogue,
//! so the run needs no input and always reaches the terminal beat.

use crate::assets::{FsSampleSource, NullSampleSource};
use crate::audio::{BackendEvent, MemoryBackend};
use crate::config::PresentationConfig;
use crate::runner::Presentation;
use crate::stage::MemoryStage;
use std::cell::RefCell;
use std::rc::Rc;

/// Hard stop for the simulated clock, in seconds. The full show runs a
/// few minutes; anything past this is a scheduling bug, not content.
const MAX_SIMULATED_SECONDS: f64 = 60.0 * 30.0;

pub struct PlayOptions {
    pub fps: u32,
    /// Print every audio backend operation
    pub trace_audio: bool,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            fps: 60,
            trace_audio: false,
        }
    }
}

pub async fn run_play(config: PresentationConfig, options: PlayOptions) -> anyhow::Result<()> {
    let spy: Rc<RefCell<MemoryBackend>> = Rc::new(RefCell::new(MemoryBackend::new()));
    let mut presentation = Presentation::new(
        Box::new(MemoryStage::new()),
        Box::new(spy.clone()),
        &config,
    );

    if config.asset_root.is_dir() {
        let source = FsSampleSource::new(&config.asset_root);
        presentation.prepare(&source).await;
    } else {
        log::warn!(
            "asset root {} not found; running with empty samples",
            config.asset_root.display()
        );
        presentation.prepare(&NullSampleSource).await;
    }

    println!("=== showreel headless player ===");
    println!();

    presentation.start()?;

    let dt = 1.0 / f64::from(options.fps.max(1));
    let mut elapsed = 0.0;
    let mut last_scene = None;
    let mut line_shown = false;

    while !presentation.is_finished() {
        presentation.tick(dt);
        elapsed += dt;

        let snapshot = presentation.store().snapshot();
        if snapshot.current_scene != last_scene {
            last_scene = snapshot.current_scene;
            if let Some(scene) = last_scene {
                println!(
                    "--- [{elapsed:7.2}s] scene: {scene} ({:.0}%)",
                    snapshot.timeline_progress * 100.0
                );
            }
        }

        // Print each dialogue line once, when it finishes typing.
        let indicator = presentation.dialogue().indicator_visible();
        if indicator && !line_shown {
            let speaker = presentation.dialogue().current_speaker().unwrap_or("*");
            println!("    {speaker}: {}", presentation.dialogue().displayed_text());
        }
        line_shown = indicator;

        if options.trace_audio {
            for event in spy.borrow_mut().take_events() {
                print_audio_event(elapsed, &event);
            }
        }

        if elapsed > MAX_SIMULATED_SECONDS {
            anyhow::bail!(
                "presentation did not finish within {MAX_SIMULATED_SECONDS}s of simulated time"
            );
        }
    }

    println!();
    println!(
        "finished after {elapsed:.1}s simulated ({} segments scheduled)",
        presentation.timeline().segment_count()
    );
    Ok(())
}

fn print_audio_event(elapsed: f64, event: &BackendEvent) {
    match event {
        BackendEvent::Started { key, looped } => {
            let mode = if *looped { "loop" } else { "once" };
            println!("    [{elapsed:7.2}s] audio start {key} ({mode})");
        }
        BackendEvent::Stopped { key } => {
            println!("    [{elapsed:7.2}s] audio stop  {key}");
        }
        BackendEvent::GainRamped { key, target, seconds } => {
            println!("    [{elapsed:7.2}s] audio ramp  {key} -> {target:.2} over {seconds:.2}s");
        }
        BackendEvent::GainSet { .. } => {}
    }
}
