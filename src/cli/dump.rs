//! Schedule dump mode
//!
//! Authoring inspection: builds every scene's block in isolation and
//! prints its duration, segment count, labels and transition, followed by
//! the audio manifest with content fingerprints where the samples exist.

use crate::assets::{AssetKind, FsSampleSource, SampleSource, fingerprint};
use crate::config::PresentationConfig;
use crate::scenes::{SceneContext, all_scenes};
use crate::stage::MemoryStage;
use crate::timeline::CueTimeline;
use crate::types::scene::Transition;

pub async fn run_dump(config: PresentationConfig) -> anyhow::Result<()> {
    let cx = SceneContext {
        view: config.view(),
        seed: 0x5EED,
    };

    println!("scene            segments  duration  transition");
    println!("-----            --------  --------  ----------");

    let mut total = 0.0;
    for scene in all_scenes() {
        // Each block is measured in isolation on a scratch stage.
        let mut stage = MemoryStage::new();
        let script = scene.build(&mut stage, &cx);
        let transition = match script.transition {
            Transition::Next(next) => format!("-> {next}"),
            Transition::End => "end".to_string(),
        };

        let mut timeline = CueTimeline::new();
        timeline.append_all(script.segments)?;
        total += timeline.duration();

        println!(
            "{:<16} {:>8}  {:>7.2}s  {transition}",
            scene.id().to_string(),
            timeline.segment_count(),
            timeline.duration(),
        );
        let mut labels: Vec<_> = timeline.labels().collect();
        labels.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        for (name, time) in labels {
            println!("                   label '{name}' at {time:.2}s");
        }
    }
    println!();
    println!("total scheduled content: {total:.2}s (before scene hand-off gaps)");

    println!();
    println!("audio manifest ({})", config.asset_root.display());
    let source = FsSampleSource::new(&config.asset_root);
    for scene in all_scenes() {
        for spec in scene.audio_assets() {
            let kind = match spec.kind {
                AssetKind::Music => "music",
                AssetKind::Sfx => "sfx",
            };
            match source.load(&spec.path).await {
                Ok(bytes) => println!(
                    "  {kind:<5} {:<10} {} md5={}",
                    spec.key,
                    spec.path.display(),
                    fingerprint(&bytes),
                ),
                Err(_) => println!(
                    "  {kind:<5} {:<10} {} (missing; cue will be silent)",
                    spec.key,
                    spec.path.display(),
                ),
            }
        }
    }
    Ok(())
}
