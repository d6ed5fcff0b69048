//! The narrative beats
//!
//! Each scene builds its visuals on the stage and returns the block of
//! timed segments it contributes to the shared cue timeline, plus the
//! typed transition the runner takes when the block finishes. Everything
//! in this module tree is declarative content; the machinery lives in
//! `timeline`, `dialogue`, `audio` and `runner`.

use crate::assets::AssetSpec;
use crate::stage::Stage;
use crate::types::dialogue::{DEFAULT_CHAR_DELAY_MS, DialogueLine, DialogueSequence};
use crate::types::scene::{SceneId, SceneScript};
use crate::types::segment::{Action, Segment};

mod arcade_world;
mod block_world;
mod campus;
mod cold_open;
mod finale;
mod interruption;
mod online_world;
mod sandbox_world;
mod starting_room;
mod title;

pub use arcade_world::ArcadeWorld;
pub use block_world::BlockWorld;
pub use campus::Campus;
pub use cold_open::ColdOpen;
pub use finale::Finale;
pub use interruption::Interruption;
pub use online_world::OnlineWorld;
pub use sandbox_world::SandboxWorld;
pub use starting_room::StartingRoom;
pub use title::Title;

/// What a scene gets to know about the presentation it runs in.
#[derive(Debug, Clone)]
pub struct SceneContext {
    /// Logical viewport (width, height)
    pub view: (f64, f64),
    /// Seed for deterministic shakes and glitches
    pub seed: u64,
}

impl SceneContext {
    pub fn center_x(&self) -> f64 {
        self.view.0 / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.view.1 / 2.0
    }
}

/// One narrative beat.
pub trait Scene {
    fn id(&self) -> SceneId;

    /// Audio cues this scene needs loaded before it can play.
    fn audio_assets(&self) -> Vec<AssetSpec> {
        Vec::new()
    }

    /// Place visuals and produce the scene's segment block.
    fn build(&self, stage: &mut dyn Stage, cx: &SceneContext) -> SceneScript;
}

/// Every beat, in presentation order.
pub fn all_scenes() -> Vec<Box<dyn Scene>> {
    vec![
        Box::new(ColdOpen),
        Box::new(Interruption),
        Box::new(Title),
        Box::new(StartingRoom),
        Box::new(ArcadeWorld),
        Box::new(BlockWorld),
        Box::new(SandboxWorld),
        Box::new(OnlineWorld),
        Box::new(Campus),
        Box::new(Finale),
    ]
}

/// Script a dialogue run into the block: show the sequence, then budget
/// typing time per line and advance with the scripted trigger. `hold` is
/// the beat left on a completed line before moving on.
pub(crate) fn run_dialogue(script: &mut SceneScript, lines: Vec<DialogueLine>, hold: f64) {
    let budgets: Vec<f64> = lines
        .iter()
        .map(|line| {
            let delay = line.char_delay_ms.unwrap_or(DEFAULT_CHAR_DELAY_MS) as f64 / 1000.0;
            line.text.chars().count() as f64 * delay
        })
        .collect();

    script.call(Action::ShowDialogue {
        sequence: DialogueSequence::new(lines),
    });
    for budget in budgets {
        script.wait(budget + hold);
        script.call(Action::AdvanceDialogue);
    }
}

/// Instant property placement, as a zero-length tween.
pub(crate) fn place(
    target: crate::types::stage::TargetId,
    props: Vec<(crate::types::stage::Prop, f64)>,
) -> Segment {
    Segment::Tween {
        target,
        props,
        seconds: 0.0,
        ease: crate::timeline::Ease::Linear,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::MemoryStage;
    use crate::types::scene::Transition;

    fn context() -> SceneContext {
        SceneContext {
            view: (320.0, 240.0),
            seed: 7,
        }
    }

    #[test]
    fn beats_form_one_linear_chain_ending_at_the_finale() {
        let scenes = all_scenes();
        assert_eq!(scenes.len(), SceneId::ALL.len());

        let mut stage = MemoryStage::new();
        let cx = context();
        for (i, scene) in scenes.iter().enumerate() {
            assert_eq!(scene.id(), SceneId::ALL[i]);
            let script = scene.build(&mut stage, &cx);
            let expected = match SceneId::ALL.get(i + 1) {
                Some(next) => Transition::Next(*next),
                None => Transition::End,
            };
            assert_eq!(script.transition, expected, "beat {}", scene.id());
        }
    }

    #[test]
    fn every_scene_contributes_segments() {
        let mut stage = MemoryStage::new();
        let cx = context();
        for scene in all_scenes() {
            let script = scene.build(&mut stage, &cx);
            assert!(
                !script.segments.is_empty(),
                "beat {} has an empty block",
                scene.id()
            );
        }
    }

    #[test]
    fn scripted_dialogue_budgets_one_advance_per_line() {
        let mut script = SceneScript::new(Transition::End);
        run_dialogue(
            &mut script,
            vec![
                DialogueLine::spoken("A", "Hi").with_delay_ms(10),
                DialogueLine::spoken("A", "Bye").with_delay_ms(10),
            ],
            0.5,
        );

        let advances = script
            .segments
            .iter()
            .filter(|(segment, _)| {
                matches!(
                    segment,
                    Segment::Call {
                        action: Action::AdvanceDialogue
                    }
                )
            })
            .count();
        assert_eq!(advances, 2);
    }
}
