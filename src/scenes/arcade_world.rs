//! The snake-clone beat: the first thing the narrator ever built, played
//! back as a little grid ballet with a climbing score counter.

use crate::assets::AssetSpec;
use crate::compose::{self, Keyframe};
use crate::scenes::{Scene, SceneContext, place, run_dialogue};
use crate::stage::Stage;
use crate::timeline::Ease;
use crate::types::dialogue::DialogueLine;
use crate::types::scene::{SceneId, SceneScript, Transition};
use crate::types::segment::{Action, Segment, StageOp};
use crate::types::stage::{Prop, TargetId, VisualSpec};

pub struct ArcadeWorld;

/// Grid cell size of the recreated snake board.
const CELL: f64 = 16.0;

impl Scene for ArcadeWorld {
    fn id(&self) -> SceneId {
        SceneId::ArcadeWorld
    }

    fn audio_assets(&self) -> Vec<AssetSpec> {
        vec![
            AssetSpec::music("arcade", "audio/arcade_loop.ogg"),
            AssetSpec::sfx("pickup", "audio/pickup.ogg"),
            AssetSpec::sfx("beep", "audio/dialogue_beep.ogg"),
        ]
    }

    fn build(&self, stage: &mut dyn Stage, cx: &SceneContext) -> SceneScript {
        let mut script = SceneScript::new(Transition::Next(SceneId::BlockWorld));
        script.label("arcade_world");

        script.call(Action::PlayMusic {
            key: "arcade".to_string(),
            looped: true,
        });
        stage.spawn(VisualSpec::new("board", cx.center_x(), cx.center_y()).with_depth(-10.0));
        script.then(place(TargetId::OVERLAY, vec![(Prop::Alpha, 1.0)]));
        script.then(compose::fade_screen(0.0, 0.5));

        let score = stage.spawn(VisualSpec::text("score", 40.0, 16.0, "SCORE 0"));
        let head = stage.spawn(VisualSpec::new("snake_head", 80.0, 120.0).with_depth(5.0));
        let food = stage.spawn(VisualSpec::new("food", 176.0, 120.0).with_alpha(0.0));

        // The food blinks into existence, the snake marches over, eats it,
        // and the counter ticks up. Three rounds, each one cell further.
        let mut x = 80.0;
        for (round, points) in [(1u32, 10u32), (2, 20), (3, 30)] {
            let fx = x + (round as f64 + 2.0) * CELL;
            script.then(place(food, vec![(Prop::X, fx), (Prop::Alpha, 0.0)]));
            script.then(Segment::tween1(food, Prop::Alpha, 1.0, 0.2, Ease::QuadOut));

            // March one cell at a time, strictly on the grid.
            let steps: Vec<Keyframe> = (1..=(round + 2))
                .map(|i| Keyframe::new(x + i as f64 * CELL, 120.0, 0.18))
                .collect();
            script.then(compose::keyframes(head, &steps));
            x = fx;

            script.call(Action::PlaySfx {
                key: "pickup".to_string(),
            });
            script.then(Segment::tween1(food, Prop::Alpha, 0.0, 0.05, Ease::Linear));
            script.call(Action::Stage {
                op: StageOp::SetText {
                    target: score,
                    text: format!("SCORE {points}"),
                },
            });
            script.then(compose::bounce(score, 16.0, 6.0, 0.3));
        }

        run_dialogue(
            &mut script,
            vec![
                DialogueLine::spoken("Kid", "Forty lines of code. It barely worked.")
                    .with_tick_sfx("beep"),
                DialogueLine::spoken("Kid", "My sister played it for an hour anyway.")
                    .with_tick_sfx("beep"),
                DialogueLine::spoken("Kid", "That hour is why we're here.").with_tick_sfx("beep"),
            ],
            0.8,
        );

        script.then(compose::fade_screen(1.0, 0.6));
        script
    }
}
