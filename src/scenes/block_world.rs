//! The block-coding beat: drag-and-snap programming, recreated with the
//! scripted cursor assembling three blocks into a stack.

use crate::assets::AssetSpec;
use crate::compose;
use crate::cursor::CursorRig;
use crate::scenes::{Scene, SceneContext, place, run_dialogue};
use crate::stage::Stage;
use crate::timeline::Ease;
use crate::types::dialogue::DialogueLine;
use crate::types::scene::{SceneId, SceneScript, Transition};
use crate::types::segment::Action;
use crate::types::stage::{Prop, TargetId, VisualSpec};

pub struct BlockWorld;

impl Scene for BlockWorld {
    fn id(&self) -> SceneId {
        SceneId::BlockWorld
    }

    fn audio_assets(&self) -> Vec<AssetSpec> {
        vec![
            AssetSpec::music("toybox", "audio/toybox_loop.ogg"),
            AssetSpec::sfx("snap", "audio/snap.ogg"),
            AssetSpec::sfx("beep", "audio/dialogue_beep.ogg"),
        ]
    }

    fn build(&self, stage: &mut dyn Stage, cx: &SceneContext) -> SceneScript {
        let mut script = SceneScript::new(Transition::Next(SceneId::SandboxWorld));
        script.label("block_world");

        script.call(Action::PlayMusic {
            key: "toybox".to_string(),
            looped: true,
        });
        stage.spawn(VisualSpec::new("workspace", cx.center_x(), cx.center_y()).with_depth(-10.0));
        script.then(place(TargetId::OVERLAY, vec![(Prop::Alpha, 1.0)]));
        script.then(compose::fade_screen(0.0, 0.5));

        let mut cursor = CursorRig::new(stage);
        for segment in cursor.show(20.0, 20.0) {
            script.then(segment);
        }

        // Palette on the left, stack builds on the right.
        let stack_x = 230.0;
        for (i, key) in ["block_when", "block_move", "block_loop"].iter().enumerate() {
            let shelf_y = 60.0 + i as f64 * 50.0;
            let block = stage.spawn(VisualSpec::new(*key, 60.0, shelf_y).with_depth(5.0));

            // Pick it up, drag it over, snap it into place.
            for segment in cursor.hover_and_click(60.0, shelf_y, 0.5, 0.15) {
                script.then(segment);
            }
            let snap_y = 70.0 + i as f64 * 24.0;
            script.then(compose::move_to(block, stack_x, snap_y, 0.6, Ease::QuadInOut));
            script.push(
                cursor.move_to(stack_x, snap_y, 0.6, Ease::QuadInOut),
                crate::types::segment::At::Relative { offset: -0.6 },
            );
            script.call(Action::PlaySfx {
                key: "snap".to_string(),
            });
            script.then(compose::scale_to(block, 1.15, 0.08, Ease::QuadOut));
            script.then(compose::scale_to(block, 1.0, 0.12, Ease::BounceOut));
        }
        script.then(cursor.hide());

        run_dialogue(
            &mut script,
            vec![
                DialogueLine::spoken("Kid", "No syntax errors. No semicolons.").with_tick_sfx("beep"),
                DialogueLine::spoken("Kid", "Just blocks that snapped, and a cat that moved.")
                    .with_tick_sfx("beep"),
                DialogueLine::spoken("Kid", "I published twelve games that summer. All terrible.")
                    .with_tick_sfx("beep"),
                DialogueLine::spoken("Kid", "Terrible, and mine.").with_tick_sfx("beep"),
            ],
            0.8,
        );

        script.then(compose::fade_screen(1.0, 0.6));
        script
    }
}
