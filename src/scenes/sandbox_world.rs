//! The sandbox-platform beat: first published world, watched through a
//! build screen whose progress bar actually finishes.

use crate::assets::AssetSpec;
use crate::compose;
use crate::scenes::{Scene, SceneContext, place, run_dialogue};
use crate::stage::Stage;
use crate::timeline::Ease;
use crate::types::dialogue::DialogueLine;
use crate::types::scene::{SceneId, SceneScript, Transition};
use crate::types::segment::{Action, At, Segment, StageOp};
use crate::types::stage::{Prop, TargetId, VisualSpec};

pub struct SandboxWorld;

impl Scene for SandboxWorld {
    fn id(&self) -> SceneId {
        SceneId::SandboxWorld
    }

    fn audio_assets(&self) -> Vec<AssetSpec> {
        vec![
            AssetSpec::music("sandbox", "audio/sandbox_loop.ogg"),
            AssetSpec::sfx("publish", "audio/publish.ogg"),
            AssetSpec::sfx("beep", "audio/dialogue_beep.ogg"),
        ]
    }

    fn build(&self, stage: &mut dyn Stage, cx: &SceneContext) -> SceneScript {
        let mut script = SceneScript::new(Transition::Next(SceneId::OnlineWorld));
        script.label("sandbox_world");

        script.call(Action::PlayMusic {
            key: "sandbox".to_string(),
            looped: true,
        });
        script.then(place(TargetId::OVERLAY, vec![(Prop::Alpha, 1.0)]));
        script.then(compose::fade_screen(0.0, 0.5));

        // Baseplate world assembles itself: terrain chunks pop in.
        for (i, (x, y)) in [(80.0, 180.0), (160.0, 180.0), (240.0, 180.0), (120.0, 140.0), (200.0, 140.0)]
            .into_iter()
            .enumerate()
        {
            let chunk = stage.spawn(VisualSpec::new("terrain", x, y).with_scale(0.0).with_depth(-5.0));
            let grow = compose::scale_to(chunk, 1.0, 0.35, Ease::BackOut);
            if i == 0 {
                script.then(grow);
            } else {
                script.push(grow, At::Relative { offset: -0.2 });
            }
        }

        let status = stage.spawn(VisualSpec::text("status", cx.center_x(), 60.0, "PUBLISHING..."));
        // Progress bar: a left-anchored strip that fills by scaling wide.
        stage.spawn(VisualSpec::new("bar_frame", cx.center_x(), 80.0));
        let fill = stage.spawn(VisualSpec::new("bar_fill", cx.center_x() - 60.0, 80.0).with_depth(1.0));
        script.then(place(fill, vec![(Prop::ScaleX, 0.0)]));
        script.then(Segment::tween1(fill, Prop::ScaleX, 0.4, 1.2, Ease::QuadOut));
        script.then(Segment::tween1(fill, Prop::ScaleX, 0.55, 1.5, Ease::Linear));
        // The classic stall at 90 percent.
        script.then(Segment::tween1(fill, Prop::ScaleX, 0.9, 0.4, Ease::QuadOut));
        script.wait(1.2);
        script.then(Segment::tween1(fill, Prop::ScaleX, 1.0, 0.2, Ease::QuadIn));
        script.call(Action::PlaySfx {
            key: "publish".to_string(),
        });
        script.call(Action::Stage {
            op: StageOp::SetText {
                target: status,
                text: "WORLD IS LIVE".to_string(),
            },
        });
        script.then(compose::bounce(status, 60.0, 8.0, 0.4));

        run_dialogue(
            &mut script,
            vec![
                DialogueLine::spoken("Teen", "Thirteen, and suddenly strangers could walk around in my head.")
                    .with_tick_sfx("beep"),
                DialogueLine::spoken("Teen", "Visit count: 112. I refreshed that page all week.")
                    .with_tick_sfx("beep"),
            ],
            0.8,
        );

        script.then(compose::fade_screen(1.0, 0.6));
        script
    }
}
