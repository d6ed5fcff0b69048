//! Title screen beat: the logo drops in, the scripted cursor wanders over
//! and presses START for you.

use crate::assets::AssetSpec;
use crate::compose;
use crate::cursor::CursorRig;
use crate::scenes::{Scene, SceneContext, place};
use crate::stage::Stage;
use crate::timeline::Ease;
use crate::types::scene::{SceneId, SceneScript, Transition};
use crate::types::segment::{Action, Segment};
use crate::types::stage::{Prop, TargetId, VisualSpec};

pub struct Title;

impl Scene for Title {
    fn id(&self) -> SceneId {
        SceneId::Title
    }

    fn audio_assets(&self) -> Vec<AssetSpec> {
        vec![
            AssetSpec::music("chiptune", "audio/title_theme.ogg"),
            AssetSpec::sfx("click", "audio/click.ogg"),
            AssetSpec::sfx("confirm", "audio/confirm.ogg"),
        ]
    }

    fn build(&self, stage: &mut dyn Stage, cx: &SceneContext) -> SceneScript {
        let mut script = SceneScript::new(Transition::Next(SceneId::StartingRoom));
        script.label("title");

        script.call(Action::PlayMusic {
            key: "chiptune".to_string(),
            looped: true,
        });
        script.then(place(TargetId::OVERLAY, vec![(Prop::Alpha, 1.0)]));
        script.then(compose::fade_screen(0.0, 0.6));

        // Logo drops from above the view and lands with a bounce.
        let logo = stage.spawn(VisualSpec::new("logo", cx.center_x(), -40.0).with_depth(10.0));
        script.then(compose::move_to(logo, cx.center_x(), 70.0, 0.9, Ease::BounceOut));

        let subtitle = stage.spawn(VisualSpec::text("caption", cx.center_x(), 105.0, ""));
        script.then(compose::typewriter_run(subtitle, "A PLAYABLE RETROSPECTIVE", 40));

        let start_button = stage.spawn(
            VisualSpec::text("button", cx.center_x(), 170.0, "START").with_alpha(0.0),
        );
        script.then(compose::fade_to(start_button, 1.0, 0.4));
        // Idle attract loop: the button breathes once.
        script.then(compose::scale_to(start_button, 1.1, 0.5, Ease::QuadInOut));
        script.then(compose::scale_to(start_button, 1.0, 0.5, Ease::QuadInOut));

        // Nobody is holding the mouse; it only looks that way.
        let mut cursor = CursorRig::new(stage);
        for segment in cursor.show(cx.view.0 - 30.0, cx.view.1 - 20.0) {
            script.then(segment);
        }
        for segment in cursor.hover_and_click(cx.center_x(), 170.0, 0.8, 0.2) {
            script.then(segment);
        }
        script.call(Action::PlaySfx {
            key: "click".to_string(),
        });
        script.then(Segment::tween1(start_button, Prop::Alpha, 0.3, 0.08, Ease::Linear));
        script.then(Segment::tween1(start_button, Prop::Alpha, 1.0, 0.08, Ease::Linear));
        script.call(Action::PlaySfx {
            key: "confirm".to_string(),
        });
        script.then(cursor.hide());

        script.then(compose::screen_flash(0.3));
        script.wait(0.4);
        script.then(compose::fade_screen(1.0, 0.5));
        script
    }
}
