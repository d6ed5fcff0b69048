//! Opening beat: captions type in over black, the hobby wall fades up,
//! and something in the corner flickers that should not be there.

use crate::assets::AssetSpec;
use crate::compose;
use crate::scenes::{Scene, SceneContext, place};
use crate::stage::Stage;
use crate::timeline::Ease;
use crate::types::scene::{SceneId, SceneScript, Transition};
use crate::types::segment::{Action, At, Segment};
use crate::types::stage::{Prop, TargetId, VisualSpec};

pub struct ColdOpen;

impl Scene for ColdOpen {
    fn id(&self) -> SceneId {
        SceneId::ColdOpen
    }

    fn audio_assets(&self) -> Vec<AssetSpec> {
        vec![
            AssetSpec::sfx("glitch", "audio/glitch.ogg"),
            AssetSpec::sfx("beep", "audio/dialogue_beep.ogg"),
        ]
    }

    fn build(&self, stage: &mut dyn Stage, cx: &SceneContext) -> SceneScript {
        let mut script = SceneScript::new(Transition::Next(SceneId::Interruption));
        script.label("cold_open");

        // Open on black and fade the room in.
        script.then(place(TargetId::OVERLAY, vec![(Prop::Alpha, 1.0)]));
        script.then(compose::fade_screen(0.0, 1.0));
        script.wait(0.5);

        let caption_top = stage.spawn(VisualSpec::text("caption", cx.center_x(), 80.0, ""));
        script.then(compose::typewriter_run(caption_top, "Hey. Glad you made it.", 50));
        script.wait(1.0);

        let caption_mid = stage.spawn(VisualSpec::text("caption", cx.center_x(), 110.0, ""));
        script.then(compose::typewriter_run(
            caption_mid,
            "This is a short show about how I learned to build worlds.",
            50,
        ));
        script.wait(1.2);

        let caption_low = stage.spawn(VisualSpec::text("caption", cx.center_x(), 140.0, ""));
        script.then(compose::typewriter_run(
            caption_low,
            "It starts the way these things usually do. With a desk.",
            50,
        ));
        script.wait(1.2);

        // The hobby wall: three sprites fade up with staggered starts.
        let circuits = stage.spawn(VisualSpec::new("circuits", 50.0, 200.0).with_scale(1.5).with_alpha(0.0));
        let keyboard = stage.spawn(VisualSpec::new("keyboard", 120.0, 200.0).with_scale(1.5).with_alpha(0.0));
        let notebook = stage.spawn(VisualSpec::new("notebook", 190.0, 200.0).with_scale(1.5).with_alpha(0.0));
        script.then(compose::fade_to(circuits, 1.0, 0.5));
        script.push(compose::fade_to(keyboard, 1.0, 0.5), At::Relative { offset: -0.3 });
        script.push(compose::fade_to(notebook, 1.0, 0.5), At::Relative { offset: -0.3 });

        script.then(compose::camera_pan(160.0, 150.0, cx.view, 2.0, Ease::QuadInOut));

        // A corrupted sprite strobes in the corner.
        let artifact = stage.spawn(VisualSpec::new("artifact", 280.0, 30.0).with_scale(0.5).with_alpha(0.0));
        for _ in 0..5 {
            script.then(Segment::tween1(artifact, Prop::Alpha, 0.8, 0.05, Ease::Linear));
            script.then(Segment::tween1(artifact, Prop::Alpha, 0.0, 0.05, Ease::Linear));
        }
        script.call(Action::PlaySfx {
            key: "glitch".to_string(),
        });
        // The pan above left the camera at scroll (0, 30).
        script.then(compose::camera_shake(0.0, 30.0, 10.0, 0.3, cx.seed));

        let caption_warn = stage.spawn(VisualSpec::text("caption", cx.center_x(), 60.0, ""));
        script.then(compose::typewriter_run(
            caption_warn,
            "...wait. What is that in the corner?",
            40,
        ));
        script.wait(1.5);

        script.then(compose::fade_screen(1.0, 0.8));
        script
    }
}
