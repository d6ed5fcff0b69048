//! Terminal beat: thanks, a slow fade, and nothing after it.

use crate::assets::AssetSpec;
use crate::compose;
use crate::scenes::{Scene, SceneContext, place};
use crate::stage::Stage;
use crate::types::scene::{SceneId, SceneScript, Transition};
use crate::types::segment::Action;
use crate::types::stage::{Prop, TargetId, VisualSpec};

pub struct Finale;

impl Scene for Finale {
    fn id(&self) -> SceneId {
        SceneId::Finale
    }

    fn audio_assets(&self) -> Vec<AssetSpec> {
        vec![AssetSpec::music("credits", "audio/credits_theme.ogg")]
    }

    fn build(&self, stage: &mut dyn Stage, cx: &SceneContext) -> SceneScript {
        let mut script = SceneScript::new(Transition::End);
        script.label("finale");

        script.call(Action::StopMusic { fade_seconds: 0.8 });
        script.wait(1.0);
        script.call(Action::PlayMusic {
            key: "credits".to_string(),
            looped: false,
        });

        script.then(place(TargetId::OVERLAY, vec![(Prop::Alpha, 1.0)]));

        let thanks = stage.spawn(VisualSpec::text("caption", cx.center_x(), 100.0, "").with_depth(10.0));
        let signoff =
            stage.spawn(VisualSpec::text("caption", cx.center_x(), 140.0, "").with_depth(10.0));

        script.then(compose::typewriter_run(thanks, "Thanks for pressing START.", 60));
        script.wait(1.0);
        script.then(compose::typewriter_run(signoff, "— end of cartridge —", 60));
        script.wait(2.0);

        script.then(compose::particle_burst(cx.center_x(), 120.0, 24));
        script.wait(1.0);

        script.call(Action::StopMusic { fade_seconds: 2.0 });
        script.wait(2.2);
        script
    }
}
