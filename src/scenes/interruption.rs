//! The takeover beat: the presentation is "interrupted" by the thing in
//! the corner, which turns out to be running the show from here on.

use crate::assets::AssetSpec;
use crate::compose;
use crate::scenes::{Scene, SceneContext, place, run_dialogue};
use crate::stage::Stage;
use crate::timeline::Ease;
use crate::types::dialogue::DialogueLine;
use crate::types::scene::{SceneId, SceneScript, Transition};
use crate::types::segment::{Action, Segment};
use crate::types::stage::{Prop, TargetId, VisualSpec};

pub struct Interruption;

impl Scene for Interruption {
    fn id(&self) -> SceneId {
        SceneId::Interruption
    }

    fn audio_assets(&self) -> Vec<AssetSpec> {
        vec![
            AssetSpec::music("suspense", "audio/suspense.ogg"),
            AssetSpec::sfx("glitch", "audio/glitch.ogg"),
            AssetSpec::sfx("beep", "audio/dialogue_beep.ogg"),
        ]
    }

    fn build(&self, stage: &mut dyn Stage, cx: &SceneContext) -> SceneScript {
        let mut script = SceneScript::new(Transition::Next(SceneId::Title));
        script.label("interruption");

        script.call(Action::PlayMusic {
            key: "suspense".to_string(),
            looped: true,
        });

        // Held on black; only the artifact is visible now, centered and big.
        script.then(place(TargetId::OVERLAY, vec![(Prop::Alpha, 1.0)]));
        let artifact = stage.spawn(
            VisualSpec::new("artifact", cx.center_x(), cx.center_y())
                .with_scale(0.2)
                .with_alpha(0.0)
                .with_depth(50.0),
        );
        script.then(compose::fade_to(artifact, 1.0, 0.6));
        script.then(compose::scale_to(artifact, 2.0, 1.2, Ease::BackOut));
        script.call(Action::PlaySfx {
            key: "glitch".to_string(),
        });
        script.then(compose::glitch(artifact, cx.center_x(), cx.center_y(), 4.0, cx.seed));
        script.then(compose::screen_flash(0.2));
        script.wait(0.4);

        run_dialogue(
            &mut script,
            vec![
                DialogueLine::spoken("???", "Oh. You were expecting a slideshow.")
                    .with_tick_sfx("beep"),
                DialogueLine::spoken("???", "Slideshows are for people who never shipped a game.")
                    .with_tick_sfx("beep"),
                DialogueLine::spoken("???", "Come on. Let me drive for a bit.").with_tick_sfx("beep"),
            ],
            0.8,
        );

        // The artifact "swallows" the screen.
        script.then(compose::scale_to(artifact, 12.0, 0.8, Ease::QuadIn));
        script.push(
            Segment::tween1(artifact, Prop::Alpha, 0.0, 0.3, Ease::QuadIn),
            crate::types::segment::At::Relative { offset: -0.3 },
        );
        script.then(compose::fade_screen(1.0, 0.2));
        script.wait(0.3);
        script
    }
}
