//! First playable beat: a tiny bedroom, an avatar shuffling to the desk,
//! and the narrator finding their voice.

use crate::assets::AssetSpec;
use crate::compose::{self, Keyframe};
use crate::scenes::{Scene, SceneContext, place, run_dialogue};
use crate::stage::Stage;
use crate::timeline::Ease;
use crate::types::dialogue::DialogueLine;
use crate::types::scene::{SceneId, SceneScript, Transition};
use crate::types::segment::Action;
use crate::types::stage::{Prop, TargetId, VisualSpec};

pub struct StartingRoom;

impl Scene for StartingRoom {
    fn id(&self) -> SceneId {
        SceneId::StartingRoom
    }

    fn audio_assets(&self) -> Vec<AssetSpec> {
        vec![
            AssetSpec::music("bedroom", "audio/bedroom_loop.ogg"),
            AssetSpec::sfx("beep", "audio/dialogue_beep.ogg"),
        ]
    }

    fn build(&self, stage: &mut dyn Stage, cx: &SceneContext) -> SceneScript {
        let mut script = SceneScript::new(Transition::Next(SceneId::ArcadeWorld));
        script.label("starting_room");

        script.call(Action::PlayMusic {
            key: "bedroom".to_string(),
            looped: true,
        });

        stage.spawn(VisualSpec::new("room", cx.center_x(), cx.center_y()).with_depth(-10.0));
        stage.spawn(VisualSpec::new("desk", 240.0, 170.0));

        script.then(place(TargetId::OVERLAY, vec![(Prop::Alpha, 1.0)]));
        script.then(compose::fade_screen(0.0, 0.8));

        // The avatar shuffles in from the door and sits at the desk.
        let avatar = stage.spawn(VisualSpec::new("avatar", 30.0, 180.0).with_depth(5.0));
        script.then(compose::keyframes(
            avatar,
            &[
                Keyframe::new(90.0, 180.0, 0.8).with_ease(Ease::QuadInOut),
                Keyframe::new(150.0, 175.0, 0.8).with_ease(Ease::QuadInOut),
                Keyframe::new(215.0, 170.0, 0.7).with_ease(Ease::QuadOut).with_scale(1.1),
            ],
        ));
        script.then(compose::camera_zoom(1.3, 1.2, Ease::QuadInOut));

        run_dialogue(
            &mut script,
            vec![
                DialogueLine::spoken("Kid", "Eight years old. One hand-me-down computer.")
                    .with_tick_sfx("beep"),
                DialogueLine::spoken("Kid", "It could barely run a browser.").with_tick_sfx("beep"),
                DialogueLine::spoken("Kid", "It ran my imagination just fine.").with_tick_sfx("beep"),
            ],
            0.8,
        );

        script.then(compose::camera_zoom(1.0, 0.8, Ease::QuadInOut));
        script.then(compose::fade_screen(1.0, 0.6));
        script
    }
}
