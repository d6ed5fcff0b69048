//! The campus beat: present day. The music changes key, the camera walks
//! up to the gates, and the narrator talks to you directly.

use crate::assets::AssetSpec;
use crate::compose::{self, Keyframe};
use crate::scenes::{Scene, SceneContext, place, run_dialogue};
use crate::stage::Stage;
use crate::timeline::Ease;
use crate::types::dialogue::DialogueLine;
use crate::types::scene::{SceneId, SceneScript, Transition};
use crate::types::segment::Action;
use crate::types::stage::{Prop, TargetId, VisualSpec};

pub struct Campus;

impl Scene for Campus {
    fn id(&self) -> SceneId {
        SceneId::Campus
    }

    fn audio_assets(&self) -> Vec<AssetSpec> {
        vec![
            AssetSpec::music("morning", "audio/morning_theme.ogg"),
            AssetSpec::sfx("beep", "audio/dialogue_beep.ogg"),
        ]
    }

    fn build(&self, stage: &mut dyn Stage, cx: &SceneContext) -> SceneScript {
        let mut script = SceneScript::new(Transition::Next(SceneId::Finale));
        script.label("campus");

        // Let the lobby loop breathe out before the new theme starts.
        script.call(Action::StopMusic { fade_seconds: 1.0 });
        script.wait(1.2);
        script.call(Action::PlayMusic {
            key: "morning".to_string(),
            looped: true,
        });

        stage.spawn(VisualSpec::new("campus", 320.0, cx.center_y()).with_depth(-10.0));
        let gates = stage.spawn(VisualSpec::new("gates", 480.0, 120.0).with_depth(-5.0));
        script.then(place(TargetId::OVERLAY, vec![(Prop::Alpha, 1.0)]));
        script.then(compose::fade_screen(0.0, 1.0));

        // Long walk: the avatar crosses the green while the camera tracks.
        let walker = stage.spawn(VisualSpec::new("avatar", 40.0, 190.0).with_depth(5.0));
        script.then(compose::keyframes(
            walker,
            &[
                Keyframe::new(140.0, 188.0, 1.2).with_ease(Ease::QuadInOut),
                Keyframe::new(260.0, 185.0, 1.2).with_ease(Ease::QuadInOut),
                Keyframe::new(400.0, 182.0, 1.4).with_ease(Ease::QuadInOut),
            ],
        ));
        script.push(
            compose::camera_pan(400.0, 140.0, cx.view, 3.2, Ease::QuadInOut),
            crate::types::segment::At::Relative { offset: -3.4 },
        );
        script.then(compose::fade_to(gates, 1.0, 0.8));

        run_dialogue(
            &mut script,
            vec![
                DialogueLine::spoken("Me", "So that's the route: snake, blocks, worlds, servers.")
                    .with_tick_sfx("beep"),
                DialogueLine::spoken("Me", "Every stop taught me one thing the last one couldn't.")
                    .with_tick_sfx("beep"),
                DialogueLine::spoken("Me", "Now I want the stop where I learn the things I can't teach myself.")
                    .with_tick_sfx("beep"),
            ],
            0.9,
        );

        script.then(compose::camera_zoom(1.15, 1.5, Ease::QuadInOut));
        script.then(compose::fade_screen(1.0, 1.0));
        script
    }
}
