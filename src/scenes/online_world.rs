//! The multiplayer beat: other people arrive. Avatars pop in one by one
//! and a chat log fills while the music ducks under the chatter.

use crate::assets::AssetSpec;
use crate::compose;
use crate::scenes::{Scene, SceneContext, place, run_dialogue};
use crate::stage::Stage;
use crate::timeline::Ease;
use crate::types::dialogue::DialogueLine;
use crate::types::scene::{SceneId, SceneScript, Transition};
use crate::types::segment::{Action, At, StageOp};
use crate::types::stage::{Prop, TargetId, VisualSpec};

pub struct OnlineWorld;

impl Scene for OnlineWorld {
    fn id(&self) -> SceneId {
        SceneId::OnlineWorld
    }

    fn audio_assets(&self) -> Vec<AssetSpec> {
        vec![
            AssetSpec::music("lobby", "audio/lobby_loop.ogg"),
            AssetSpec::sfx("join", "audio/join.ogg"),
            AssetSpec::sfx("beep", "audio/dialogue_beep.ogg"),
        ]
    }

    fn build(&self, stage: &mut dyn Stage, cx: &SceneContext) -> SceneScript {
        let mut script = SceneScript::new(Transition::Next(SceneId::Campus));
        script.label("online_world");

        script.call(Action::PlayMusic {
            key: "lobby".to_string(),
            looped: true,
        });
        stage.spawn(VisualSpec::new("plaza", cx.center_x(), cx.center_y()).with_depth(-10.0));
        script.then(place(TargetId::OVERLAY, vec![(Prop::Alpha, 1.0)]));
        script.then(compose::fade_screen(0.0, 0.5));

        // Friends connect: each avatar drops in with a join chirp.
        let spots = [(70.0, 150.0), (130.0, 160.0), (190.0, 150.0), (250.0, 160.0)];
        for (x, y) in spots {
            let avatar = stage.spawn(VisualSpec::new("player", x, y - 30.0).with_alpha(0.0));
            script.call(Action::PlaySfx {
                key: "join".to_string(),
            });
            script.then(compose::move_to(avatar, x, y, 0.4, Ease::BounceOut));
            script.push(
                compose::fade_to(avatar, 1.0, 0.3),
                At::Relative { offset: -0.4 },
            );
            script.wait(0.2);
        }

        // Chat log scrolls up line by line.
        let chat = stage.spawn(VisualSpec::text("chat", 90.0, 40.0, "").with_depth(20.0));
        for line in [
            "wren joined the server",
            "wren: this lag is a feature right",
            "mako: ship it",
            "juno: ok the door puzzle is actually good",
        ] {
            script.call(Action::Stage {
                op: StageOp::SetText {
                    target: chat,
                    text: line.to_string(),
                },
            });
            script.wait(0.9);
        }

        // Keep the beeps audible over the lobby loop.
        script.call(Action::DuckMusic {
            gain: 0.15,
            seconds: 0.2,
        });
        run_dialogue(
            &mut script,
            vec![
                DialogueLine::spoken("Teen", "Multiplayer broke everything I thought I knew.")
                    .with_tick_sfx("beep"),
                DialogueLine::spoken("Teen", "Latency. State sync. Cheaters, on day one.")
                    .with_tick_sfx("beep"),
                DialogueLine::spoken("Teen", "Also: the first time anyone called my game 'ours'.")
                    .with_tick_sfx("beep"),
            ],
            0.8,
        );
        script.call(Action::RestoreMusic { seconds: 0.3 });

        script.then(compose::fade_screen(1.0, 0.6));
        script
    }
}
