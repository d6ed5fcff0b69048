use super::*;

fn two_lines() -> DialogueSequence {
    DialogueSequence::new(vec![
        DialogueLine::spoken("Guide", "Hi").with_delay_ms(10),
        DialogueLine::spoken("Guide", "Bye").with_delay_ms(10),
    ])
}

#[test]
fn show_starts_the_first_line_empty() {
    let mut seq = DialogueSequencer::new();
    let events = seq.show(two_lines());
    assert_eq!(
        events,
        vec![DialogueEvent::LineStarted {
            index: 0,
            speaker: Some("Guide".to_string()),
        }]
    );
    assert!(seq.is_active());
    assert_eq!(seq.displayed_text(), "");
    assert!(!seq.indicator_visible());
}

#[test]
fn show_while_active_is_a_noop() {
    let mut seq = DialogueSequencer::new();
    seq.show(two_lines());
    seq.tick(0.01);
    let before = seq.displayed_text().to_string();

    let events = seq.show(DialogueSequence::new(vec![DialogueLine::narration(
        "intruder",
    )]));
    assert!(events.is_empty());
    assert_eq!(seq.displayed_text(), before);
    assert_eq!(seq.current_line_index(), Some(0));
}

#[test]
fn characters_appear_on_the_fixed_cadence() {
    let mut seq = DialogueSequencer::new();
    seq.show(two_lines());

    let events = seq.tick(0.010);
    assert_eq!(
        events,
        vec![DialogueEvent::CharTyped { ch: 'H', sfx: None }]
    );
    assert_eq!(seq.displayed_text(), "H");

    // Full line reached: the indicator comes up without an advance.
    let events = seq.tick(0.010);
    assert_eq!(
        events,
        vec![
            DialogueEvent::CharTyped { ch: 'i', sfx: None },
            DialogueEvent::LineDone { index: 0 },
        ]
    );
    assert_eq!(seq.displayed_text(), "Hi");
    assert!(seq.indicator_visible());
}

#[test]
fn advance_mid_typing_completes_the_line_instantly() {
    let mut seq = DialogueSequencer::new();
    seq.show(DialogueSequence::new(vec![
        DialogueLine::spoken("Guide", "A longer line").with_delay_ms(30),
        DialogueLine::spoken("Guide", "Next").with_delay_ms(30),
    ]));
    seq.tick(0.030);
    assert_eq!(seq.displayed_text(), "A");

    let events = seq.advance();
    assert_eq!(events, vec![DialogueEvent::LineDone { index: 0 }]);
    assert_eq!(seq.displayed_text(), "A longer line");
    assert!(seq.indicator_visible());

    // Second advance moves on; displayed text resets before typing resumes.
    let events = seq.advance();
    assert_eq!(
        events,
        vec![DialogueEvent::LineStarted {
            index: 1,
            speaker: Some("Guide".to_string()),
        }]
    );
    assert_eq!(seq.displayed_text(), "");
    assert!(!seq.indicator_visible());
}

#[test]
fn hi_bye_end_to_end() {
    let mut seq = DialogueSequencer::new();
    seq.show(two_lines());

    // 20 ms of simulated ticking, no intervening advance.
    seq.tick(0.020);
    assert_eq!(seq.displayed_text(), "Hi");
    assert!(seq.indicator_visible());

    let events = seq.advance();
    assert_eq!(
        events,
        vec![DialogueEvent::LineStarted {
            index: 1,
            speaker: Some("Guide".to_string()),
        }]
    );
    assert_eq!(seq.displayed_text(), "");

    seq.tick(0.030);
    assert_eq!(seq.displayed_text(), "Bye");
    assert!(seq.indicator_visible());

    let events = seq.advance();
    assert_eq!(events, vec![DialogueEvent::SequenceDone]);
    assert!(!seq.is_active());
    assert_eq!(seq.displayed_text(), "");
}

#[test]
fn tick_sound_fires_for_non_space_characters_only() {
    let mut seq = DialogueSequencer::new();
    seq.show(DialogueSequence::new(vec![
        DialogueLine::spoken("Guide", "a b")
            .with_delay_ms(10)
            .with_tick_sfx("beep"),
    ]));

    let events = seq.tick(0.030);
    let sfx: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            DialogueEvent::CharTyped { sfx, .. } => Some(sfx.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(
        sfx,
        vec![Some("beep".to_string()), None, Some("beep".to_string())]
    );
}

#[test]
fn typewriter_handles_multibyte_text() {
    let mut seq = DialogueSequencer::new();
    seq.show(DialogueSequence::new(vec![
        DialogueLine::narration("héllo ✦").with_delay_ms(10),
    ]));
    seq.tick(0.020);
    assert_eq!(seq.displayed_text(), "hé");
    seq.advance();
    assert_eq!(seq.displayed_text(), "héllo ✦");
}

#[test]
fn hide_discards_the_active_sequence() {
    let mut seq = DialogueSequencer::new();
    seq.show(two_lines());
    seq.tick(0.010);

    let events = seq.hide();
    assert_eq!(events, vec![DialogueEvent::Hidden]);
    assert!(!seq.is_active());

    // Hiding again reports nothing.
    assert!(seq.hide().is_empty());

    // A new sequence can start afterwards.
    assert!(!seq.show(two_lines()).is_empty());
}

#[test]
fn advance_while_idle_is_ignored() {
    let mut seq = DialogueSequencer::new();
    assert!(seq.advance().is_empty());
    assert!(seq.tick(1.0).is_empty());
}

#[test]
fn per_line_delay_override_applies() {
    let mut seq = DialogueSequencer::new();
    seq.show(DialogueSequence::new(vec![
        DialogueLine::narration("slow").with_delay_ms(100),
    ]));
    assert!(seq.tick(0.050).is_empty());
    let events = seq.tick(0.050);
    assert_eq!(
        events,
        vec![DialogueEvent::CharTyped { ch: 's', sfx: None }]
    );
}
