// Integration tests (native) for the `thaw-card` crate.
// These drive the stage controller on a manual clock and avoid wasm/browser
// APIs so they run under `cargo test` on the host.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use thaw_card::particles::{ParticleField, ParticleMode};
use thaw_card::scheduler::ManualClock;
use thaw_card::stage::{ARRIVAL_VOLUME, Effect};
use thaw_card::{CardConfig, Stage, StageController};

fn card() -> StageController<ManualClock> {
    StageController::new(CardConfig::default(), ManualClock::new())
}

fn card_with_greeting(text: &str) -> StageController<ManualClock> {
    let cfg = CardConfig {
        greeting: text.to_string(),
        ..CardConfig::default()
    };
    StageController::new(cfg, ManualClock::new())
}

fn thaw(c: &mut StageController<ManualClock>) {
    c.press_start();
    c.advance(1_500);
    c.press_end();
    assert_eq!(c.state().stage, Stage::Reassurance);
}

fn play_count(effects: &[Effect]) -> usize {
    effects
        .iter()
        .filter(|e| matches!(e, Effect::PlayAudio { .. }))
        .count()
}

#[test]
fn short_holds_leave_the_card_frozen() {
    for hold_ms in [0, 30, 500, 1_000, 1_469, 1_499] {
        let mut c = card();
        c.press_start();
        c.advance(hold_ms);
        assert_eq!(c.state().charge as u64, (hold_ms / 30) * 2, "hold {hold_ms}ms");
        c.press_end();
        assert_eq!(c.state().charge, 0, "hold {hold_ms}ms");
        assert_eq!(c.state().stage, Stage::Gesture, "hold {hold_ms}ms");
        c.advance(5_000);
        assert_eq!(c.state().charge, 0, "timer must stop on release");
        assert!(c.take_effects().is_empty());
    }
}

#[test]
fn long_holds_thaw_exactly_once() {
    for hold_ms in [1_500, 1_530, 3_000, 60_000] {
        let mut c = card();
        c.press_start();
        c.advance(hold_ms);
        assert_eq!(c.state().stage, Stage::Reassurance, "hold {hold_ms}ms");
        assert_eq!(c.state().charge, 100);
        assert!(c.state().audio_on);
        let effects = c.take_effects();
        assert_eq!(
            effects,
            vec![Effect::PlayAudio {
                volume: ARRIVAL_VOLUME,
                from_start: false
            }]
        );
        c.press_end();
        assert_eq!(c.state().stage, Stage::Reassurance);
        assert_eq!(c.scheduler().pending(), 0);
    }
}

#[test]
fn repeated_press_start_does_not_speed_up_charge() {
    let mut c = card();
    c.press_start();
    c.advance(90);
    c.press_start();
    c.press_start();
    c.advance(90);
    assert_eq!(c.state().charge, 12);
}

#[test]
fn merry_christmas_reveals_word_space_word() {
    let mut c = card_with_greeting("Merry Christmas");
    thaw(&mut c);
    c.continue_to_greeting();
    assert_eq!(c.state().stage, Stage::Greeting);
    assert!(c.revealed().is_empty());

    c.advance(249);
    assert!(c.revealed().is_empty());
    c.advance(1);
    // the space shows together with the word before it
    assert_eq!(c.revealed(), ["Merry", " "]);

    c.advance(249);
    assert_eq!(c.revealed().len(), 2);
    c.advance(1);
    assert_eq!(c.revealed(), ["Merry", " ", "Christmas"]);

    // only the auto-advance is left once the text is complete
    assert_eq!(c.scheduler().pending(), 1);
    c.advance(2_499);
    assert_eq!(c.state().stage, Stage::Greeting);
    c.advance(1);
    assert_eq!(c.state().stage, Stage::Gift);
    assert_eq!(c.scheduler().pending(), 0);
}

#[test]
fn new_greeting_text_restarts_reveal() {
    let mut c = card();
    thaw(&mut c);
    c.continue_to_greeting();
    c.advance(750);
    assert!(c.revealed().len() >= 3);
    c.set_greeting("Happy New Year");
    assert!(c.revealed().is_empty());
    c.advance(250);
    assert_eq!(c.revealed(), ["Happy", " "]);
    c.advance(500);
    assert_eq!(c.revealed(), ["Happy", " ", "New", " ", "Year"]);
}

#[test]
fn full_journey_and_replay() {
    let mut c = card();
    let mut field = ParticleField::new(1_024.0, 768.0, SmallRng::seed_from_u64(42));
    field.set_mode(c.state().particle_mode());
    assert_eq!(field.mode(), ParticleMode::Off);

    thaw(&mut c);
    field.set_mode(c.state().particle_mode());
    assert_eq!(field.mode(), ParticleMode::Ambient);

    // gift cannot be opened before it is offered
    c.open_gift();
    c.replay();
    assert_eq!(c.state().stage, Stage::Reassurance);

    c.continue_to_greeting();
    assert_eq!(c.state().stage, Stage::Greeting);
    let tokens = c.typewriter().map(|t| t.tokens().len()).unwrap_or(0);
    assert!(tokens > 0);
    // plenty of time for every word plus the pause
    c.advance(tokens as u64 * 250 + 2_500);
    assert_eq!(c.state().stage, Stage::Gift);
    assert!(c.revealed().is_empty(), "greeting unmounts with its act");

    for _ in 0..30 {
        field.step();
    }
    let before = field.len();
    c.open_gift();
    assert_eq!(c.state().stage, Stage::Celebration);
    assert!(c.state().celebrate);
    field.set_mode(c.state().particle_mode());
    assert_eq!(field.len(), before + 150);

    c.replay();
    let s = c.state();
    assert_eq!(s.stage, Stage::Gesture);
    assert_eq!(s.charge, 0);
    assert!(!s.celebrate);
    field.set_mode(s.particle_mode());
    for _ in 0..250 {
        field.step();
    }
    assert!(field.is_empty());

    // a second run works the same way
    thaw(&mut c);
    assert_eq!(play_count(&c.take_effects()), 2);
}

#[test]
fn audio_toggle_reflects_intent() {
    let mut c = card();
    c.toggle_audio();
    assert!(c.state().audio_on);
    assert!(matches!(
        c.take_effects().as_slice(),
        [Effect::PlayAudio { from_start: true, .. }]
    ));
    c.toggle_audio();
    assert!(!c.state().audio_on);
    assert_eq!(c.take_effects(), vec![Effect::MuteAudio]);
    assert_eq!(c.state().stage, Stage::Gesture);
}
