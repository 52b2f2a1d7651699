//! The card's acts and the pure transition function that moves between them.

use crate::particles::ParticleMode;

/// Pause between the greeting finishing and the gift prompt.
pub const AUTO_ADVANCE_MS: u32 = 2500;
/// Volume used when the thaw gesture first starts the music.
pub const ARRIVAL_VOLUME: f64 = 0.6;
/// Volume used when the audio button restarts the music.
pub const TOGGLE_VOLUME: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub enum Stage {
    /// Waiting for the hold-to-thaw gesture.
    #[default]
    Gesture,
    Reassurance,
    /// Typewriter greeting.
    Greeting,
    Gift,
    Celebration,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Gesture,
        Stage::Reassurance,
        Stage::Greeting,
        Stage::Gift,
        Stage::Celebration,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(idx: u8) -> Option<Stage> {
        Self::ALL.get(idx as usize).copied()
    }

    fn next(self) -> Stage {
        Self::from_index(self.index() + 1).unwrap_or(Stage::Gesture)
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Gesture => "gesture",
            Stage::Reassurance => "reassurance",
            Stage::Greeting => "greeting",
            Stage::Gift => "gift",
            Stage::Celebration => "celebration",
        }
    }
}

/// User input or timer completion that may move the card forward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    /// Gesture charge changed while held (or dropped back on release).
    Charge(u8),
    /// Gesture reached full charge.
    Thawed,
    Continue,
    /// Auto-advance after the greeting finished revealing.
    GreetingFinished,
    OpenGift,
    Replay,
    ToggleAudio,
}

/// Side effects the host must perform for a transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    PlayAudio { volume: f64, from_start: bool },
    MuteAudio,
}

/// Snapshot of everything the page renders from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct CardState {
    pub stage: Stage,
    pub charge: u8,
    pub celebrate: bool,
    /// Whether the audio toggle shows "playing". Reflects intent, not whether
    /// the browser allowed playback.
    pub audio_on: bool,
}

impl CardState {
    pub fn particle_mode(&self) -> ParticleMode {
        if self.celebrate {
            ParticleMode::Explosion
        } else if self.stage > Stage::Gesture {
            ParticleMode::Ambient
        } else {
            ParticleMode::Off
        }
    }

    pub fn background(&self) -> &'static str {
        if self.stage < Stage::Greeting {
            crate::BACKGROUND_WINTER
        } else {
            crate::BACKGROUND_WARM
        }
    }
}

/// Apply `action` to `state`. Actions that do not belong to the current stage
/// return the state unchanged with no effect.
pub fn transition(state: CardState, action: Action) -> (CardState, Option<Effect>) {
    let mut next = state;
    let effect = match (state.stage, action) {
        (Stage::Gesture, Action::Charge(value)) => {
            next.charge = value.min(crate::charge::CHARGE_MAX);
            None
        }
        (Stage::Gesture, Action::Thawed) => {
            next.charge = crate::charge::CHARGE_MAX;
            next.stage = state.stage.next();
            next.audio_on = true;
            Some(Effect::PlayAudio {
                volume: ARRIVAL_VOLUME,
                from_start: false,
            })
        }
        (Stage::Reassurance, Action::Continue) | (Stage::Greeting, Action::GreetingFinished) => {
            next.stage = state.stage.next();
            None
        }
        (Stage::Gift, Action::OpenGift) => {
            next.celebrate = true;
            next.stage = state.stage.next();
            None
        }
        (Stage::Celebration, Action::Replay) => {
            next.stage = Stage::Gesture;
            next.charge = 0;
            next.celebrate = false;
            None
        }
        (_, Action::ToggleAudio) => {
            next.audio_on = !state.audio_on;
            Some(if next.audio_on {
                Effect::PlayAudio {
                    volume: TOGGLE_VOLUME,
                    from_start: true,
                }
            } else {
                Effect::MuteAudio
            })
        }
        _ => None,
    };
    (next, effect)
}
