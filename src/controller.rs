//! Stage controller: owns the card state, the thaw gesture, the typewriter and
//! every timer, and turns input plus timer callbacks into state transitions.

use log::{debug, info};

use crate::charge::{ChargeGesture, ChargeTick};
use crate::config::CardConfig;
use crate::scheduler::{ManualClock, Scheduler, Timer, TimerHandle};
use crate::stage::{Action, CardState, Effect, Stage, transition};
use crate::typewriter::Typewriter;

pub struct StageController<S: Scheduler> {
    config: CardConfig,
    scheduler: S,
    state: CardState,
    gesture: ChargeGesture,
    charge_timer: Option<TimerHandle>,
    typewriter: Option<Typewriter>,
    reveal_timer: Option<TimerHandle>,
    advance_timer: Option<TimerHandle>,
    effects: Vec<Effect>,
}

impl<S: Scheduler> StageController<S> {
    pub fn new(config: CardConfig, scheduler: S) -> Self {
        let gesture = ChargeGesture::new(config.charge_step);
        Self {
            config,
            scheduler,
            state: CardState::default(),
            gesture,
            charge_timer: None,
            typewriter: None,
            reveal_timer: None,
            advance_timer: None,
            effects: Vec::new(),
        }
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Tokens the greeting has revealed so far (empty outside the greeting act).
    pub fn revealed(&self) -> &[String] {
        self.typewriter.as_ref().map(|t| t.revealed()).unwrap_or(&[])
    }

    pub fn typewriter(&self) -> Option<&Typewriter> {
        self.typewriter.as_ref()
    }

    /// Effects produced since the last call, in order.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    fn apply(&mut self, action: Action) {
        let before = self.state.stage;
        let (next, effect) = transition(self.state, action);
        self.state = next;
        if let Some(fx) = effect {
            self.effects.push(fx);
        }
        if next.stage != before {
            info!("stage {} -> {}", before.name(), next.stage.name());
            self.on_stage_change(before, next.stage);
        }
    }

    fn on_stage_change(&mut self, from: Stage, to: Stage) {
        if from == Stage::Greeting {
            self.typewriter = None;
            self.cancel_slot(Slot::Reveal);
            self.cancel_slot(Slot::Advance);
        }
        match to {
            Stage::Greeting => {
                self.typewriter = Some(Typewriter::new(&self.config.greeting, self.config.word_delay_ms));
                self.queue_reveal();
            }
            Stage::Gesture => {
                self.cancel_slot(Slot::Charge);
                self.gesture.reset();
            }
            _ => {}
        }
    }

    fn cancel_slot(&mut self, slot: Slot) {
        let taken = match slot {
            Slot::Charge => self.charge_timer.take(),
            Slot::Reveal => self.reveal_timer.take(),
            Slot::Advance => self.advance_timer.take(),
        };
        if let Some(handle) = taken {
            self.scheduler.cancel(handle);
        }
    }

    // --- input -----------------------------------------------------------

    pub fn press_start(&mut self) {
        if self.state.stage != Stage::Gesture || self.charge_timer.is_some() {
            return;
        }
        if self.gesture.press() {
            debug!("thaw gesture started");
            let handle = self
                .scheduler
                .schedule_repeating(self.config.charge_tick_ms, Timer::ChargeTick);
            self.charge_timer = Some(handle);
        }
    }

    pub fn press_end(&mut self) {
        if self.gesture.release() {
            debug!("thaw gesture released at {}", self.state.charge);
            self.cancel_slot(Slot::Charge);
            self.apply(Action::Charge(0));
        }
    }

    pub fn continue_to_greeting(&mut self) {
        self.apply(Action::Continue);
    }

    pub fn open_gift(&mut self) {
        self.apply(Action::OpenGift);
    }

    pub fn replay(&mut self) {
        self.apply(Action::Replay);
    }

    pub fn toggle_audio(&mut self) {
        self.apply(Action::ToggleAudio);
    }

    // --- timers ----------------------------------------------------------

    /// Route a timer callback. Unknown or stale timers are ignored.
    pub fn fire(&mut self, handle: TimerHandle, timer: Timer) {
        self.scheduler.fired(handle);
        match timer {
            Timer::ChargeTick => {
                if self.charge_timer != Some(handle) {
                    return;
                }
                match self.gesture.tick() {
                    ChargeTick::Charging(value) => self.apply(Action::Charge(value)),
                    ChargeTick::Complete => {
                        self.cancel_slot(Slot::Charge);
                        self.apply(Action::Thawed);
                    }
                    ChargeTick::Idle => self.cancel_slot(Slot::Charge),
                }
            }
            Timer::RevealToken { generation, index } => {
                if self.reveal_timer != Some(handle) {
                    return;
                }
                self.reveal_timer = None;
                if let Some(tw) = self.typewriter.as_mut() {
                    tw.reveal(generation, index);
                }
                // the one-shot is spent either way; re-arm from the current position
                self.queue_reveal();
            }
            Timer::AutoAdvance => {
                if self.advance_timer != Some(handle) {
                    return;
                }
                self.advance_timer = None;
                self.apply(Action::GreetingFinished);
            }
        }
    }

    fn queue_reveal(&mut self) {
        let Some(tw) = self.typewriter.as_mut() else {
            return;
        };
        match tw.next_delay() {
            Some(delay) => {
                let timer = Timer::RevealToken {
                    generation: tw.generation(),
                    index: tw.revealed_len(),
                };
                self.reveal_timer = Some(self.scheduler.schedule_once(delay, timer));
            }
            None => {
                if tw.take_completion() {
                    debug!("greeting revealed");
                    let handle = self
                        .scheduler
                        .schedule_once(self.config.auto_advance_ms, Timer::AutoAdvance);
                    self.advance_timer = Some(handle);
                }
            }
        }
    }

    /// Swap the greeting text while it is being revealed. The reveal restarts
    /// from the first token of the new text.
    pub fn set_greeting(&mut self, text: &str) {
        self.config.greeting = text.to_string();
        let restarted = self
            .typewriter
            .as_mut()
            .map(|tw| tw.set_text(text))
            .unwrap_or(false);
        if restarted {
            self.cancel_slot(Slot::Reveal);
            self.cancel_slot(Slot::Advance);
            self.queue_reveal();
        }
    }

    /// Cancel every outstanding timer. The controller stays usable but idle.
    pub fn teardown(&mut self) {
        self.cancel_slot(Slot::Charge);
        self.cancel_slot(Slot::Reveal);
        self.cancel_slot(Slot::Advance);
        self.gesture.release();
    }

    pub fn into_scheduler(mut self) -> S {
        self.teardown();
        self.scheduler
    }
}

#[derive(Clone, Copy)]
enum Slot {
    Charge,
    Reveal,
    Advance,
}

impl StageController<ManualClock> {
    /// Let `ms` milliseconds pass on the manual clock, firing every timer that
    /// falls due on the way in order.
    pub fn advance(&mut self, ms: u64) {
        let until = self.scheduler.now_ms() + ms;
        while let Some((handle, timer)) = self.scheduler.pop_due(until) {
            self.fire(handle, timer);
        }
        self.scheduler.settle(until);
    }
}
