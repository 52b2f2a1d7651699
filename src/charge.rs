//! Hold-to-thaw gesture: charge accumulates while the control is held and
//! fires once when it reaches [`CHARGE_MAX`].

pub const CHARGE_MAX: u8 = 100;
pub const CHARGE_STEP: u8 = 2;
pub const CHARGE_TICK_MS: u32 = 30;

/// Outcome of one gesture tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChargeTick {
    /// Still filling; carries the new charge.
    Charging(u8),
    /// Charge hit the cap on this tick. Reported once per gesture.
    Complete,
    /// Tick arrived while not held (stale timer); nothing changed.
    Idle,
}

#[derive(Clone, Debug)]
pub struct ChargeGesture {
    value: u8,
    step: u8,
    holding: bool,
    complete: bool,
}

impl Default for ChargeGesture {
    fn default() -> Self {
        Self::new(CHARGE_STEP)
    }
}

impl ChargeGesture {
    pub fn new(step: u8) -> Self {
        Self {
            value: 0,
            step: step.max(1),
            holding: false,
            complete: false,
        }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn is_holding(&self) -> bool {
        self.holding
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Begin a hold. Returns `true` when the caller should start the tick timer;
    /// a second press while already holding (or after completion) returns `false`.
    pub fn press(&mut self) -> bool {
        if self.holding || self.complete {
            return false;
        }
        self.holding = true;
        true
    }

    pub fn tick(&mut self) -> ChargeTick {
        if !self.holding || self.complete {
            return ChargeTick::Idle;
        }
        let next = self.value.saturating_add(self.step);
        if next >= CHARGE_MAX {
            self.value = CHARGE_MAX;
            self.holding = false;
            self.complete = true;
            ChargeTick::Complete
        } else {
            self.value = next;
            ChargeTick::Charging(next)
        }
    }

    /// End a hold. Returns `true` when the tick timer must be cancelled. No
    /// partial credit: an unfinished charge drops back to zero.
    pub fn release(&mut self) -> bool {
        if !self.holding {
            return false;
        }
        self.holding = false;
        self.value = 0;
        true
    }

    pub fn reset(&mut self) {
        self.value = 0;
        self.holding = false;
        self.complete = false;
    }
}
