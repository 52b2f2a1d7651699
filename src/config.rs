//! Card tunables. Defaults reproduce the shipped card; the `serde_json` feature
//! lets a host page override any subset of them.

use crate::charge::{CHARGE_STEP, CHARGE_TICK_MS};
use crate::particles::{BURST_SIZE, SPAWN_CHANCE};
use crate::stage::AUTO_ADVANCE_MS;
use crate::typewriter::WORD_DELAY_MS;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CardConfig {
    /// Interval of the hold gesture timer.
    pub charge_tick_ms: u32,
    /// Charge added per gesture tick.
    pub charge_step: u8,
    /// Delay before each non-whitespace token of the greeting.
    pub word_delay_ms: u32,
    /// Pause between the end of the greeting and the gift prompt.
    pub auto_advance_ms: u32,
    pub burst_size: usize,
    /// Per-frame probability of one new ambient particle.
    pub spawn_chance: f64,
    pub audio_src: String,
    pub greeting: String,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            charge_tick_ms: CHARGE_TICK_MS,
            charge_step: CHARGE_STEP,
            word_delay_ms: WORD_DELAY_MS,
            auto_advance_ms: AUTO_ADVANCE_MS,
            burst_size: BURST_SIZE,
            spawn_chance: SPAWN_CHANCE,
            audio_src: crate::AUDIO_SRC.to_string(),
            greeting: crate::GREETING.to_string(),
        }
    }
}

impl CardConfig {
    /// Parse a partial JSON object; absent fields keep their defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, crate::error::CardError> {
        let cfg: CardConfig = serde_json::from_str(json)
            .map_err(|e| crate::error::CardError::Config(e.to_string()))?;
        cfg.validated()
    }

    /// Reject values that would stall the card (zero-length gesture steps).
    pub fn validated(self) -> Result<Self, crate::error::CardError> {
        use crate::error::CardError;
        if self.charge_step == 0 {
            return Err(CardError::Config("charge_step must be > 0".into()));
        }
        if self.charge_tick_ms == 0 {
            return Err(CardError::Config("charge_tick_ms must be > 0".into()));
        }
        if !(0.0..=1.0).contains(&self.spawn_chance) {
            return Err(CardError::Config("spawn_chance must be within 0..=1".into()));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_card_timings() {
        let cfg = CardConfig::default();
        assert_eq!(cfg.charge_tick_ms, 30);
        assert_eq!(cfg.charge_step, 2);
        assert_eq!(cfg.word_delay_ms, 250);
        assert_eq!(cfg.auto_advance_ms, 2500);
        assert_eq!(cfg.burst_size, 150);
        assert!(cfg.validated().is_ok());
    }

    #[test]
    fn zero_step_is_rejected() {
        let cfg = CardConfig {
            charge_step: 0,
            ..CardConfig::default()
        };
        assert!(cfg.validated().is_err());
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = CardConfig::from_json(r#"{"word_delay_ms": 100}"#).unwrap();
        assert_eq!(cfg.word_delay_ms, 100);
        assert_eq!(cfg.charge_step, CHARGE_STEP);
        assert_eq!(cfg.greeting, crate::GREETING);
    }
}
