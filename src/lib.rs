//! Thaw Card core crate.
//!
//! An animated greeting card in five acts: hold to thaw, a word of
//! reassurance, a typewriter greeting, a gift, and a celebration burst. The
//! state machine, gesture, typewriter, particle field and scheduler are plain
//! Rust and testable on the host; `card` mounts them into the browser.

use wasm_bindgen::prelude::*;

pub mod charge;
pub mod config;
pub mod controller;
pub mod error;
pub mod particles;
pub mod scheduler;
pub mod stage;
pub mod typewriter;

mod card;
mod logging;

pub use config::CardConfig;
pub use controller::StageController;
pub use error::CardError;
pub use stage::{CardState, Stage};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
}

// -----------------------------------------------------------------------------
// Card copy and assets
// -----------------------------------------------------------------------------

pub const AUDIO_SRC: &str = "/song.mp3";

pub const BACKGROUND_WINTER: &str =
    "https://images.unsplash.com/photo-1482608110091-c955737483dd?auto=format&fit=crop&q=80&w=2000";
pub const BACKGROUND_WARM: &str =
    "https://images.unsplash.com/photo-1511268011861-691ed210aae8?auto=format&fit=crop&q=80&w=2000";

pub const THAW_TITLE: &str = "Hold to Thaw";
pub const THAW_HINT: &str = "A special warmth is waiting...";

pub const REASSURANCE_TITLE: &str = "Listen to me, Tarnija.";
pub const REASSURANCE_BODY: &str = "One exam does not define your magic. You are far more capable, brilliant, and resilient than any piece of paper could ever measure.";
pub const REASSURANCE_QUOTE: &str = "\"Winter is just a season; your strength is eternal.\"";
pub const CONTINUE_LABEL: &str = "Let's Celebrate You";

pub const GREETING_TITLE: &str = "Heartfelt Greeting";
pub const GREETING: &str = "MERRY CHRISTMAS, TARNIJA! May your holiday be as calm as a snowy forest and as bright as a winter star. You bring so much peace and light into the world. May this season wrap you in warmth and wonder.";

pub const GIFT_TITLE: &str = "A Gift of Resilience";
pub const GIFT_HINT: &str = "Tap to Unleash the Magic";

pub const CELEBRATION_TITLE: &str = "Shine On.";
pub const CELEBRATION_BODY: &str =
    "You are a star that doesn't need an exam to prove its brightness, Tarnija.";
pub const REPLAY_LABEL: &str = "Relive the Journey";

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_card() -> Result<(), JsValue> {
    card::mount(CardConfig::default()).map_err(JsValue::from)
}

/// Start with a partial JSON override of [`CardConfig`].
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_card_with_config(json: &str) -> Result<(), JsValue> {
    let cfg = CardConfig::from_json(json)?;
    card::mount(cfg).map_err(JsValue::from)
}

/// Remove the card from the page and release every timer, frame callback and
/// listener it holds.
#[wasm_bindgen]
pub fn stop_card() {
    card::unmount();
}

/// Current act index (0-4), or -1 when the card is not mounted.
#[wasm_bindgen]
pub fn card_stage() -> i32 {
    card::current_stage().map(|s| s.index() as i32).unwrap_or(-1)
}
