//! Browser host for the card.
//!
//! Builds the page (background layer, particle canvas, audio button, act
//! container), keeps the mounted card in a thread-local, routes DOM events and
//! timer callbacks into the [`StageController`], and re-renders whatever the
//! new [`CardState`] changed.
//!
//! [`CardState`]: crate::stage::CardState

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, window};

use crate::config::CardConfig;
use crate::controller::StageController;
use crate::error::CardError;
use crate::scheduler::{Timer, TimerHandle};
use crate::stage::{Effect, Stage};

mod acts;
mod audio;
mod canvas;
mod timers;

use acts::{ACTION_AUDIO, ACTION_CONTINUE, ACTION_GIFT, ACTION_REPLAY, ACTION_THAW};
use audio::BackgroundAudio;
use canvas::MagicCanvas;
use timers::BrowserScheduler;

struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        f: impl FnMut(Event) + 'static,
    ) -> Result<Self, CardError> {
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }

    fn detach(self) {
        self.target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref())
            .ok();
    }
}

/// What is currently on screen, so a sync only touches what changed.
#[derive(Default)]
struct View {
    stage: Option<Stage>,
    words: usize,
    charge: Option<u8>,
    audio_on: Option<bool>,
}

struct CardApp {
    controller: StageController<BrowserScheduler>,
    doc: Document,
    root: Element,
    background: Element,
    content: Element,
    audio_button: Element,
    canvas: MagicCanvas,
    audio: BackgroundAudio,
    listeners: Vec<Listener>,
    view: View,
}

thread_local! {
    static CARD: RefCell<Option<CardApp>> = const { RefCell::new(None) };
}

/// Run `f` against the mounted card, then bring the page up to date. Events
/// that arrive while the card is already borrowed (or unmounted) are dropped.
fn with_card(f: impl FnOnce(&mut StageController<BrowserScheduler>)) {
    CARD.with(|cell| {
        let Ok(mut slot) = cell.try_borrow_mut() else {
            return;
        };
        if let Some(app) = slot.as_mut() {
            f(&mut app.controller);
            app.sync();
        }
    });
}

pub(crate) fn on_timer(handle: TimerHandle, timer: Timer) {
    with_card(|c| c.fire(handle, timer));
}

pub(crate) fn current_stage() -> Option<Stage> {
    CARD.with(|cell| {
        cell.try_borrow()
            .ok()
            .and_then(|slot| slot.as_ref().map(|app| app.controller.state().stage))
    })
}

fn action_of(evt: &Event) -> Option<String> {
    let target: Element = evt.target()?.dyn_into().ok()?;
    target
        .closest("[data-action]")
        .ok()
        .flatten()?
        .get_attribute("data-action")
}

pub(crate) fn mount(config: CardConfig) -> Result<(), CardError> {
    unmount();
    let win = window().ok_or(CardError::NoWindow)?;
    let doc = win.document().ok_or(CardError::NoDocument)?;
    let body = doc.body().ok_or(CardError::NoDocument)?;

    let root = doc.create_element("div")?;
    root.set_id("tc-root");
    let style = doc.create_element("style")?;
    style.set_text_content(Some(acts::STYLE_SHEET));
    root.append_child(&style)?;

    let background = doc.create_element("div")?;
    background.set_id("tc-bg");
    root.append_child(&background)?;

    let canvas = MagicCanvas::mount(&win, &doc, &root, &config)?;

    let audio_button = doc.create_element("button")?;
    audio_button.set_id("tc-audio");
    audio_button.set_attribute("data-action", ACTION_AUDIO)?;
    root.append_child(&audio_button)?;
    let audio = BackgroundAudio::mount(&doc, &root, &config.audio_src)?;

    let content = doc.create_element("div")?;
    content.set_id("tc-content");
    root.append_child(&content)?;
    body.append_child(&root)?;

    let mut listeners = Vec::new();
    for kind in ["mousedown", "touchstart"] {
        listeners.push(Listener::attach(&content, kind, move |evt| {
            if action_of(&evt).as_deref() == Some(ACTION_THAW) {
                if evt.type_() == "touchstart" {
                    // keep long-press from opening the context menu
                    evt.prevent_default();
                }
                with_card(|c| c.press_start());
            }
        })?);
    }
    // Releases are caught window-wide so letting go off the button still counts.
    for kind in ["mouseup", "touchend", "touchcancel"] {
        listeners.push(Listener::attach(&win, kind, |_evt| {
            with_card(|c| c.press_end());
        })?);
    }
    listeners.push(Listener::attach(&content, "click", |evt| {
        match action_of(&evt).as_deref() {
            Some(ACTION_CONTINUE) => with_card(|c| c.continue_to_greeting()),
            Some(ACTION_GIFT) => with_card(|c| c.open_gift()),
            Some(ACTION_REPLAY) => with_card(|c| c.replay()),
            _ => {}
        }
    })?);
    listeners.push(Listener::attach(&audio_button, "click", |_evt| {
        with_card(|c| c.toggle_audio());
    })?);

    let mut app = CardApp {
        controller: StageController::new(config, BrowserScheduler::new(win)),
        doc,
        root,
        background,
        content,
        audio_button,
        canvas,
        audio,
        listeners,
        view: View::default(),
    };
    app.sync();
    CARD.with(|cell| *cell.borrow_mut() = Some(app));
    log::info!("card mounted");
    Ok(())
}

pub(crate) fn unmount() {
    let app = CARD.with(|cell| cell.try_borrow_mut().ok().and_then(|mut slot| slot.take()));
    if let Some(app) = app {
        app.teardown();
        log::info!("card unmounted");
    }
}

impl CardApp {
    fn sync(&mut self) {
        for fx in self.controller.take_effects() {
            match fx {
                Effect::PlayAudio { volume, from_start } => self.audio.play(volume, from_start),
                Effect::MuteAudio => self.audio.mute(),
            }
        }

        let state = self.controller.state();
        self.canvas.set_mode(state.particle_mode());

        if self.view.stage != Some(state.stage) {
            self.content.set_inner_html(&acts::act_markup(state.stage));
            let bg = format!("background-image:url(\"{}\")", state.background());
            self.background.set_attribute("style", &bg).ok();
            self.view = View {
                stage: Some(state.stage),
                audio_on: self.view.audio_on,
                ..View::default()
            };
        }

        if state.stage == Stage::Gesture && self.view.charge != Some(state.charge) {
            let (fill, halo) = acts::thaw_styles(state.charge);
            if let Some(el) = self.doc.get_element_by_id(acts::THAW_FILL_ID) {
                el.set_attribute("style", &fill).ok();
            }
            if let Some(el) = self.doc.get_element_by_id(acts::THAW_HALO_ID) {
                el.set_attribute("style", &halo).ok();
            }
            if let Some(el) = self.doc.get_element_by_id(acts::THAW_ICON_ID) {
                let class = if state.charge > 0 { "tc-thaw-icon tc-turned" } else { "tc-thaw-icon" };
                el.set_class_name(class);
            }
            self.view.charge = Some(state.charge);
        }

        if state.stage == Stage::Greeting {
            let revealed = self.controller.revealed();
            if revealed.len() != self.view.words {
                if let Some(el) = self.doc.get_element_by_id(acts::WORDS_ID) {
                    if revealed.len() < self.view.words {
                        // the reveal restarted
                        el.set_inner_html("");
                        self.view.words = 0;
                    }
                    let html: String = revealed[self.view.words..]
                        .iter()
                        .map(|t| acts::word_markup(t))
                        .collect();
                    el.insert_adjacent_html("beforeend", &html).ok();
                    self.view.words = revealed.len();
                }
            }
        }

        if self.view.audio_on != Some(state.audio_on) {
            self.audio_button
                .set_text_content(Some(acts::audio_glyph(state.audio_on)));
            let label = if state.audio_on { "Mute music" } else { "Play music" };
            self.audio_button.set_attribute("aria-label", label).ok();
            self.view.audio_on = Some(state.audio_on);
        }
    }

    fn teardown(self) {
        let mut scheduler = self.controller.into_scheduler();
        scheduler.shutdown();
        self.canvas.teardown();
        for l in self.listeners {
            l.detach();
        }
        self.audio.stop();
        self.root.remove();
    }
}
