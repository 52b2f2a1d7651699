//! Background track. Playback is best effort: a rejected `play()` (autoplay
//! policy, missing file) is logged and otherwise ignored.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlAudioElement};

use crate::error::CardError;

pub(crate) struct BackgroundAudio {
    el: HtmlAudioElement,
}

impl BackgroundAudio {
    pub(crate) fn mount(doc: &Document, parent: &web_sys::Element, src: &str) -> Result<Self, CardError> {
        let el: HtmlAudioElement = doc.create_element("audio")?.dyn_into().map_err(JsValue::from)?;
        el.set_src(src);
        el.set_loop(true);
        el.set_preload("auto");
        el.set_attribute("playsinline", "").ok();
        parent.append_child(&el)?;
        Ok(Self { el })
    }

    pub(crate) fn play(&self, volume: f64, from_start: bool) {
        self.el.set_muted(false);
        self.el.set_volume(volume.clamp(0.0, 1.0));
        if from_start {
            self.el.set_current_time(0.0);
        }
        match self.el.play() {
            Ok(promise) => {
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        log::warn!("audio playback rejected: {e:?}");
                    }
                });
            }
            Err(e) => log::warn!("audio playback failed: {e:?}"),
        }
    }

    pub(crate) fn mute(&self) {
        self.el.set_muted(true);
    }

    pub(crate) fn stop(&self) {
        self.el.pause().ok();
    }
}
