// Browser tests: `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

#[wasm_bindgen_test]
fn mounts_and_unmounts_cleanly() {
    thaw_card::start_card().unwrap();
    assert_eq!(thaw_card::card_stage(), 0);
    let doc = document();
    assert!(doc.get_element_by_id("tc-canvas").is_some());
    assert!(doc.query_selector("[data-action=thaw]").unwrap().is_some());

    let win = web_sys::window().unwrap();
    let canvas: web_sys::HtmlCanvasElement =
        doc.get_element_by_id("tc-canvas").unwrap().dyn_into().unwrap();
    canvas.set_width(1);
    win.dispatch_event(&web_sys::Event::new("resize").unwrap()).unwrap();
    let inner = win.inner_width().unwrap().as_f64().unwrap();
    assert_eq!(canvas.width(), inner as u32);

    thaw_card::stop_card();
    assert_eq!(thaw_card::card_stage(), -1);
    assert!(doc.get_element_by_id("tc-root").is_none());
}

#[wasm_bindgen_test]
fn audio_button_shows_intent_even_if_playback_is_blocked() {
    thaw_card::start_card().unwrap();
    let button: web_sys::HtmlElement = document()
        .get_element_by_id("tc-audio")
        .unwrap()
        .dyn_into()
        .unwrap();
    let muted = button.text_content().unwrap();
    button.click();
    assert_ne!(button.text_content().unwrap(), muted);
    thaw_card::stop_card();
}

#[wasm_bindgen_test]
fn mounting_twice_replaces_the_card() {
    thaw_card::start_card().unwrap();
    thaw_card::start_card().unwrap();
    thaw_card::stop_card();
    // a leftover root from the first mount would survive the single stop
    assert!(document().get_element_by_id("tc-root").is_none());
}
