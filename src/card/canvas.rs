//! Full-viewport canvas running the particle field on animation frames.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, Window};

use crate::config::CardConfig;
use crate::error::CardError;
use crate::particles::{ParticleField, ParticleMode};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;
type Field = Rc<RefCell<ParticleField<SmallRng>>>;

pub(crate) struct MagicCanvas {
    window: Window,
    field: Field,
    frame: FrameCallback,
    raf_id: Rc<Cell<Option<i32>>>,
    on_resize: Closure<dyn FnMut()>,
}

impl MagicCanvas {
    pub(crate) fn mount(
        window: &Window,
        doc: &Document,
        parent: &Element,
        config: &CardConfig,
    ) -> Result<Self, CardError> {
        let canvas: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into().map_err(JsValue::from)?;
        canvas.set_id("tc-canvas");
        canvas
            .set_attribute("style", "position:fixed; inset:0; pointer-events:none; z-index:30;")
            .ok();
        parent.append_child(&canvas)?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or(CardError::NoContext)?
            .dyn_into()
            .map_err(JsValue::from)?;

        let (w, h) = viewport(window);
        canvas.set_width(w as u32);
        canvas.set_height(h as u32);
        let field: Field = Rc::new(RefCell::new(ParticleField::with_tuning(
            w,
            h,
            SmallRng::seed_from_u64(seed(window)),
            config.spawn_chance,
            config.burst_size,
        )));

        let on_resize = {
            let window = window.clone();
            let canvas = canvas.clone();
            let field = field.clone();
            Closure::wrap(Box::new(move || {
                let (w, h) = viewport(&window);
                canvas.set_width(w as u32);
                canvas.set_height(h as u32);
                field.borrow_mut().resize(w, h);
            }) as Box<dyn FnMut()>)
        };
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;

        let frame: FrameCallback = Rc::new(RefCell::new(None));
        let raf_id = Rc::new(Cell::new(None));
        {
            let f = frame.clone();
            let window = window.clone();
            let field = field.clone();
            let raf_id = raf_id.clone();
            *frame.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
                {
                    let mut field = field.borrow_mut();
                    field.step();
                    draw(&ctx, &canvas, &field);
                }
                if let Some(cb) = f.borrow().as_ref() {
                    raf_id.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
                }
            }) as Box<dyn FnMut(f64)>));
        }
        if let Some(cb) = frame.borrow().as_ref() {
            raf_id.set(Some(window.request_animation_frame(cb.as_ref().unchecked_ref())?));
        }

        Ok(Self {
            window: window.clone(),
            field,
            frame,
            raf_id,
            on_resize,
        })
    }

    pub(crate) fn set_mode(&self, mode: ParticleMode) {
        let mut field = self.field.borrow_mut();
        if field.mode() != mode {
            log::debug!("particles {:?} -> {:?}", field.mode(), mode);
            field.set_mode(mode);
        }
    }

    /// Stop the frame loop and detach the resize listener.
    pub(crate) fn teardown(self) {
        if let Some(id) = self.raf_id.take() {
            self.window.cancel_animation_frame(id).ok();
        }
        self.window
            .remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref())
            .ok();
        // The frame closure holds an Rc to its own slot; emptying the slot breaks the cycle.
        self.frame.borrow_mut().take();
    }
}

fn viewport(window: &Window) -> (f64, f64) {
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
    (w, h)
}

fn draw(ctx: &CanvasRenderingContext2d, canvas: &HtmlCanvasElement, field: &ParticleField<SmallRng>) {
    ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
    ctx.set_shadow_blur(10.0);
    for p in field.particles() {
        let color = p.color();
        ctx.set_fill_style_str(&color);
        ctx.set_shadow_color(&color);
        ctx.begin_path();
        ctx.arc(p.x, p.y, p.size, 0.0, std::f64::consts::TAU).ok();
        ctx.fill();
    }
    ctx.set_shadow_blur(0.0);
}

#[cfg(feature = "rng")]
fn seed(window: &Window) -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(e) => {
            log::warn!("getrandom failed ({e}); seeding from clock");
            clock_seed(window)
        }
    }
}

#[cfg(not(feature = "rng"))]
fn seed(window: &Window) -> u64 {
    clock_seed(window)
}

fn clock_seed(window: &Window) -> u64 {
    let now = window.performance().map(|p| p.now()).unwrap_or(0.0);
    now.to_bits() ^ 0x9E37_79B9_7F4A_7C15
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;
    use web_sys::Event;

    wasm_bindgen_test_configure!(run_in_browser);

    fn fire_resize(window: &Window) {
        window.dispatch_event(&Event::new("resize").unwrap()).unwrap();
    }

    #[wasm_bindgen_test]
    fn resize_tracks_viewport_until_teardown() {
        let window = web_sys::window().unwrap();
        let doc = window.document().unwrap();
        let host = doc.create_element("div").unwrap();
        doc.body().unwrap().append_child(&host).unwrap();

        let magic = MagicCanvas::mount(&window, &doc, &host, &CardConfig::default()).unwrap();
        let frame = magic.frame.clone();
        let raf_id = magic.raf_id.clone();
        let field = magic.field.clone();
        assert!(raf_id.get().is_some());
        assert!(frame.borrow().is_some());

        let el: HtmlCanvasElement = doc.get_element_by_id("tc-canvas").unwrap().dyn_into().unwrap();
        el.set_width(1);
        fire_resize(&window);
        let (w, h) = viewport(&window);
        assert_eq!(el.width(), w as u32);
        assert_eq!(field.borrow().size(), (w, h));

        magic.teardown();
        assert!(raf_id.get().is_none());
        assert!(frame.borrow().is_none());

        // listener is gone
        el.set_width(1);
        fire_resize(&window);
        assert_eq!(el.width(), 1);
        host.remove();
    }
}
