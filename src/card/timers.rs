//! `Scheduler` backed by the window's interval/timeout timers.

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::scheduler::{Scheduler, Timer, TimerHandle};

struct Armed {
    js_id: i32,
    repeating: bool,
    callback: Closure<dyn FnMut()>,
}

pub(crate) struct BrowserScheduler {
    window: Window,
    next_handle: u32,
    armed: HashMap<TimerHandle, Armed>,
    // Closures whose timer is finished or cancelled but which may still be on
    // the call stack. Dropped at the start of the next timer callback.
    parked: Vec<Closure<dyn FnMut()>>,
}

impl BrowserScheduler {
    pub(crate) fn new(window: Window) -> Self {
        Self {
            window,
            next_handle: 0,
            armed: HashMap::new(),
            parked: Vec::new(),
        }
    }

    fn arm(&mut self, ms: u32, repeating: bool, timer: Timer) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        let callback = Closure::wrap(Box::new(move || {
            super::on_timer(handle, timer);
        }) as Box<dyn FnMut()>);
        let ms = ms.min(i32::MAX as u32) as i32;
        let id = if repeating {
            self.window
                .set_interval_with_callback_and_timeout_and_arguments_0(callback.as_ref().unchecked_ref(), ms)
        } else {
            self.window
                .set_timeout_with_callback_and_timeout_and_arguments_0(callback.as_ref().unchecked_ref(), ms)
        };
        match id {
            Ok(js_id) => {
                self.armed.insert(
                    handle,
                    Armed {
                        js_id,
                        repeating,
                        callback,
                    },
                );
            }
            Err(e) => log::error!("failed to arm {timer:?}: {e:?}"),
        }
        handle
    }

    fn disarm(&mut self, armed: Armed) {
        if armed.repeating {
            self.window.clear_interval_with_handle(armed.js_id);
        } else {
            self.window.clear_timeout_with_handle(armed.js_id);
        }
        self.parked.push(armed.callback);
    }

    /// Clear every timer and drop all closures. Only call from outside a timer
    /// callback.
    pub(crate) fn shutdown(&mut self) {
        let handles: Vec<TimerHandle> = self.armed.keys().copied().collect();
        for h in handles {
            if let Some(armed) = self.armed.remove(&h) {
                self.disarm(armed);
            }
        }
        self.parked.clear();
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule_repeating(&mut self, every_ms: u32, timer: Timer) -> TimerHandle {
        self.arm(every_ms.max(1), true, timer)
    }

    fn schedule_once(&mut self, delay_ms: u32, timer: Timer) -> TimerHandle {
        self.arm(delay_ms, false, timer)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(armed) = self.armed.remove(&handle) {
            self.disarm(armed);
        }
    }

    fn fired(&mut self, handle: TimerHandle) {
        // Parked closures belong to earlier callbacks, so none is running now.
        self.parked.clear();
        let one_shot = self.armed.get(&handle).is_some_and(|a| !a.repeating);
        if one_shot {
            if let Some(armed) = self.armed.remove(&handle) {
                self.parked.push(armed.callback);
            }
        }
    }
}
