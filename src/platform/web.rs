//! Browser scheduling primitives

use wasm_bindgen::prelude::*;
use web_sys::Window;

use super::{FrameCallback, FrameClock, Timer, TimerCallback};

/// `window.requestAnimationFrame`
pub struct BrowserFrameClock {
    window: Window,
}

impl BrowserFrameClock {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl FrameClock for BrowserFrameClock {
    fn request_frame(&self, callback: FrameCallback) {
        let closure = Closure::once(move |time: f64| callback(time));
        match self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
        {
            Ok(_) => closure.forget(),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }
}

/// `window.setTimeout`
pub struct BrowserTimer {
    window: Window,
}

impl BrowserTimer {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Timer for BrowserTimer {
    fn set_timeout(&self, delay_ms: i32, callback: TimerCallback) {
        let closure = Closure::once(move || callback());
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay_ms,
            ) {
            Ok(_) => closure.forget(),
            Err(e) => log::error!("setTimeout failed: {:?}", e),
        }
    }
}
