//! Platform abstraction layer
//!
//! The host owns scheduling. Everything that repeats goes through one of
//! these two traits:
//! - `FrameClock`: per-frame callbacks (`requestAnimationFrame` on the web)
//! - `Timer`: delayed callbacks (`setTimeout` on the web)
//!
//! `manual` provides deterministic implementations for tests and the native
//! harness; `web` binds the browser primitives.

pub mod manual;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use manual::{ManualFrameClock, ManualTimer};
#[cfg(target_arch = "wasm32")]
pub use web::{BrowserFrameClock, BrowserTimer};

/// Called once with the frame timestamp in milliseconds
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Called once when a timeout elapses
pub type TimerCallback = Box<dyn FnOnce()>;

/// Source of animation frames
pub trait FrameClock {
    /// Run `callback` once, before the next repaint
    fn request_frame(&self, callback: FrameCallback);
}

/// Source of delayed callbacks
pub trait Timer {
    /// Run `callback` once after `delay_ms` milliseconds
    fn set_timeout(&self, delay_ms: i32, callback: TimerCallback);
}
