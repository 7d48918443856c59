//! Hand-cranked clock and timer
//!
//! Callbacks queue up until the owner advances them explicitly, so tests and
//! the native harness control exactly how many frames or ticks run.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use super::{FrameCallback, FrameClock, Timer, TimerCallback};

/// Frame clock that runs queued callbacks on demand
pub struct ManualFrameClock {
    pending: RefCell<VecDeque<FrameCallback>>,
    now: Cell<f64>,
    frame_ms: f64,
}

impl Default for ManualFrameClock {
    fn default() -> Self {
        // 60 Hz
        Self::new(1000.0 / 60.0)
    }
}

impl ManualFrameClock {
    pub fn new(frame_ms: f64) -> Self {
        Self {
            pending: RefCell::new(VecDeque::new()),
            now: Cell::new(0.0),
            frame_ms,
        }
    }

    /// Callbacks waiting for the next frame
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Timestamp handed to the most recent callback
    pub fn now(&self) -> f64 {
        self.now.get()
    }

    /// Run the oldest queued callback. Returns false if nothing was queued.
    pub fn advance(&self) -> bool {
        // Release the queue before running: the callback may request again
        let next = self.pending.borrow_mut().pop_front();
        match next {
            Some(callback) => {
                self.now.set(self.now.get() + self.frame_ms);
                callback(self.now.get());
                true
            }
            None => false,
        }
    }

    /// Advance up to `frames` times; returns how many callbacks ran
    pub fn run(&self, frames: usize) -> usize {
        (0..frames).take_while(|_| self.advance()).count()
    }
}

impl FrameClock for ManualFrameClock {
    fn request_frame(&self, callback: FrameCallback) {
        self.pending.borrow_mut().push_back(callback);
    }
}

/// Timer whose timeouts fire only when asked to
#[derive(Default)]
pub struct ManualTimer {
    pending: RefCell<VecDeque<(i32, TimerCallback)>>,
    fired: Cell<usize>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Total callbacks fired so far
    pub fn fired(&self) -> usize {
        self.fired.get()
    }

    /// Fire the oldest timeout regardless of its delay; returns that delay
    pub fn fire_next(&self) -> Option<i32> {
        let next = self.pending.borrow_mut().pop_front();
        next.map(|(delay_ms, callback)| {
            self.fired.set(self.fired.get() + 1);
            callback();
            delay_ms
        })
    }

    /// Fire timeouts until none are queued or `limit` have run
    pub fn run(&self, limit: usize) -> usize {
        (0..limit).take_while(|_| self.fire_next().is_some()).count()
    }
}

impl Timer for ManualTimer {
    fn set_timeout(&self, delay_ms: i32, callback: TimerCallback) {
        self.pending.borrow_mut().push_back((delay_ms, callback));
    }
}
