//! Animation driver
//!
//! `Driver::frame` is one complete frame of work and knows nothing about
//! scheduling. `AnimationLoop` pairs a driver with its surface and keeps
//! requesting frames from a `FrameClock`, one at a time, for as long as the
//! page lives.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;

use crate::platform::FrameClock;
use crate::renderer::{GridStyle, Surface, TraceStyle, draw_connections, draw_grid, draw_particle};
use crate::settings::Settings;
use crate::sim::{Field, Viewport};

/// Frames between FPS log lines
const STATS_LOG_INTERVAL: u64 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// No particles spawned yet
    Uninitialized,
    /// Producing frames
    Running,
}

/// Rolling frame-rate estimate over the last 60 frames
#[derive(Debug, Clone)]
pub struct FrameStats {
    frame_times: [f64; 60],
    frame_index: usize,
    frames: u64,
    fps: u32,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            frames: 0,
            fps: 0,
        }
    }
}

impl FrameStats {
    pub fn record(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();
        self.frames += 1;

        // Oldest sample is the one we will overwrite next; the ring spans
        // one interval fewer than it has samples
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time - oldest_time;
            if elapsed > 0.0 {
                let intervals = (self.frame_times.len() - 1) as f64;
                self.fps = (intervals * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// Owns the particle field and draws it each frame
#[derive(Debug, Clone)]
pub struct Driver {
    field: Field,
    grid: GridStyle,
    traces: TraceStyle,
    state: DriverState,
    stats: FrameStats,
}

impl Driver {
    pub fn new(settings: &Settings, viewport: Viewport, seed: u64) -> Self {
        Self {
            field: Field::new(settings.field_params(), viewport, seed),
            grid: settings.grid_style(),
            traces: settings.trace_style(),
            state: DriverState::Uninitialized,
            stats: FrameStats::default(),
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// (Re)spawn the whole particle collection
    pub fn init(&mut self) {
        self.field.init();
        self.state = DriverState::Running;
        log::debug!("Spawned {} particles", self.field.particles().len());
    }

    /// Clear, grid, update+draw each particle, then connections
    pub fn frame<S: Surface>(&mut self, surface: &mut S, time: f64) {
        if self.state == DriverState::Uninitialized {
            self.init();
        }

        let viewport = self.field.viewport();
        surface.clear(viewport.width, viewport.height);
        draw_grid(surface, viewport, &self.grid);
        self.field.update_each(|p| draw_particle(surface, p));
        draw_connections(surface, self.field.particles(), &self.traces);

        self.stats.record(time);
        if self.stats.frames() % STATS_LOG_INTERVAL == 0 {
            log::debug!("{} frames, {} fps", self.stats.frames(), self.stats.fps());
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.field.resize(viewport);
    }

    pub fn set_cursor(&mut self, pos: Vec2) {
        self.field.set_cursor(pos);
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }
}

/// A driver bound to the surface it draws on
pub struct AnimationLoop<S> {
    pub driver: Driver,
    pub surface: S,
}

impl<S: Surface + 'static> AnimationLoop<S> {
    pub fn new(driver: Driver, surface: S) -> Self {
        Self { driver, surface }
    }

    /// Run a single frame
    pub fn tick(&mut self, time: f64) {
        self.driver.frame(&mut self.surface, time);
    }

    /// Begin the self-rescheduling frame loop.
    ///
    /// Each frame requests its successor only after it has finished, so at
    /// most one frame is ever pending.
    pub fn start<C: FrameClock + 'static>(anim: Rc<RefCell<Self>>, clock: Rc<C>) {
        request_next(anim, clock);
    }
}

fn request_next<S, C>(anim: Rc<RefCell<AnimationLoop<S>>>, clock: Rc<C>)
where
    S: Surface + 'static,
    C: FrameClock + 'static,
{
    let next_clock = clock.clone();
    clock.request_frame(Box::new(move |time: f64| {
        anim.borrow_mut().tick(time);
        request_next(anim, next_clock);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PARTICLE_COUNT;
    use crate::platform::ManualFrameClock;
    use crate::renderer::{CommandBuffer, DrawCommand, connections};

    fn driver() -> Driver {
        Driver::new(&Settings::default(), Viewport::new(640.0, 480.0), 42)
    }

    #[test]
    fn test_starts_uninitialized() {
        let d = driver();
        assert_eq!(d.state(), DriverState::Uninitialized);
        assert!(d.field().particles().is_empty());
    }

    #[test]
    fn test_init_is_repeatable() {
        let mut d = driver();
        for _ in 0..3 {
            d.init();
            assert_eq!(d.state(), DriverState::Running);
            assert_eq!(d.field().particles().len(), PARTICLE_COUNT);
        }
    }

    #[test]
    fn test_first_frame_initializes() {
        let mut d = driver();
        let mut buf = CommandBuffer::new();
        d.frame(&mut buf, 16.0);
        assert_eq!(d.state(), DriverState::Running);
        assert_eq!(buf.fills().count(), PARTICLE_COUNT);
    }

    #[test]
    fn test_frame_draw_order() {
        let mut d = driver();
        d.init();
        let mut buf = CommandBuffer::new();
        d.frame(&mut buf, 16.0);

        assert_eq!(buf.commands[0], DrawCommand::Clear { width: 640.0, height: 480.0 });

        // 640/50 -> 13 vertical lines, 480/50 -> 10 horizontal
        let grid_lines = 13 + 10;
        let grid = &buf.commands[1..1 + grid_lines];
        assert!(grid.iter().all(|c| c.segment_count() == 1));

        let fills = &buf.commands[1 + grid_lines..1 + grid_lines + PARTICLE_COUNT];
        assert!(fills.iter().all(|c| matches!(c, DrawCommand::Fill { .. })));

        let traces = &buf.commands[1 + grid_lines + PARTICLE_COUNT..];
        assert!(traces.iter().all(|c| c.segment_count() == 2));
        let expected = connections(d.field().particles(), 150.0).count();
        assert_eq!(traces.len(), expected);
    }

    #[test]
    fn test_particles_drawn_after_update() {
        let mut d = driver();
        d.init();
        let moved: Vec<_> = d
            .field()
            .particles()
            .iter()
            .map(|p| p.pos + p.vel)
            .collect();
        let mut buf = CommandBuffer::new();
        d.frame(&mut buf, 16.0);
        let drawn: Vec<_> = buf
            .fills()
            .map(|c| match c {
                DrawCommand::Fill { origin, .. } => *origin,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(drawn, moved);
    }

    #[test]
    fn test_loop_is_single_flight() {
        let anim = Rc::new(RefCell::new(AnimationLoop::new(driver(), CommandBuffer::new())));
        let clock = Rc::new(ManualFrameClock::default());
        AnimationLoop::start(anim.clone(), clock.clone());

        assert_eq!(clock.pending(), 1);
        assert_eq!(anim.borrow().driver.stats().frames(), 0);

        for n in 1..=5u64 {
            assert!(clock.advance());
            assert_eq!(clock.pending(), 1);
            assert_eq!(anim.borrow().driver.stats().frames(), n);
        }
    }

    #[test]
    fn test_frame_stats_fps() {
        let mut stats = FrameStats::default();
        for i in 1..=120 {
            stats.record(i as f64 * 1000.0 / 60.0);
        }
        assert_eq!(stats.frames(), 120);
        assert_eq!(stats.fps(), 60);
    }

    #[test]
    fn test_frame_stats_fps_30hz() {
        let mut stats = FrameStats::default();
        for i in 1..=90 {
            stats.record(i as f64 * 1000.0 / 30.0);
        }
        assert_eq!(stats.fps(), 30);
    }
}
