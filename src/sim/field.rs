//! Field state owned by the animation driver
//!
//! Holds everything the motion rule reads or writes between frames:
//! viewport, last cursor position, the particle collection and the RNG
//! used to (re)spawn it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::particle::{Attraction, Particle, Viewport};
use crate::consts::*;
use crate::renderer::Rgb;

/// Spawn and motion parameters for a field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldParams {
    pub particle_count: usize,
    /// Each velocity component starts uniform in [-max, max)
    pub max_initial_speed: f32,
    pub min_size: f32,
    pub size_range: f32,
    pub color: Rgb,
    pub attraction: Attraction,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            max_initial_speed: MAX_INITIAL_SPEED,
            min_size: MIN_PARTICLE_SIZE,
            size_range: PARTICLE_SIZE_RANGE,
            color: Rgb::ACCENT,
            attraction: Attraction::default(),
        }
    }
}

/// Particle collection plus the shared state its update rule reads
#[derive(Debug, Clone)]
pub struct Field {
    params: FieldParams,
    viewport: Viewport,
    cursor: Option<Vec2>,
    particles: Vec<Particle>,
    rng: Pcg32,
}

impl Field {
    /// Create an empty field. Call `init` to spawn particles.
    pub fn new(params: FieldParams, viewport: Viewport, seed: u64) -> Self {
        Self {
            params,
            viewport,
            cursor: None,
            particles: Vec::with_capacity(params.particle_count),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Replace the collection with `particle_count` freshly spawned particles
    pub fn init(&mut self) {
        self.particles.clear();
        for _ in 0..self.params.particle_count {
            let p = self.spawn();
            self.particles.push(p);
        }
    }

    fn spawn(&mut self) -> Particle {
        let pos = Vec2::new(
            self.rng.random::<f32>() * self.viewport.width,
            self.rng.random::<f32>() * self.viewport.height,
        );
        let speed = self.params.max_initial_speed;
        let vel = Vec2::new(
            (self.rng.random::<f32>() - 0.5) * 2.0 * speed,
            (self.rng.random::<f32>() - 0.5) * 2.0 * speed,
        );
        let size = self.rng.random::<f32>() * self.params.size_range + self.params.min_size;
        Particle {
            pos,
            vel,
            size,
            color: self.params.color,
        }
    }

    /// Track a new viewport size. Existing particles are left where they are.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Record the latest pointer position
    pub fn set_cursor(&mut self, pos: Vec2) {
        self.cursor = Some(pos);
    }

    /// Update every particle in order, handing each to `visit` right after
    /// its own update (before the next particle moves).
    pub fn update_each<F: FnMut(&Particle)>(&mut self, mut visit: F) {
        let viewport = self.viewport;
        let cursor = self.cursor;
        let attraction = self.params.attraction;
        for particle in &mut self.particles {
            particle.update(viewport, cursor, attraction);
            visit(particle);
        }
    }

    /// Update every particle without visiting
    pub fn update_all(&mut self) {
        self.update_each(|_| {});
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn cursor(&self) -> Option<Vec2> {
        self.cursor
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }
}
