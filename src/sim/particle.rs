//! Particle record and per-frame motion rule
//!
//! Motion is frame-locked: one call to `Particle::update` is one frame of
//! Euler integration with a unit timestep.

use glam::Vec2;

use crate::consts::{ATTRACTION_STRENGTH, CURSOR_DISTANCE};
use crate::renderer::Rgb;

/// Drawable area in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether a point lies in the half-open box [0, width) x [0, height)
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x < self.width && p.y >= 0.0 && p.y < self.height
    }
}

/// Cursor pull applied to nearby particles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attraction {
    /// Particles at or beyond this distance are not affected
    pub radius: f32,
    /// Velocity added at zero distance (falls off linearly to 0 at `radius`)
    pub strength: f32,
}

impl Default for Attraction {
    fn default() -> Self {
        Self {
            radius: CURSOR_DISTANCE,
            strength: ATTRACTION_STRENGTH,
        }
    }
}

impl Attraction {
    /// Velocity change for a particle at `pos` with the cursor at `cursor`
    pub fn pull(&self, pos: Vec2, cursor: Vec2) -> Vec2 {
        let to_cursor = cursor - pos;
        let d = to_cursor.length();
        // d == 0 has no direction
        if d <= 0.0 || d >= self.radius {
            return Vec2::ZERO;
        }
        let force = (self.radius - d) / self.radius;
        to_cursor / d * force * self.strength
    }
}

/// A single point in the background field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Side length of the drawn square
    pub size: f32,
    pub color: Rgb,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, size: f32) -> Self {
        Self {
            pos,
            vel,
            size,
            color: Rgb::ACCENT,
        }
    }

    /// Advance one frame.
    ///
    /// Reflection tests the already-moved position and never clamps, so a
    /// particle can sit just outside the viewport for a frame. Velocity is
    /// not damped or capped.
    pub fn update(&mut self, viewport: Viewport, cursor: Option<Vec2>, attraction: Attraction) {
        self.pos += self.vel;

        if self.pos.x < 0.0 || self.pos.x > viewport.width {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y < 0.0 || self.pos.y > viewport.height {
            self.vel.y = -self.vel.y;
        }

        if let Some(cursor) = cursor {
            self.vel += attraction.pull(self.pos, cursor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };

    fn still(x: f32, y: f32) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::ZERO, 2.0)
    }

    #[test]
    fn test_update_moves_by_velocity() {
        let mut p = Particle::new(Vec2::new(100.0, 100.0), Vec2::new(0.2, -0.1), 2.0);
        p.update(VIEW, None, Attraction::default());
        assert!((p.pos - Vec2::new(100.2, 99.9)).length() < 1e-4);
        assert_eq!(p.vel, Vec2::new(0.2, -0.1));
    }

    #[test]
    fn test_reflect_at_right_edge() {
        let mut p = Particle::new(Vec2::new(VIEW.width, 300.0), Vec2::new(0.2, 0.0), 2.0);
        p.update(VIEW, None, Attraction::default());
        assert!(p.vel.x < 0.0);
        // Not clamped back inside
        assert!(p.pos.x > VIEW.width);
    }

    #[test]
    fn test_reflect_at_left_edge() {
        let mut p = Particle::new(Vec2::new(0.0, 300.0), Vec2::new(-0.2, 0.0), 2.0);
        p.update(VIEW, None, Attraction::default());
        assert!(p.vel.x > 0.0);
        assert!(p.pos.x < 0.0);
    }

    #[test]
    fn test_reflect_axes_independent() {
        let mut p = Particle::new(Vec2::new(400.0, VIEW.height), Vec2::new(0.1, 0.2), 2.0);
        p.update(VIEW, None, Attraction::default());
        assert!(p.vel.x > 0.0);
        assert!(p.vel.y < 0.0);
    }

    #[test]
    fn test_outside_particle_returns_next_frame() {
        let mut p = Particle::new(Vec2::new(VIEW.width, 300.0), Vec2::new(0.5, 0.0), 2.0);
        p.update(VIEW, None, Attraction::default());
        p.update(VIEW, None, Attraction::default());
        assert_eq!(p.pos.x, VIEW.width);
        assert!(p.vel.x < 0.0);
    }

    #[test]
    fn test_cursor_attraction_points_toward_cursor() {
        let mut p = still(300.0, 300.0);
        let cursor = Vec2::new(360.0, 380.0);
        p.update(VIEW, Some(cursor), Attraction::default());

        let to_cursor = cursor - Vec2::new(300.0, 300.0);
        assert!(p.vel.dot(to_cursor) > 0.0);
        // d = 100: force = 0.5, scaled by 0.5
        assert!((p.vel.length() - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_no_cursor_leaves_velocity() {
        let mut p = Particle::new(Vec2::new(300.0, 300.0), Vec2::new(0.1, 0.1), 2.0);
        p.update(VIEW, None, Attraction::default());
        assert_eq!(p.vel, Vec2::new(0.1, 0.1));
    }

    #[test]
    fn test_cursor_out_of_range() {
        let mut p = still(100.0, 100.0);
        p.update(VIEW, Some(Vec2::new(300.0, 100.0)), Attraction::default());
        assert_eq!(p.vel, Vec2::ZERO);

        p.update(VIEW, Some(Vec2::new(301.0, 100.0)), Attraction::default());
        assert_eq!(p.vel, Vec2::ZERO);
    }

    #[test]
    fn test_cursor_on_particle_is_ignored() {
        let mut p = still(100.0, 100.0);
        p.update(VIEW, Some(Vec2::new(100.0, 100.0)), Attraction::default());
        assert_eq!(p.vel, Vec2::ZERO);
        assert!(p.pos.is_finite());
    }

    #[test]
    fn test_attraction_is_not_capped() {
        let mut p = still(300.0, 300.0);
        let cursor = Vec2::new(310.0, 300.0);
        for _ in 0..5 {
            p.pos = Vec2::new(300.0, 300.0);
            p.update(VIEW, Some(cursor), Attraction::default());
        }
        // Five pulls of (190/200)*0.5 accumulate
        assert!(p.vel.x > 2.0);
    }

    #[test]
    fn test_viewport_contains() {
        assert!(VIEW.contains(Vec2::new(0.0, 0.0)));
        assert!(!VIEW.contains(Vec2::new(800.0, 10.0)));
        assert!(!VIEW.contains(Vec2::new(10.0, -0.5)));
    }
}
