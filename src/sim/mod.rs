//! Particle simulation module
//!
//! Pure motion state; no drawing or browser dependencies:
//! - Frame-locked Euler step (one update per animation frame)
//! - Seeded RNG only
//! - Stable iteration order (collection index)

pub mod field;
pub mod particle;

pub use field::{Field, FieldParams};
pub use particle::{Attraction, Particle, Viewport};
