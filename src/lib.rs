//! Circuit Field - animated portfolio backdrop and page effects
//!
//! Core modules:
//! - `sim`: Particle motion and the field state the animation loop owns
//! - `renderer`: Grid, particle and circuit-trace drawing against a `Surface`
//! - `driver`: Per-frame update/draw loop on top of a frame clock
//! - `platform`: Frame clock and timer abstractions (browser + manual)
//! - `ui`: Scroll reveal, typewriter and modal controllers
//! - `settings`: Tunables with defaults, optionally overridden from the page

pub mod driver;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use driver::{AnimationLoop, Driver, DriverState};
pub use settings::Settings;

/// Default configuration constants
pub mod consts {
    /// Number of particles in the field
    pub const PARTICLE_COUNT: usize = 60;
    /// Particles closer than this are joined by a trace
    pub const CONNECTION_DISTANCE: f32 = 150.0;
    /// Radius inside which the cursor pulls particles
    pub const CURSOR_DISTANCE: f32 = 200.0;
    /// Velocity added per frame at zero distance from the cursor
    pub const ATTRACTION_STRENGTH: f32 = 0.5;
    /// Initial velocity is uniform in [-MAX_INITIAL_SPEED, MAX_INITIAL_SPEED) per axis
    pub const MAX_INITIAL_SPEED: f32 = 0.25;
    /// Particle side length is MIN_PARTICLE_SIZE + U[0, PARTICLE_SIZE_RANGE)
    pub const MIN_PARTICLE_SIZE: f32 = 1.0;
    pub const PARTICLE_SIZE_RANGE: f32 = 2.0;
    /// Upper bound accepted from page overrides
    pub const MAX_PARTICLE_COUNT: usize = 2000;

    /// Background grid
    pub const GRID_SPACING: f32 = 50.0;
    /// Smallest spacing accepted from page overrides
    pub const MIN_GRID_SPACING: f32 = 1.0;
    pub const GRID_ALPHA: f32 = 0.03;
    /// Trace alpha at zero distance
    pub const CONNECTION_ALPHA: f32 = 0.5;
    pub const LINE_WIDTH: f32 = 1.0;

    /// Typewriter
    pub const TYPEWRITER_TEXT: &str = "Hi! I build robots that learn.";
    pub const TYPEWRITER_DELAY_MS: i32 = 100;

    /// Fraction of a section that must be on screen before it fades in
    pub const REVEAL_THRESHOLD: f64 = 0.1;

    /// Host document identifiers
    pub const CANVAS_ID: &str = "bg-canvas";
    pub const TYPEWRITER_ID: &str = "typewriter";
    pub const SETTINGS_ID: &str = "circuit-field-settings";
    pub const SECTION_SELECTOR: &str = "section";
    pub const HIDDEN_CLASS: &str = "fade-in-section";
    pub const VISIBLE_CLASS: &str = "visible";
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: glam::Vec2, b: glam::Vec2) -> f32 {
    (a - b).length()
}
