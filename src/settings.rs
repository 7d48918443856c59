//! Page effect settings
//!
//! Defaults reproduce the portfolio page as shipped. A page may override any
//! subset with an inline JSON block:
//!
//! ```html
//! <script type="application/json" id="circuit-field-settings">
//!   { "particle_count": 40, "typewriter_text": "Hello." }
//! </script>
//! ```

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::renderer::{GridStyle, Rgb, TraceStyle};
use crate::sim::{Attraction, FieldParams};
use crate::ui::ModalConfig;

/// Effect settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Particles ===
    /// Size of the particle collection
    pub particle_count: usize,
    /// Max distance for a trace between two particles
    pub connection_distance: f32,
    /// Cursor pull radius
    pub cursor_distance: f32,
    /// Cursor pull at zero distance
    pub attraction_strength: f32,
    /// Initial per-axis speed half-range
    pub max_initial_speed: f32,
    pub min_particle_size: f32,
    pub particle_size_range: f32,

    // === Look ===
    pub accent: Rgb,
    pub grid_spacing: f32,
    pub grid_alpha: f32,
    pub connection_alpha: f32,

    // === Typewriter ===
    pub typewriter_text: String,
    pub typewriter_delay_ms: i32,

    // === Reveal ===
    /// Visible fraction that triggers a fade-in (0.0 - 1.0)
    pub reveal_threshold: f64,

    // === Modals ===
    pub modals: Vec<ModalConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            connection_distance: CONNECTION_DISTANCE,
            cursor_distance: CURSOR_DISTANCE,
            attraction_strength: ATTRACTION_STRENGTH,
            max_initial_speed: MAX_INITIAL_SPEED,
            min_particle_size: MIN_PARTICLE_SIZE,
            particle_size_range: PARTICLE_SIZE_RANGE,

            accent: Rgb::ACCENT,
            grid_spacing: GRID_SPACING,
            grid_alpha: GRID_ALPHA,
            connection_alpha: CONNECTION_ALPHA,

            typewriter_text: TYPEWRITER_TEXT.to_string(),
            typewriter_delay_ms: TYPEWRITER_DELAY_MS,

            reveal_threshold: REVEAL_THRESHOLD,

            modals: ModalConfig::defaults(),
        }
    }
}

impl Settings {
    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    /// Replace values that would stall or break the effects with defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Settings::default();
        if self.particle_count > MAX_PARTICLE_COUNT {
            log::warn!(
                "particle_count {} capped at {}",
                self.particle_count,
                MAX_PARTICLE_COUNT
            );
            self.particle_count = MAX_PARTICLE_COUNT;
        }
        if !(self.grid_spacing >= MIN_GRID_SPACING) {
            log::warn!("grid_spacing {} ignored", self.grid_spacing);
            self.grid_spacing = defaults.grid_spacing;
        }
        if !(self.cursor_distance > 0.0) {
            log::warn!("cursor_distance {} ignored", self.cursor_distance);
            self.cursor_distance = defaults.cursor_distance;
        }
        if !(self.connection_distance > 0.0) {
            log::warn!("connection_distance {} ignored", self.connection_distance);
            self.connection_distance = defaults.connection_distance;
        }
        if self.typewriter_delay_ms < 0 {
            self.typewriter_delay_ms = defaults.typewriter_delay_ms;
        }
        self.reveal_threshold = self.reveal_threshold.clamp(0.0, 1.0);
        self.grid_alpha = self.grid_alpha.clamp(0.0, 1.0);
        self.connection_alpha = self.connection_alpha.clamp(0.0, 1.0);
        self
    }

    pub fn field_params(&self) -> FieldParams {
        FieldParams {
            particle_count: self.particle_count,
            max_initial_speed: self.max_initial_speed,
            min_size: self.min_particle_size,
            size_range: self.particle_size_range,
            color: self.accent,
            attraction: Attraction {
                radius: self.cursor_distance,
                strength: self.attraction_strength,
            },
        }
    }

    pub fn grid_style(&self) -> GridStyle {
        GridStyle {
            spacing: self.grid_spacing,
            paint: self.accent.with_alpha(self.grid_alpha),
            line_width: LINE_WIDTH,
        }
    }

    pub fn trace_style(&self) -> TraceStyle {
        TraceStyle {
            max_distance: self.connection_distance,
            color: self.accent,
            max_alpha: self.connection_alpha,
            line_width: LINE_WIDTH,
        }
    }

    /// Load overrides from the page's settings block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(document: &web_sys::Document) -> Self {
        let json = document
            .get_element_by_id(SETTINGS_ID)
            .and_then(|el| el.text_content());

        if let Some(json) = json {
            match Settings::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from #{}", SETTINGS_ID);
                    return settings;
                }
                Err(e) => log::warn!("Ignoring #{}: {}", SETTINGS_ID, e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }
}
