//! Colors and paints as the canvas understands them

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque RGB color, serialized as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Accent cyan used for particles, traces and the grid
    pub const ACCENT: Rgb = Rgb::from_u32(0x64ffda);

    /// Create from 0xRRGGBB
    pub const fn from_u32(num: u32) -> Rgb {
        Rgb {
            r: (num >> 16) as u8,
            g: (num >> 8) as u8,
            b: num as u8,
        }
    }

    /// Parse `#rrggbb` (leading `#` optional)
    pub fn parse_hex(s: &str) -> Option<Rgb> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }
        u32::from_str_radix(hex, 16).ok().map(Rgb::from_u32)
    }

    pub fn with_alpha(self, alpha: f32) -> Paint {
        Paint { color: self, alpha }
    }

    pub fn opaque(self) -> Paint {
        self.with_alpha(1.0)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Rgb::parse_hex(&s).ok_or_else(|| format!("invalid color '{}', expected #rrggbb", s))
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> String {
        c.to_string()
    }
}

/// A color plus opacity for a single fill or stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Rgb,
    /// 0.0 - 1.0
    pub alpha: f32,
}

impl Paint {
    /// CSS color string for `fillStyle`/`strokeStyle`
    pub fn css(&self) -> String {
        if self.alpha >= 1.0 {
            self.color.to_string()
        } else {
            format!(
                "rgba({}, {}, {}, {})",
                self.color.r, self.color.g, self.color.b, self.alpha
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accent_components() {
        assert_eq!(Rgb::ACCENT, Rgb { r: 100, g: 255, b: 218 });
        assert_eq!(Rgb::ACCENT.to_string(), "#64ffda");
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(Rgb::parse_hex("#64ffda"), Some(Rgb::ACCENT));
        assert_eq!(Rgb::parse_hex("64FFDA"), Some(Rgb::ACCENT));
        assert_eq!(Rgb::parse_hex("#fff"), None);
        assert_eq!(Rgb::parse_hex("#gggggg"), None);
    }

    #[test]
    fn test_paint_css() {
        assert_eq!(Rgb::ACCENT.opaque().css(), "#64ffda");
        assert_eq!(Rgb::ACCENT.with_alpha(0.03).css(), "rgba(100, 255, 218, 0.03)");
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&Rgb::from_u32(0x0a0b0c)).unwrap();
        assert_eq!(json, "\"#0a0b0c\"");
        let back: Rgb = serde_json::from_str("\"#64ffda\"").unwrap();
        assert_eq!(back, Rgb::ACCENT);
        assert!(serde_json::from_str::<Rgb>("\"teal\"").is_err());
    }
}
