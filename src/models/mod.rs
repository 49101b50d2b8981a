//! Core domain types for the explorateurs map
//!
//! The types here are deliberately small value types: coordinates used as
//! exact-match map keys, RGB colors with the `#rrggbb` wire format, the
//! fixed set of explorers, and the marker description handed to the map
//! renderer.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// A latitude/longitude pair used as an exact-match lookup key.
///
/// Two coordinates merge only when their bit patterns are identical; there
/// is no proximity clustering. Equality and hashing therefore go through
/// `f64::to_bits` rather than float comparison.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.lat.to_bits() == other.lat.to_bits() && self.lon.to_bits() == other.lon.to_bits()
    }
}

impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lat.to_bits().hash(state);
        self.lon.to_bits().hash(state);
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

/// An RGB color carried on the wire as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Per-channel truncating mean of two colors: `(old + new) / 2` on each
    /// channel, truncated toward zero. Folding is pairwise and
    /// order-dependent; averaging a third color folds against the already
    /// averaged value, not against either original.
    pub fn average(self, other: Self) -> Self {
        Self {
            r: ((self.r as u16 + other.r as u16) / 2) as u8,
            g: ((self.g as u16 + other.g as u16) / 2) as u8,
            b: ((self.b as u16 + other.b as u16) / 2) as u8,
        }
    }
}

impl FromStr for Color {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| AppError::validation(format!("color must start with '#': {s:?}")))?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AppError::validation(format!(
                "color must be '#' followed by six hex digits: {s:?}"
            )));
        }
        // length and digit checks above make these infallible
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|e| AppError::validation(format!("invalid color channel in {s:?}: {e}")))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

impl fmt::Display for Color {
    /// Always exactly seven characters: `#` plus six lowercase, zero-padded
    /// hex digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The three explorers whose departure points the map shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Explorer {
    Columbus,
    Vespucci,
    DaGama,
}

impl Explorer {
    pub const ALL: [Explorer; 3] = [Explorer::Columbus, Explorer::Vespucci, Explorer::DaGama];

    pub fn display_name(&self) -> &'static str {
        match self {
            Explorer::Columbus => "Christopher Columbus",
            Explorer::Vespucci => "Amerigo Vespucci",
            Explorer::DaGama => "Vasco da Gama",
        }
    }

    /// Color used when the visitor has not picked one yet.
    pub fn default_color(&self) -> Color {
        match self {
            Explorer::Columbus => Color::new(0x31, 0x86, 0xcc),
            Explorer::Vespucci => Color::new(0xff, 0x26, 0x00),
            Explorer::DaGama => Color::new(0x00, 0xff, 0x48),
        }
    }

    /// Portrait asset under the embedded `content/portraits/` tree.
    pub fn portrait_asset(&self) -> &'static str {
        match self {
            Explorer::Columbus => "content/portraits/columbus.svg",
            Explorer::Vespucci => "content/portraits/vespucci.svg",
            Explorer::DaGama => "content/portraits/da_gama.svg",
        }
    }
}

impl fmt::Display for Explorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One rendered map marker: a fixed-style boundary ring plus a filled,
/// colored circle carrying the merged popup content for its coordinate.
#[derive(Debug, Clone)]
pub struct Marker {
    pub place: &'static str,
    pub coordinate: Coordinate,
    pub color: Color,
    pub popup_html: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_equality_is_exact() {
        let cadiz = Coordinate::new(36.5271, -6.2886);
        assert_eq!(cadiz, Coordinate::new(36.5271, -6.2886));
        assert_ne!(cadiz, Coordinate::new(36.5271, -6.2887));
    }

    #[test]
    fn color_parses_and_formats_lowercase() {
        let c: Color = "#3186CC".parse().unwrap();
        assert_eq!(c, Color::new(0x31, 0x86, 0xcc));
        assert_eq!(c.to_string(), "#3186cc");
    }

    #[test]
    fn color_format_is_zero_padded_seven_chars() {
        for c in [
            Color::new(0, 0, 0),
            Color::new(1, 2, 3),
            Color::new(255, 255, 255),
            Color::new(0x0a, 0x00, 0xf0),
        ] {
            let s = c.to_string();
            assert_eq!(s.len(), 7);
            assert!(s.starts_with('#'));
        }
        assert_eq!(Color::new(1, 2, 3).to_string(), "#010203");
    }

    #[test]
    fn color_round_trips() {
        for r in [0u8, 1, 15, 16, 127, 128, 254, 255] {
            for g in [0u8, 9, 160, 255] {
                for b in [0u8, 77, 255] {
                    let c = Color::new(r, g, b);
                    let back: Color = c.to_string().parse().unwrap();
                    assert_eq!(back, c);
                }
            }
        }
    }

    #[test]
    fn malformed_colors_are_rejected() {
        for bad in ["3186cc", "#3186c", "#3186ccc", "#31 6cc", "#31g6cc", "", "#"] {
            assert!(bad.parse::<Color>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn average_truncates_per_channel() {
        let a = Color::new(0x31, 0x86, 0xcc);
        let b = Color::new(0xff, 0x26, 0x00);
        assert_eq!(a.average(b), Color::new(0x98, 0x56, 0x66));
        // 1 + 2 = 3, truncates to 1
        assert_eq!(
            Color::new(1, 1, 1).average(Color::new(2, 2, 2)),
            Color::new(1, 1, 1)
        );
    }
}
