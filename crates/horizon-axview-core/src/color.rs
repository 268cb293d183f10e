//! Color types and the host wire encoding.
//!
//! Colors arrive from the host as a 4-element numeric array in
//! `[alpha, red, green, blue]` order with each component in 0-255. They are
//! converted to normalized [`Rgba`] for everything past the option-decoding
//! boundary.

use serde::Deserialize;

/// A color with normalized (0.0-1.0) components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Rgba {
    /// Create a new color from normalized components.
    #[inline]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Convert to an 8-bit `[r, g, b, a]` array.
    pub fn to_rgba8(self) -> [u8; 4] {
        let scale = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            scale(self.red),
            scale(self.green),
            scale(self.blue),
            scale(self.alpha),
        ]
    }
}

/// A color as encoded on the host option channel.
///
/// The wire format is `[alpha, red, green, blue]`, each component 0-255.
/// Arrays of any other length decode but convert to `None`, matching the
/// tolerant treatment of malformed colors elsewhere in the option record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ApiColor(pub Vec<f64>);

impl ApiColor {
    /// Create from an `[alpha, red, green, blue]` quadruple.
    pub fn new(argb: [f64; 4]) -> Self {
        Self(argb.to_vec())
    }

    /// Convert to a normalized color, or `None` if the array is malformed.
    pub fn to_rgba(&self) -> Option<Rgba> {
        if self.0.len() != 4 {
            return None;
        }

        let alpha = self.0[0] / 255.0;
        let red = self.0[1] / 255.0;
        let green = self.0[2] / 255.0;
        let blue = self.0[3] / 255.0;

        Some(Rgba::new(red as f32, green as f32, blue as f32, alpha as f32))
    }
}
