//! 8-bit RGBA colors and color-over-lifetime fading

use serde::{Deserialize, Serialize};

/// RGBA color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Color {
    /// Opaque white
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque black
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Fully transparent black
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Create a color from its four channels
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Linearly interpolate every channel from `from` to `to`.
///
/// `fraction` is not clamped. Results outside a channel's range saturate at
/// 0 or 255; in-range results are truncated toward zero.
pub fn linear_fade(from: Color, to: Color, fraction: f32) -> Color {
    let channel = |a: u8, b: u8| -> u8 {
        let delta = f32::from(b) - f32::from(a);
        (delta * fraction + f32::from(a)) as u8
    };

    Color {
        r: channel(from.r, to.r),
        g: channel(from.g, to.g),
        b: channel(from.b, to.b),
        a: channel(from.a, to.a),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_endpoints() {
        let start = Color::new(0, 20, 255, 255);
        let end = Color::new(0, 150, 100, 0);

        assert_eq!(linear_fade(start, end, 0.0), start);
        assert_eq!(linear_fade(start, end, 1.0), end);
    }

    #[test]
    fn test_fade_endpoints_for_all_extremes() {
        let colors = [Color::WHITE, Color::BLACK, Color::TRANSPARENT, Color::new(13, 200, 77, 128)];
        for &a in &colors {
            for &b in &colors {
                assert_eq!(linear_fade(a, b, 0.0), a);
                assert_eq!(linear_fade(a, b, 1.0), b);
            }
        }
    }

    #[test]
    fn test_fade_midpoint_truncates() {
        let faded = linear_fade(Color::new(0, 0, 0, 255), Color::new(255, 10, 3, 0), 0.5);
        assert_eq!(faded, Color::new(127, 5, 1, 127));
    }

    #[test]
    fn test_fade_beyond_one_saturates() {
        let faded = linear_fade(Color::new(200, 0, 0, 255), Color::new(250, 0, 0, 0), 10.0);
        assert_eq!(faded.r, 255);
        assert_eq!(faded.a, 0);
    }
}
