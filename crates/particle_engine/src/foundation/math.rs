//! Math utilities and types
//!
//! Provides the 2D vector type and the small set of vector operations the
//! particle integrator needs.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }
}

/// Return the unit vector pointing along `v`.
///
/// The zero vector is returned unchanged instead of producing NaNs, which
/// makes origin-directed forces vanish when a particle sits on its origin.
pub fn normalize_or_zero(v: Vec2) -> Vec2 {
    if v.x == 0.0 && v.y == 0.0 {
        return v;
    }
    v / v.norm()
}

/// Rotate `v` counter-clockwise by `degrees`.
pub fn rotate(v: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = utils::deg_to_rad(degrees).sin_cos();
    Vec2::new(cos * v.x - sin * v.y, sin * v.x + cos * v.y)
}
