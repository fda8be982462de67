//! Emitter configuration

use crate::config::ConfigError;
use crate::foundation::color::Color;
use crate::foundation::math::Vec2;
use crate::foundation::random::{FloatRange, IntRange};
use crate::particle::{default_policy, SharedPolicy};
use crate::render::{BlendMode, Texture};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Description of one emission source
///
/// Angles are in degrees. The deactivation policy is not serialized; a
/// deserialized configuration uses the age-based default until replaced
/// with [`EmitterConfig::with_deactivation`].
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Pool size: maximum simultaneously active particles
    pub capacity: usize,
    /// Particles spawned per second while emitting
    pub emission_rate: f32,
    /// Spawn anchor
    pub origin: Vec2,
    /// Base heading, normalized by the emitter
    pub direction: Vec2,
    /// Random deviation applied to `direction`
    pub direction_angle: FloatRange,
    /// Random speed along the deviated heading
    pub velocity: FloatRange,
    /// Random rotation applied to the velocity after the heading deviation
    pub velocity_angle: FloatRange,
    /// Random spawn distance from `origin` along the deviated heading
    pub offset: FloatRange,
    /// Random magnitude of the force toward `origin` (negative repels)
    pub origin_acceleration: FloatRange,
    /// Constant acceleration such as gravity
    pub external_acceleration: Vec2,
    /// Tint at spawn
    pub start_color: Color,
    /// Tint at the end of the lifetime
    pub end_color: Color,
    /// Random lifetime in seconds
    pub age: FloatRange,
    /// Random particle count for a burst
    pub burst: IntRange,
    /// Texture drawn for every particle
    pub texture: Texture,
    /// Blend mode for every particle
    pub blend_mode: BlendMode,
    /// Policy retiring particles
    #[serde(skip, default = "default_policy")]
    pub deactivation: SharedPolicy,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            emission_rate: 10.0,
            origin: Vec2::zeros(),
            direction: Vec2::new(0.0, -1.0),
            direction_angle: FloatRange::constant(0.0),
            velocity: FloatRange::new(50.0, 100.0),
            velocity_angle: FloatRange::constant(0.0),
            offset: FloatRange::constant(0.0),
            origin_acceleration: FloatRange::constant(0.0),
            external_acceleration: Vec2::zeros(),
            start_color: Color::WHITE,
            end_color: Color::WHITE.with_alpha(0),
            age: FloatRange::new(1.0, 2.0),
            burst: IntRange::new(10, 20),
            texture: Texture::default(),
            blend_mode: BlendMode::Alpha,
            deactivation: default_policy(),
        }
    }
}

impl EmitterConfig {
    /// Set pool size
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set particles per second
    pub fn with_emission_rate(mut self, rate: f32) -> Self {
        self.emission_rate = rate;
        self
    }

    /// Set spawn anchor
    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    /// Set base heading
    pub fn with_direction(mut self, direction: Vec2) -> Self {
        self.direction = direction;
        self
    }

    /// Set heading deviation range
    pub fn with_direction_angle(mut self, range: FloatRange) -> Self {
        self.direction_angle = range;
        self
    }

    /// Set speed range
    pub fn with_velocity(mut self, range: FloatRange) -> Self {
        self.velocity = range;
        self
    }

    /// Set velocity rotation range
    pub fn with_velocity_angle(mut self, range: FloatRange) -> Self {
        self.velocity_angle = range;
        self
    }

    /// Set spawn offset range
    pub fn with_offset(mut self, range: FloatRange) -> Self {
        self.offset = range;
        self
    }

    /// Set origin-directed acceleration range
    pub fn with_origin_acceleration(mut self, range: FloatRange) -> Self {
        self.origin_acceleration = range;
        self
    }

    /// Set constant acceleration
    pub fn with_external_acceleration(mut self, acceleration: Vec2) -> Self {
        self.external_acceleration = acceleration;
        self
    }

    /// Set color fade endpoints
    pub fn with_colors(mut self, start: Color, end: Color) -> Self {
        self.start_color = start;
        self.end_color = end;
        self
    }

    /// Set lifetime range
    pub fn with_age(mut self, range: FloatRange) -> Self {
        self.age = range;
        self
    }

    /// Set burst count range
    pub fn with_burst(mut self, range: IntRange) -> Self {
        self.burst = range;
        self
    }

    /// Set texture
    pub fn with_texture(mut self, texture: Texture) -> Self {
        self.texture = texture;
        self
    }

    /// Set blend mode
    pub fn with_blend_mode(mut self, mode: BlendMode) -> Self {
        self.blend_mode = mode;
        self
    }

    /// Set deactivation policy
    pub fn with_deactivation(mut self, policy: SharedPolicy) -> Self {
        self.deactivation = policy;
        self
    }

    /// Check the configuration for values that cannot produce sane particles
    ///
    /// Emitters accept any configuration; this is for data coming from files.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.emission_rate.is_finite() || self.emission_rate < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "emission rate must be finite and non-negative, got {}",
                self.emission_rate
            )));
        }

        for (name, vector) in [
            ("origin", self.origin),
            ("direction", self.direction),
            ("external_acceleration", self.external_acceleration),
        ] {
            if !vector.iter().all(|x| x.is_finite()) {
                return Err(ConfigError::Invalid(format!(
                    "{name} contains invalid values: {vector:?}"
                )));
            }
        }

        for (name, range) in [
            ("direction_angle", self.direction_angle),
            ("velocity", self.velocity),
            ("velocity_angle", self.velocity_angle),
            ("offset", self.offset),
            ("origin_acceleration", self.origin_acceleration),
            ("age", self.age),
        ] {
            if !range.min.is_finite() || !range.max.is_finite() || range.min > range.max {
                return Err(ConfigError::Invalid(format!(
                    "{name} range is invalid: {} .. {}",
                    range.min, range.max
                )));
            }
        }

        if self.age.min < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "age range must not be negative, got min {}",
                self.age.min
            )));
        }

        if self.burst.min < 0 || self.burst.min > self.burst.max {
            return Err(ConfigError::Invalid(format!(
                "burst range is invalid: {} .. {}",
                self.burst.min, self.burst.max
            )));
        }

        Ok(())
    }
}

impl fmt::Debug for EmitterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmitterConfig")
            .field("capacity", &self.capacity)
            .field("emission_rate", &self.emission_rate)
            .field("origin", &self.origin)
            .field("direction", &self.direction)
            .field("direction_angle", &self.direction_angle)
            .field("velocity", &self.velocity)
            .field("velocity_angle", &self.velocity_angle)
            .field("offset", &self.offset)
            .field("origin_acceleration", &self.origin_acceleration)
            .field("external_acceleration", &self.external_acceleration)
            .field("start_color", &self.start_color)
            .field("end_color", &self.end_color)
            .field("age", &self.age)
            .field("burst", &self.burst)
            .field("texture", &self.texture)
            .field("blend_mode", &self.blend_mode)
            .field("deactivation", &self.deactivation.name())
            .finish()
    }
}
