//! Pooled particles
//!
//! A [`Particle`] is one slot of an emitter's pool. It is created inactive
//! when the pool is built, re-initialized in place on every spawn and only
//! dropped together with its emitter.

pub mod deactivation;

pub use deactivation::{
    default_policy, AgeDeactivation, AnyOf, DeactivationPolicy, Edges, FnDeactivation,
    SharedPolicy, ViewBounds, ViewBoundsConfig,
};

use crate::emitter::EmitterConfig;
use crate::foundation::math::{normalize_or_zero, rotate, Vec2};
use crate::foundation::random::ParticleRng;
use std::fmt;

/// One simulated point entity
#[derive(Clone)]
pub struct Particle {
    origin: Vec2,
    position: Vec2,
    velocity: Vec2,
    external_acceleration: Vec2,
    origin_acceleration: f32,
    age: f32,
    ttl: f32,
    active: bool,
    deactivation: SharedPolicy,
}

impl Particle {
    /// Create an inactive, zeroed particle governed by `deactivation`
    pub fn new(deactivation: SharedPolicy) -> Self {
        Self {
            origin: Vec2::zeros(),
            position: Vec2::zeros(),
            velocity: Vec2::zeros(),
            external_acceleration: Vec2::zeros(),
            origin_acceleration: 0.0,
            age: 0.0,
            ttl: 0.0,
            active: false,
            deactivation,
        }
    }

    /// Spawn the particle from `config`, overwriting all kinematic state.
    ///
    /// `config.direction` is expected to be a unit vector; emitters normalize
    /// it once when they take ownership of a configuration.
    pub fn init(&mut self, config: &EmitterConfig, rng: &mut ParticleRng) {
        self.age = 0.0;
        self.origin = config.origin;

        // Heading: base direction deviated by a random angle.
        let heading = rotate(config.direction, config.direction_angle.sample(rng));

        let speed = config.velocity.sample(rng);
        self.velocity = rotate(heading * speed, config.velocity_angle.sample(rng));

        // Offset follows the heading, not the rotated velocity.
        let offset = config.offset.sample(rng);
        self.position = config.origin + heading * offset;

        self.origin_acceleration = config.origin_acceleration.sample(rng);
        self.external_acceleration = config.external_acceleration;
        self.ttl = config.age.sample(rng);
        self.active = true;
    }

    /// Advance the particle by `dt` seconds.
    ///
    /// Ages the particle, asks the deactivation policy, and if it survives
    /// integrates with semi-implicit Euler: velocity first, then position
    /// with the new velocity. A particle that dies this frame does not move.
    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }

        self.age += dt;

        if self.deactivation.should_deactivate(self) {
            self.active = false;
            return;
        }

        let to_origin = normalize_or_zero(self.origin - self.position);
        self.velocity += to_origin * (self.origin_acceleration * dt);
        self.velocity += self.external_acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Whether the particle is simulated and drawn
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Spawn anchor, fixed for the particle's lifetime
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Current position
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Current velocity
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Constant acceleration captured at spawn
    pub fn external_acceleration(&self) -> Vec2 {
        self.external_acceleration
    }

    /// Magnitude of the force toward the origin (negative repels)
    pub fn origin_acceleration(&self) -> f32 {
        self.origin_acceleration
    }

    /// Seconds since spawn
    pub fn age(&self) -> f32 {
        self.age
    }

    /// Lifetime drawn at spawn
    pub fn ttl(&self) -> f32 {
        self.ttl
    }

    /// Fraction of the lifetime elapsed, unclamped
    pub fn life_fraction(&self) -> f32 {
        self.age / self.ttl
    }

    /// Policy deciding this particle's death
    pub fn deactivation(&self) -> &SharedPolicy {
        &self.deactivation
    }

    pub(crate) fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub(crate) fn set_deactivation(&mut self, deactivation: SharedPolicy) {
        self.deactivation = deactivation;
    }
}

impl fmt::Debug for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Particle")
            .field("origin", &self.origin)
            .field("position", &self.position)
            .field("velocity", &self.velocity)
            .field("external_acceleration", &self.external_acceleration)
            .field("origin_acceleration", &self.origin_acceleration)
            .field("age", &self.age)
            .field("ttl", &self.ttl)
            .field("active", &self.active)
            .field("deactivation", &self.deactivation.name())
            .finish()
    }
}
