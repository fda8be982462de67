//! Particle emitters
//!
//! An [`Emitter`] owns a fixed-capacity pool of particle slots and spawns
//! into free slots either continuously at a configured rate or in bursts.
//!
//! # Emission accounting
//!
//! ```text
//! accumulator += dt * emission_rate        (only while emitting)
//! emit_now     = floor(accumulator)
//! for slot in pool (slot order, single pass):
//!     active              → integrate
//!     inactive, emit_now  → spawn, integrate, emit_now -= 1, accumulator -= 1
//! ```
//!
//! The fractional remainder carries over to the next frame, so the long-run
//! spawn rate matches `emission_rate` regardless of frame-time jitter. A slot
//! freed during a pass is only reused on a later update.

pub mod config;

pub use config::EmitterConfig;

use crate::error::{ParticleError, ParticleResult};
use crate::foundation::color::linear_fade;
use crate::foundation::math::{normalize_or_zero, Vec2};
use crate::foundation::random::ParticleRng;
use crate::particle::Particle;
use crate::render::ParticleRenderer;
use std::rc::Rc;

/// Running counters for an emitter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitterStats {
    /// Particles spawned by rate-based emission
    pub spawned_total: u64,
    /// Particles spawned by bursts
    pub burst_total: u64,
    /// Highest slot count returned by `update`
    pub peak_active: usize,
}

/// A point source emitting particles into a fixed pool
pub struct Emitter {
    config: EmitterConfig,
    particles: Vec<Particle>,
    accumulator: f32,
    half_extent: Vec2,
    is_emitting: bool,
    rng: ParticleRng,
    stats: EmitterStats,
}

impl Emitter {
    /// Create an emitter with an entropy-seeded random source
    pub fn new(config: EmitterConfig) -> ParticleResult<Self> {
        Self::with_rng(config, ParticleRng::from_entropy())
    }

    /// Create an emitter whose spawns replay identically for the same seed
    pub fn with_seed(config: EmitterConfig, seed: u64) -> ParticleResult<Self> {
        Self::with_rng(config, ParticleRng::seeded(seed))
    }

    /// Create an emitter drawing from `rng`
    ///
    /// Allocates `config.capacity` inactive particle slots up front. Fails
    /// only if that storage cannot be reserved.
    pub fn with_rng(mut config: EmitterConfig, rng: ParticleRng) -> ParticleResult<Self> {
        let mut particles = Vec::new();
        particles
            .try_reserve_exact(config.capacity)
            .map_err(|source| {
                log::warn!("Failed to allocate particle pool of {} slots", config.capacity);
                ParticleError::Allocation {
                    what: "particle pool",
                    requested: config.capacity,
                    source,
                }
            })?;

        config.direction = normalize_or_zero(config.direction);
        particles.extend(
            (0..config.capacity).map(|_| Particle::new(Rc::clone(&config.deactivation))),
        );

        log::debug!(
            "Created emitter with {} particle slots at {} particles/s",
            config.capacity,
            config.emission_rate
        );

        Ok(Self {
            half_extent: config.texture.half_extent(),
            config,
            particles,
            accumulator: 0.0,
            is_emitting: false,
            rng,
            stats: EmitterStats::default(),
        })
    }

    /// Replace the configuration, growing or shrinking the pool to match.
    ///
    /// Particles in surviving slots keep their state but switch to the new
    /// configuration's deactivation policy. On failure nothing changes.
    pub fn resize(&mut self, mut config: EmitterConfig) -> ParticleResult<()> {
        let old_capacity = self.particles.len();
        let new_capacity = config.capacity;

        if new_capacity > old_capacity {
            self.particles
                .try_reserve_exact(new_capacity - old_capacity)
                .map_err(|source| {
                    log::warn!(
                        "Failed to grow particle pool from {} to {} slots",
                        old_capacity,
                        new_capacity
                    );
                    ParticleError::Allocation {
                        what: "particle pool",
                        requested: new_capacity,
                        source,
                    }
                })?;
            self.particles.extend(
                (old_capacity..new_capacity)
                    .map(|_| Particle::new(Rc::clone(&config.deactivation))),
            );
        } else if new_capacity < old_capacity {
            self.particles.truncate(new_capacity);
            self.particles.shrink_to(new_capacity);
        }

        config.direction = normalize_or_zero(config.direction);
        self.half_extent = config.texture.half_extent();
        self.config = config;

        for particle in &mut self.particles {
            particle.set_deactivation(Rc::clone(&self.config.deactivation));
        }

        log::debug!("Resized emitter pool from {} to {} slots", old_capacity, new_capacity);
        Ok(())
    }

    /// Begin rate-based emission
    pub fn start(&mut self) {
        self.is_emitting = true;
    }

    /// Stop rate-based emission; live particles keep simulating
    pub fn stop(&mut self) {
        self.is_emitting = false;
    }

    /// Spawn a random number of particles at once, drawn from `config.burst`.
    ///
    /// Works whether or not the emitter is emitting. Burst particles start
    /// exactly at the origin, ignoring the offset range. Returns how many
    /// were spawned, which is capped by the free slots.
    pub fn burst(&mut self) -> usize {
        let requested = usize::try_from(self.config.burst.sample(&mut self.rng)).unwrap_or(0);
        let mut emitted = 0;

        for particle in &mut self.particles {
            if emitted >= requested {
                break;
            }
            if !particle.is_active() {
                particle.init(&self.config, &mut self.rng);
                particle.set_position(self.config.origin);
                emitted += 1;
            }
        }

        if emitted < requested {
            log::trace!("Burst capped at {} of {} particles", emitted, requested);
        }

        self.stats.burst_total += emitted as u64;
        emitted
    }

    /// Advance the emitter by `dt` seconds and return how many slots were
    /// integrated: every particle active at the start of the pass plus every
    /// spawn, including those retired during this step.
    pub fn update(&mut self, dt: f32) -> usize {
        let mut emit_now = 0usize;
        if self.is_emitting {
            self.accumulator += dt * self.config.emission_rate;
            emit_now = self.accumulator.floor() as usize;
        }

        let mut updated = 0;
        let mut spawned = 0u64;

        for particle in &mut self.particles {
            if particle.is_active() {
                particle.update(dt);
                updated += 1;
            } else if self.is_emitting && emit_now > 0 {
                particle.init(&self.config, &mut self.rng);
                // Integrate right away so new particles do not lag a frame.
                particle.update(dt);
                emit_now -= 1;
                self.accumulator -= 1.0;
                spawned += 1;
                updated += 1;
            }
        }

        self.stats.spawned_total += spawned;
        self.stats.peak_active = self.stats.peak_active.max(updated);
        updated
    }

    /// Draw every active particle centered on its position and tinted by its
    /// color-over-lifetime fade.
    pub fn draw<R>(&self, renderer: &mut R)
    where
        R: ParticleRenderer + ?Sized,
    {
        renderer.begin_blend_mode(self.config.blend_mode);
        for particle in self.particles.iter().filter(|p| p.is_active()) {
            let tint = linear_fade(
                self.config.start_color,
                self.config.end_color,
                particle.life_fraction(),
            );
            renderer.draw_texture(
                &self.config.texture,
                particle.position() - self.half_extent,
                tint,
            );
        }
        renderer.end_blend_mode();
    }

    /// Move the spawn anchor; live particles keep their own origin
    pub fn set_origin(&mut self, origin: Vec2) {
        self.config.origin = origin;
    }

    /// Current configuration (direction already normalized)
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Whether rate-based emission is on
    pub fn is_emitting(&self) -> bool {
        self.is_emitting
    }

    /// Number of particle slots
    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    /// Number of currently active particles
    pub fn active_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_active()).count()
    }

    /// All particle slots in slot order, active or not
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Unspent fractional emission credit
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Half the texture size, subtracted from positions when drawing
    pub fn half_extent(&self) -> Vec2 {
        self.half_extent
    }

    /// Running counters
    pub fn stats(&self) -> &EmitterStats {
        &self.stats
    }
}

impl std::fmt::Debug for Emitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("capacity", &self.particles.len())
            .field("active", &self.active_count())
            .field("accumulator", &self.accumulator)
            .field("is_emitting", &self.is_emitting)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
