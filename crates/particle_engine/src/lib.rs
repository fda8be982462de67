//! # Particle Engine
//!
//! A pooled 2D particle simulation: emitters own fixed-capacity particle
//! pools, spawn into them at a fractional-carry rate or in bursts, and a
//! particle system broadcasts operations across many emitters.
//!
//! ## Features
//!
//! - **Pooled particles**: no per-particle allocation after construction
//! - **Rate-accurate emission**: fractional spawn credit carries across frames
//! - **Pluggable deactivation**: age, view bounds or any closure
//! - **Renderer-agnostic drawing**: emitters issue tinted texture draws
//! - **File-backed effects**: TOML or RON effect descriptions
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use particle_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut store = EmitterStore::with_key();
//!     let view = ViewBoundsConfig::new(Vec2::zeros(), 1000.0, 800.0);
//!     let system = presets::fountain(PresetTextures::default(), view).build(&mut store)?;
//!
//!     system.start(&mut store);
//!     let mut recorder = CommandRecorder::new();
//!     for _ in 0..60 {
//!         let active = system.update(&mut store, 1.0 / 60.0);
//!         system.draw(&store, &mut recorder);
//!         log::info!("{active} particles");
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod error;
pub mod particle;
pub mod emitter;
pub mod system;
pub mod render;
pub mod presets;

#[cfg(test)]
mod tests;

pub use config::{Config, ConfigError, EffectConfig, EngineConfig};
pub use error::{ParticleError, ParticleResult};

/// Commonly used types
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, EffectConfig, EngineConfig},
        emitter::{Emitter, EmitterConfig, EmitterStats},
        error::{ParticleError, ParticleResult},
        foundation::{
            color::{linear_fade, Color},
            math::Vec2,
            random::{FloatRange, IntRange, ParticleRng},
            time::Timer,
        },
        particle::{
            AgeDeactivation, AnyOf, DeactivationPolicy, Edges, FnDeactivation, Particle,
            SharedPolicy, ViewBounds, ViewBoundsConfig,
        },
        presets::{self, PresetTextures},
        render::{BlendMode, CommandRecorder, DrawCommand, ParticleRenderer, Texture},
        system::{EmitterHandle, EmitterStore, ParticleSystem},
    };
}
