//! Effect configuration: a named set of emitters forming one particle system

use super::{Config, ConfigError};
use crate::emitter::{Emitter, EmitterConfig};
use crate::error::ParticleResult;
use crate::foundation::random::ParticleRng;
use crate::system::{EmitterHandle, EmitterStore, ParticleSystem};
use serde::{Deserialize, Serialize};

/// A complete effect, loadable from TOML or RON
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    /// Effect name, used in logs
    pub name: String,
    /// Emitters making up the effect, in registration order
    pub emitters: Vec<EmitterConfig>,
}

impl EffectConfig {
    /// Create an empty effect
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            emitters: Vec::new(),
        }
    }

    /// Append an emitter
    pub fn with_emitter(mut self, emitter: EmitterConfig) -> Self {
        self.emitters.push(emitter);
        self
    }

    /// Validate every emitter, naming the first offender
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, emitter) in self.emitters.iter().enumerate() {
            emitter.validate().map_err(|e| {
                ConfigError::Invalid(format!("effect '{}' emitter {index}: {e}", self.name))
            })?;
        }
        Ok(())
    }

    /// Load and validate an effect file
    pub fn load_validated(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let effect = Self::load_from_file(path)?;
        effect.validate()?;
        Ok(effect)
    }

    /// Create the emitters in `store` and register them in a new system
    pub fn build(&self, store: &mut EmitterStore) -> ParticleResult<ParticleSystem> {
        self.build_with(store, |_| ParticleRng::from_entropy())
    }

    /// Like [`EffectConfig::build`], with emitter `i` seeded by `seed + i`
    pub fn build_seeded(
        &self,
        store: &mut EmitterStore,
        seed: u64,
    ) -> ParticleResult<ParticleSystem> {
        self.build_with(store, |index| ParticleRng::seeded(seed.wrapping_add(index as u64)))
    }

    /// On failure every emitter created so far is removed from `store` again.
    fn build_with<F>(
        &self,
        store: &mut EmitterStore,
        mut rng_for: F,
    ) -> ParticleResult<ParticleSystem>
    where
        F: FnMut(usize) -> ParticleRng,
    {
        let mut created: Vec<EmitterHandle> = Vec::new();
        let result = self.populate(store, &mut rng_for, &mut created);

        if result.is_err() {
            log::warn!(
                "Failed to build effect '{}', releasing {} emitters",
                self.name,
                created.len()
            );
            for handle in created {
                store.remove(handle);
            }
        } else {
            log::debug!("Built effect '{}' with {} emitters", self.name, self.emitters.len());
        }

        result
    }

    fn populate<F>(
        &self,
        store: &mut EmitterStore,
        rng_for: &mut F,
        created: &mut Vec<EmitterHandle>,
    ) -> ParticleResult<ParticleSystem>
    where
        F: FnMut(usize) -> ParticleRng,
    {
        let mut system = ParticleSystem::new()?;
        for (index, config) in self.emitters.iter().enumerate() {
            let emitter = Emitter::with_rng(config.clone(), rng_for(index))?;
            let handle = store.insert(emitter);
            created.push(handle);
            system.register(handle)?;
        }
        Ok(system)
    }
}

impl Config for EffectConfig {}
