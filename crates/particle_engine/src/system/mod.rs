//! Particle systems: registries of emitters forming one effect
//!
//! A [`ParticleSystem`] holds [`EmitterHandle`]s, not emitters. The emitters
//! live in an [`EmitterStore`] owned by the host, and every broadcast takes
//! the store explicitly:
//!
//! ```text
//! EmitterStore (owns)          ParticleSystem (borrows by handle)
//!  ├── h1 → Emitter  ◄──────────── [h1, h3]
//!  ├── h2 → Emitter
//!  └── h3 → Emitter  ◄──────────┘
//! ```
//!
//! Dropping a system never drops its emitters; remove them from the store
//! separately. A handle whose emitter has been removed is skipped.

use crate::emitter::Emitter;
use crate::error::{ParticleError, ParticleResult};
use crate::foundation::collections::{new_key_type, HandleMap};
use crate::foundation::math::Vec2;
use crate::render::ParticleRenderer;

new_key_type! {
    /// Stable, non-owning reference to an emitter in an [`EmitterStore`]
    pub struct EmitterHandle;
}

/// Host-owned storage for emitters
pub type EmitterStore = HandleMap<EmitterHandle, Emitter>;

/// Initial registry capacity
pub const INITIAL_CAPACITY: usize = 1;

/// A group of emitters driven together
#[derive(Debug)]
pub struct ParticleSystem {
    emitters: Vec<EmitterHandle>,
    origin: Vec2,
}

impl ParticleSystem {
    /// Create an empty system
    pub fn new() -> ParticleResult<Self> {
        let mut emitters = Vec::new();
        emitters
            .try_reserve_exact(INITIAL_CAPACITY)
            .map_err(|source| ParticleError::Allocation {
                what: "emitter registry",
                requested: INITIAL_CAPACITY,
                source,
            })?;

        Ok(Self {
            emitters,
            origin: Vec2::zeros(),
        })
    }

    /// Add an emitter to the system.
    ///
    /// Unlike a plain append, a handle that is already registered is not
    /// added a second time: the call returns `Ok(false)` and leaves the
    /// registry as it was, so every emitter is updated and drawn once per
    /// broadcast. The backing array doubles when full; if that fails the
    /// registry is unchanged.
    pub fn register(&mut self, handle: EmitterHandle) -> ParticleResult<bool> {
        if self.contains(handle) {
            log::debug!("Emitter {:?} is already registered", handle);
            return Ok(false);
        }

        if self.emitters.len() >= self.emitters.capacity() {
            let additional = self.emitters.capacity().max(1);
            let requested = self.emitters.capacity() + additional;
            self.emitters
                .try_reserve_exact(additional)
                .map_err(|source| {
                    log::warn!("Failed to grow emitter registry to {} entries", requested);
                    ParticleError::Allocation {
                        what: "emitter registry",
                        requested,
                        source,
                    }
                })?;
        }

        self.emitters.push(handle);
        Ok(true)
    }

    /// Remove an emitter from the system.
    ///
    /// The last registered handle takes the removed one's place, so the order
    /// of the remaining emitters is not preserved. Returns `false` if the
    /// handle was not registered.
    pub fn deregister(&mut self, handle: EmitterHandle) -> bool {
        match self.emitters.iter().position(|h| *h == handle) {
            Some(index) => {
                self.emitters.swap_remove(index);
                true
            }
            None => false,
        }
    }

    /// Move every registered emitter's spawn anchor to `origin`
    pub fn set_origin(&mut self, store: &mut EmitterStore, origin: Vec2) {
        self.origin = origin;
        self.for_each_mut(store, |emitter| emitter.set_origin(origin));
    }

    /// Start every registered emitter
    pub fn start(&self, store: &mut EmitterStore) {
        self.for_each_mut(store, Emitter::start);
    }

    /// Stop every registered emitter
    pub fn stop(&self, store: &mut EmitterStore) {
        self.for_each_mut(store, Emitter::stop);
    }

    /// Burst every registered emitter; returns the total spawned
    pub fn burst(&self, store: &mut EmitterStore) -> usize {
        let mut total = 0;
        self.for_each_mut(store, |emitter| total += emitter.burst());
        total
    }

    /// Update every registered emitter; returns the total active particles
    pub fn update(&self, store: &mut EmitterStore, dt: f32) -> usize {
        let mut total = 0;
        self.for_each_mut(store, |emitter| total += emitter.update(dt));
        total
    }

    /// Draw every registered emitter in registry order
    pub fn draw<R>(&self, store: &EmitterStore, renderer: &mut R)
    where
        R: ParticleRenderer + ?Sized,
    {
        for &handle in &self.emitters {
            match store.get(handle) {
                Some(emitter) => emitter.draw(renderer),
                None => log::warn!("Skipping removed emitter {:?}", handle),
            }
        }
    }

    /// Last origin set through `set_origin`
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Registered handles in registry order
    pub fn handles(&self) -> &[EmitterHandle] {
        &self.emitters
    }

    /// Whether `handle` is registered
    pub fn contains(&self, handle: EmitterHandle) -> bool {
        self.emitters.contains(&handle)
    }

    /// Number of registered emitters
    pub fn len(&self) -> usize {
        self.emitters.len()
    }

    /// Whether no emitters are registered
    pub fn is_empty(&self) -> bool {
        self.emitters.is_empty()
    }

    /// Allocated registry slots
    pub fn capacity(&self) -> usize {
        self.emitters.capacity()
    }

    fn for_each_mut<F>(&self, store: &mut EmitterStore, mut f: F)
    where
        F: FnMut(&mut Emitter),
    {
        for &handle in &self.emitters {
            match store.get_mut(handle) {
                Some(emitter) => f(emitter),
                None => log::warn!("Skipping removed emitter {:?}", handle),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::EmitterConfig;
    use crate::foundation::random::{FloatRange, IntRange};
    use crate::render::CommandRecorder;

    fn emitter(capacity: usize, rate: f32) -> Emitter {
        let config = EmitterConfig::default()
            .with_capacity(capacity)
            .with_emission_rate(rate)
            .with_age(FloatRange::constant(100.0))
            .with_burst(IntRange::constant(2));
        Emitter::with_seed(config, 7).unwrap()
    }

    #[test]
    fn test_new_system_is_empty() {
        let system = ParticleSystem::new().unwrap();
        assert!(system.is_empty());
        assert_eq!(system.capacity(), INITIAL_CAPACITY);
        assert_eq!(system.origin(), Vec2::zeros());
    }

    #[test]
    fn test_register_doubles_capacity() {
        let mut store = EmitterStore::with_key();
        let mut system = ParticleSystem::new().unwrap();

        for i in 0..5 {
            let handle = store.insert(emitter(1, 1.0));
            assert!(system.register(handle).unwrap());
            assert_eq!(system.len(), i + 1);
        }
        assert!(system.capacity() >= 5);
    }

    #[test]
    fn test_duplicate_register_is_ignored() {
        let mut store = EmitterStore::with_key();
        let mut system = ParticleSystem::new().unwrap();
        let handle = store.insert(emitter(1, 1.0));

        assert!(system.register(handle).unwrap());
        assert!(!system.register(handle).unwrap());
        assert_eq!(system.len(), 1);
    }

    #[test]
    fn test_deregister_swaps_last_into_place() {
        let mut store = EmitterStore::with_key();
        let mut system = ParticleSystem::new().unwrap();
        let handles: Vec<_> = (0..4).map(|_| store.insert(emitter(1, 1.0))).collect();
        for &handle in &handles {
            system.register(handle).unwrap();
        }

        assert!(system.deregister(handles[1]));
        assert_eq!(system.handles(), &[handles[0], handles[3], handles[2]]);

        assert!(system.deregister(handles[2]));
        assert_eq!(system.handles(), &[handles[0], handles[3]]);
    }

    #[test]
    fn test_deregister_unknown_leaves_registry_untouched() {
        let mut store = EmitterStore::with_key();
        let mut system = ParticleSystem::new().unwrap();
        let member = store.insert(emitter(1, 1.0));
        let stranger = store.insert(emitter(1, 1.0));
        system.register(member).unwrap();

        assert!(!system.deregister(stranger));
        assert_eq!(system.handles(), &[member]);
    }

    #[test]
    fn test_broadcast_operations() {
        let mut store = EmitterStore::with_key();
        let mut system = ParticleSystem::new().unwrap();
        let a = store.insert(emitter(10, 5.0));
        let b = store.insert(emitter(10, 3.0));
        system.register(a).unwrap();
        system.register(b).unwrap();

        system.set_origin(&mut store, Vec2::new(4.0, 2.0));
        assert_eq!(system.origin(), Vec2::new(4.0, 2.0));
        assert_eq!(store[a].config().origin, Vec2::new(4.0, 2.0));
        assert_eq!(store[b].config().origin, Vec2::new(4.0, 2.0));

        system.start(&mut store);
        assert!(store[a].is_emitting() && store[b].is_emitting());
        assert_eq!(system.update(&mut store, 1.0), 8);

        system.stop(&mut store);
        assert!(!store[a].is_emitting() && !store[b].is_emitting());

        assert_eq!(system.burst(&mut store), 4);
        assert_eq!(system.update(&mut store, 0.1), 12);

        let mut recorder = CommandRecorder::new();
        system.draw(&store, &mut recorder);
        assert_eq!(recorder.len(), 12);
        assert_eq!(recorder.batch_count(), 2);
    }

    #[test]
    fn test_update_total_includes_retiring_particles() {
        let mut store = EmitterStore::with_key();
        let mut system = ParticleSystem::new().unwrap();
        let short_lived = EmitterConfig::default()
            .with_capacity(4)
            .with_emission_rate(2.0)
            .with_age(FloatRange::constant(0.1));
        let a = store.insert(Emitter::with_seed(short_lived, 1).unwrap());
        let b = store.insert(emitter(10, 3.0));
        system.register(a).unwrap();
        system.register(b).unwrap();
        system.start(&mut store);

        // Both spawns of `a` die within their first step but are still counted.
        assert_eq!(system.update(&mut store, 1.0), 5);
        assert_eq!(store[a].active_count(), 0);
        assert_eq!(store[b].active_count(), 3);
    }

    #[test]
    fn test_removed_emitter_is_skipped() {
        let mut store = EmitterStore::with_key();
        let mut system = ParticleSystem::new().unwrap();
        let kept = store.insert(emitter(10, 5.0));
        let removed = store.insert(emitter(10, 5.0));
        system.register(kept).unwrap();
        system.register(removed).unwrap();

        store.remove(removed);
        system.start(&mut store);
        assert_eq!(system.update(&mut store, 1.0), 5);
        assert_eq!(system.len(), 2);
    }

    #[test]
    fn test_dropping_system_keeps_emitters() {
        let mut store = EmitterStore::with_key();
        let handle = store.insert(emitter(3, 1.0));
        {
            let mut system = ParticleSystem::new().unwrap();
            system.register(handle).unwrap();
        }
        assert!(store.contains_key(handle));
        assert_eq!(store[handle].capacity(), 3);
    }
}
