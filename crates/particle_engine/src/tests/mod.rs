//! Cross-module behavior checks: emitters, particles and the registry
//! working together.

use crate::emitter::{Emitter, EmitterConfig};
use crate::foundation::color::{linear_fade, Color};
use crate::foundation::math::Vec2;
use crate::foundation::random::{FloatRange, IntRange, ParticleRng};
use crate::particle::{default_policy, Particle};
use crate::system::{EmitterStore, ParticleSystem};
use approx::assert_relative_eq;

fn long_lived(capacity: usize, rate: f32) -> EmitterConfig {
    EmitterConfig::default()
        .with_capacity(capacity)
        .with_emission_rate(rate)
        .with_age(FloatRange::constant(1000.0))
}

#[test]
fn test_single_frame_rate_scenario() {
    let mut emitter = Emitter::with_seed(long_lived(10, 5.0), 1).unwrap();
    emitter.start();

    let active = emitter.update(1.0);

    assert_eq!(active, 5);
    assert_eq!(emitter.active_count(), 5);
    assert_eq!(emitter.particles().iter().filter(|p| !p.is_active()).count(), 5);
    // Credit of 5.0 is spent entirely on the five spawns.
    assert_relative_eq!(emitter.accumulator(), 0.0);
}

#[test]
fn test_burst_capped_at_origin() {
    let origin = Vec2::new(12.0, -7.0);
    let config = long_lived(2, 0.0)
        .with_origin(origin)
        .with_offset(FloatRange::new(50.0, 60.0))
        .with_burst(IntRange::constant(5));
    let mut emitter = Emitter::with_seed(config, 2).unwrap();

    assert_eq!(emitter.burst(), 2);
    assert_eq!(emitter.active_count(), 2);
    for particle in emitter.particles() {
        assert_eq!(particle.position(), origin);
    }
}

#[test]
fn test_ttl_deactivation_scenario() {
    let config = EmitterConfig::default().with_age(FloatRange::constant(1.0));
    let mut rng = ParticleRng::seeded(3);
    let mut particle = Particle::new(default_policy());
    particle.init(&config, &mut rng);

    particle.update(0.6);
    assert!(particle.is_active());
    assert_relative_eq!(particle.age(), 0.6);
    let position = particle.position();

    particle.update(0.6);
    assert!(!particle.is_active());
    assert_relative_eq!(particle.age(), 1.2);
    // The dying update does not move the particle.
    assert_eq!(particle.position(), position);
}

#[test]
fn test_pool_bound_under_mixed_calls() {
    let config = EmitterConfig::default()
        .with_capacity(25)
        .with_emission_rate(90.0)
        .with_age(FloatRange::new(0.1, 0.6))
        .with_burst(IntRange::new(0, 40));
    let mut emitter = Emitter::with_seed(config, 4).unwrap();
    let mut script = ParticleRng::seeded(40);
    emitter.start();

    for _ in 0..500 {
        match script.int_inclusive(0, 3) {
            0 => {
                emitter.burst();
            }
            1 => emitter.stop(),
            2 => emitter.start(),
            _ => {}
        }
        let active = emitter.update(script.unit() * 0.1);
        assert!(active <= emitter.capacity());
        assert!(emitter.active_count() <= 25);
    }
}

#[test]
fn test_rate_convergence() {
    let rate = 37.5;
    let seconds = 10.0;
    let dt = 1.0 / 60.0;
    let mut emitter = Emitter::with_seed(long_lived(1000, rate), 5).unwrap();
    emitter.start();

    for _ in 0..600 {
        emitter.update(dt);
    }

    let expected = rate * seconds;
    let spawned = emitter.stats().spawned_total as f32;
    assert!((spawned - expected).abs() <= 1.0, "spawned {spawned}, expected {expected}");
}

#[test]
fn test_rate_convergence_with_jitter() {
    let rate = 120.0;
    let mut emitter = Emitter::with_seed(long_lived(2000, rate), 6).unwrap();
    let mut jitter = ParticleRng::seeded(60);
    let mut elapsed = 0.0f64;
    emitter.start();

    for _ in 0..300 {
        let dt = 0.005 + jitter.unit() * 0.03;
        elapsed += f64::from(dt);
        emitter.update(dt);
    }

    let expected = elapsed * f64::from(rate);
    let spawned = emitter.stats().spawned_total as f64;
    assert!((spawned - expected).abs() <= 1.0, "spawned {spawned}, expected {expected}");
}

#[test]
fn test_age_monotonic_then_frozen() {
    let config = EmitterConfig::default()
        .with_capacity(1)
        .with_age(FloatRange::constant(0.5))
        .with_burst(IntRange::constant(1));
    let mut emitter = Emitter::with_seed(config, 7).unwrap();
    emitter.burst();

    let mut last_age = 0.0;
    let mut frozen_at = None;
    for _ in 0..20 {
        emitter.update(0.05);
        let particle = &emitter.particles()[0];
        match frozen_at {
            None if particle.is_active() => {
                assert!(particle.age() >= last_age);
                last_age = particle.age();
            }
            None => frozen_at = Some(particle.age()),
            Some(age) => assert_relative_eq!(particle.age(), age),
        }
    }

    assert!(frozen_at.is_some());
    emitter.burst();
    assert_relative_eq!(emitter.particles()[0].age(), 0.0);
}

#[test]
fn test_replay_gives_identical_transitions() {
    let config = EmitterConfig::default()
        .with_capacity(40)
        .with_emission_rate(60.0)
        .with_age(FloatRange::new(0.2, 0.9));

    let run = |seed: u64| {
        let mut emitter = Emitter::with_seed(config.clone(), seed).unwrap();
        emitter.start();
        (0..120)
            .map(|_| {
                emitter.update(1.0 / 30.0);
                emitter.particles().iter().map(Particle::is_active).collect::<Vec<_>>()
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(run(11), run(11));
}

#[test]
fn test_registry_consistency() {
    let mut store = EmitterStore::with_key();
    let handles: Vec<_> = (0..6)
        .map(|_| store.insert(Emitter::with_seed(EmitterConfig::default(), 8).unwrap()))
        .collect();
    let mut system = ParticleSystem::new().unwrap();

    for &handle in &handles {
        assert!(system.register(handle).unwrap());
    }
    assert!(!system.register(handles[2]).unwrap());
    assert_eq!(system.len(), 6);

    assert!(system.deregister(handles[0]));
    assert!(system.deregister(handles[4]));
    assert_eq!(system.len(), 4);

    let before = system.handles().to_vec();
    assert!(!system.deregister(handles[0]));
    assert_eq!(system.handles(), before.as_slice());

    for handle in &handles {
        let expected = ![handles[0], handles[4]].contains(handle);
        assert_eq!(system.contains(*handle), expected);
    }

    // The registry never owns its emitters.
    drop(system);
    assert_eq!(store.len(), 6);
}

#[test]
fn test_broadcast_reaches_every_emitter() {
    let mut store = EmitterStore::with_key();
    let mut system = ParticleSystem::new().unwrap();
    for seed in 0..3 {
        let handle = store.insert(Emitter::with_seed(long_lived(10, 5.0), seed).unwrap());
        system.register(handle).unwrap();
    }

    let target = Vec2::new(100.0, 50.0);
    system.set_origin(&mut store, target);
    system.start(&mut store);

    assert_eq!(system.update(&mut store, 1.0), 15);
    for &handle in system.handles() {
        assert_eq!(store[handle].config().origin, target);
        assert!(store[handle].is_emitting());
    }
}

#[test]
fn test_fade_endpoints() {
    let pairs = [
        (Color::new(0, 20, 255, 255), Color::new(0, 150, 100, 0)),
        (Color::new(244, 20, 0, 255), Color::new(244, 20, 0, 0)),
        (Color::BLACK, Color::WHITE),
        (Color::new(125, 125, 125, 30), Color::new(125, 125, 125, 10)),
    ];

    for (start, end) in pairs {
        assert_eq!(linear_fade(start, end, 0.0), start);
        assert_eq!(linear_fade(start, end, 1.0), end);
    }
}
