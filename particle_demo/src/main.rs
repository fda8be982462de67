//! Headless particle demo
//!
//! Runs the fountain, swirl and flame effects (plus an optional effect file)
//! for a few simulated seconds each, moving the emitters along a circle the
//! way a mouse pointer would, and logs what a renderer would have drawn.
//!
//! Usage: `particle_demo [engine.toml|engine.ron] [effect.toml|effect.ron]`

use particle_engine::foundation::logging;
use particle_engine::prelude::*;
use std::f32::consts::TAU;

const SCREEN_WIDTH: f32 = 1000.0;
const SCREEN_HEIGHT: f32 = 800.0;
const FRAME_TIME: f32 = 1.0 / 60.0;
const SECONDS_PER_EFFECT: u32 = 5;
const POINTER_RADIUS: f32 = 200.0;

struct Demo {
    config: EngineConfig,
    store: EmitterStore,
    recorder: CommandRecorder,
}

impl Demo {
    fn new(config: EngineConfig) -> Self {
        Self {
            config,
            store: EmitterStore::with_key(),
            recorder: CommandRecorder::with_capacity(4096),
        }
    }

    fn build(&mut self, effect: &EffectConfig) -> ParticleResult<ParticleSystem> {
        match self.config.seed {
            Some(seed) => effect.build_seeded(&mut self.store, seed),
            None => effect.build(&mut self.store),
        }
    }

    fn run_effect(&mut self, effect: &EffectConfig) -> ParticleResult<()> {
        log::info!("Running effect '{}' with {} emitters", effect.name, effect.emitters.len());
        let mut system = self.build(effect)?;
        system.start(&mut self.store);

        let mut timer = Timer::new().with_max_delta(self.config.max_delta_time);
        let frames = SECONDS_PER_EFFECT * 60;
        let mut next_burst = 1.0;

        for _ in 0..frames {
            let dt = timer.advance(FRAME_TIME);

            // Pointer circling the screen center, one lap every four seconds.
            let angle = timer.total_time() * TAU / 4.0;
            let pointer = Vec2::new(angle.cos(), angle.sin()) * POINTER_RADIUS;
            system.set_origin(&mut self.store, pointer);

            if timer.total_time() >= next_burst {
                let emitted = system.burst(&mut self.store);
                log::debug!("Burst emitted {} particles", emitted);
                next_burst += 1.0;
            }

            let updated = system.update(&mut self.store, dt);

            self.recorder.clear();
            system.draw(&self.store, &mut self.recorder);

            if timer.frame_count() % 60 == 0 {
                log::info!(
                    "[{}] t={:.1}s updated={} draws={} batches={}",
                    effect.name,
                    timer.total_time(),
                    updated,
                    self.recorder.len(),
                    self.recorder.batch_count()
                );
            }
        }

        system.stop(&mut self.store);
        for &handle in system.handles() {
            if let Some(emitter) = self.store.remove(handle) {
                let stats = emitter.stats();
                log::info!(
                    "[{}] emitter spawned {} + {} burst, peak {} of {}",
                    effect.name,
                    stats.spawned_total,
                    stats.burst_total,
                    stats.peak_active,
                    emitter.capacity()
                );
            }
        }

        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);

    let config = match args.next() {
        Some(path) => EngineConfig::load_from_file(path)?,
        None => EngineConfig::default(),
    };
    config.validate()?;
    logging::init_with_level(&config.log_level);

    log::info!("Starting particle demo");

    let view = ViewBoundsConfig::new(Vec2::zeros(), SCREEN_WIDTH, SCREEN_HEIGHT);
    let textures = PresetTextures::default();
    let mut effects = vec![
        presets::fountain(textures, view),
        presets::swirl(textures, view),
        presets::flame(textures, view),
    ];

    if let Some(path) = args.next() {
        let effect = EffectConfig::load_validated(&path)?;
        log::info!("Loaded effect '{}' from {}", effect.name, path);
        effects.push(effect);
    }

    let mut demo = Demo::new(config);
    for effect in &effects {
        demo.run_effect(effect)?;
    }

    log::info!("Particle demo finished");
    Ok(())
}
