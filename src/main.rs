use bevy_ecs::prelude::*;
use glam::Vec3;

use emission_scheduler::config::EmissionSettings;
use emission_scheduler::core::init_logging;
use emission_scheduler::particles::{
    build_emission_schedule, init_emission_resources, EmissionScheduler, EmitterConfig,
    EmitterPosition, FrameTime, JitteredStrategy, ParticleEmitter, ParticlePool, RateCurve,
};

const FRAME_DELTA: f32 = 1.0 / 60.0;
const FRAMES: usize = 600;

fn main() {
    let mut settings = EmissionSettings::load_or_default();
    settings.apply_env_overrides();

    if let Err(e) = init_logging(&settings.logging) {
        eprintln!("Logging unavailable: {}", e);
    }
    if let Err(e) = settings.validate() {
        tracing::error!(target: "emission", "Invalid settings: {}", e);
        std::process::exit(1);
    }

    let mut world = World::new();
    init_emission_resources(&mut world, &settings);
    world.resource_mut::<FrameTime>().delta_seconds = FRAME_DELTA;

    let trail = EmitterConfig::default()
        .with_duration(2.0)
        .with_burst(8.0)
        .with_rate_curve(RateCurve::Linear { start: 40.0, end: 5.0 })
        .with_rate_over_distance(25.0);
    let trail = world
        .spawn((
            ParticleEmitter::new(
                EmissionScheduler::new(trail).with_strategy(JitteredStrategy::new(0.25, 0.1)),
                ParticlePool::from_config(&settings.pool),
            ),
            EmitterPosition(Vec3::ZERO),
        ))
        .id();

    let explosion = EmitterConfig::one_shot(120.0)
        .with_delay(0.5)
        .with_destroy_on_end(true);
    let explosion = world
        .spawn(ParticleEmitter::from_settings(explosion, &settings))
        .id();

    let mut schedule = build_emission_schedule();
    for frame in 0..FRAMES {
        if let Some(mut position) = world.get_mut::<EmitterPosition>(trail) {
            let t = frame as f32 * FRAME_DELTA;
            position.0 = Vec3::new(t.cos() * 50.0, 0.0, t.sin() * 50.0);
        }
        schedule.run(&mut world);
    }

    if let Some(emitter) = world.get::<ParticleEmitter>(trail) {
        let stats = emitter.pool.stats();
        tracing::info!(
            target: "emission",
            "Trail emitter: {} emitted, {} rejected, {} alive",
            stats.total_emitted,
            stats.rejected,
            emitter.pool.particles().len()
        );
    }
    if world.get_entity(explosion).is_none() {
        tracing::info!(target: "emission", "One-shot emitter finished and despawned");
    }
}
