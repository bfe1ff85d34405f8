//! # Emission Scheduler
//!
//! Frame-driven particle emission scheduling for bevy_ecs based engines.
//!
//! ## Features
//!
//! - **Lifecycle**: delay, duration, looping, destroy-on-end, editor preview restart
//! - **Burst**: one batch per cycle, stopping early when the sink is full
//! - **Rate**: time-varying rate curves evaluated against normalized cycle progress
//! - **Distance**: world-space movement accumulation, continuous across cycles
//! - **ECS**: component and systems driving emitters once per frame
//!
//! ## Architecture Design
//!
//! - **Scheduler**: pure state machine deciding how many particles to emit
//! - **Sink**: capacity-bounded collaborator that owns the particles
//! - **System**: ECS systems attaching, aging and ticking emitters
//!
//! ### Example
//!
//! ```ignore
//! use emission_scheduler::particles::{EmitterConfig, ParticleEmitter};
//!
//! let settings = EmissionSettings::load_or_default();
//! world.spawn(ParticleEmitter::from_settings(EmitterConfig::one_shot(32.0), &settings));
//! ```
//!
//! ## Modules
//!
//! - [`core`]: errors, logging bootstrap, macros
//! - [`config`]: settings files and environment overrides
//! - [`particles`]: emission scheduler, sinks and ECS integration

/// Core infrastructure: error types, logging and helper macros
pub mod core;
/// Configuration system
pub mod config;
/// Particle emission scheduling
pub mod particles;
