//! 粒子发射调度模块
//!
//! 决定每一帧该向粒子容器发射多少粒子，不涉及渲染与模拟。
//!
//! ## 架构设计
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  Emission Scheduler                      │
//! ├─────────────────────────────────────────────────────────┤
//! │  1. Lifecycle                                            │
//! │     - 延迟、持续时间、循环、结束后销毁                      │
//! │                                                          │
//! │  2. Burst                                                │
//! │     - 每个周期开始时一次性发射                             │
//! │                                                          │
//! │  3. Distance                                             │
//! │     - 按世界空间移动距离累积发射，跨周期连续               │
//! │                                                          │
//! │  4. Rate                                                 │
//! │     - rate(progress) * run_time 作为本周期目标数           │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 使用示例
//!
//! ```ignore
//! let config = EmitterConfig::default()
//!     .with_duration(2.0)
//!     .with_burst(20.0)
//!     .with_rate_curve(RateCurve::Linear { start: 50.0, end: 0.0 });
//!
//! let mut pool = ParticlePool::new(1_000, 1.5);
//! let mut scheduler = EmissionScheduler::new(config);
//! let mut attachment = scheduler.attach_scoped(&mut pool)?;
//! attachment.tick(&FrameContext::new(1.0 / 60.0));
//! ```

pub mod curve;
pub mod distance;
pub mod lifecycle;
pub mod pool;
pub mod random;
pub mod scheduler;
pub mod sink;
pub mod strategy;
pub mod systems;

#[cfg(test)]
mod test_support;

pub use curve::RateCurve;
pub use distance::DistanceAccumulator;
pub use lifecycle::{EmitterConfig, DISTANCE_UNIT};
pub use pool::{ParticlePool, PoolStats, PooledParticle};
pub use random::{RandomSource, SeededRandom, ThreadRandom};
pub use scheduler::{Attachment, CycleState, EmissionScheduler, FrameContext, TickReport, TickStatus};
pub use sink::{EmissionKind, EmitContext, ParticleSink, SubscriptionId};
pub use strategy::{DefaultStrategy, EmissionStrategy, JitteredStrategy};
pub use systems::{
    build_emission_schedule, emitter_activation_system, emitter_tick_system,
    init_emission_resources, particle_pool_update_system, EditorPreview, EmitterPosition,
    FrameTime, ParticleEmitter,
};
