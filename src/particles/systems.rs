//! ECS 集成
//!
//! 发射器组件把调度器与其粒子池绑在一起，由三个串行系统驱动：
//! 挂载/卸载 → 粒子池老化 → 调度 tick。

use bevy_ecs::prelude::*;
use glam::Vec3;

use crate::config::EmissionSettings;
use crate::particles::lifecycle::EmitterConfig;
use crate::particles::pool::ParticlePool;
use crate::particles::scheduler::{EmissionScheduler, FrameContext, TickStatus};

/// 帧时间
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct FrameTime {
    pub delta_seconds: f32,
}

/// 交互式编辑会话标记
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct EditorPreview {
    pub interactive: bool,
}

/// 发射器世界位置
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct EmitterPosition(pub Vec3);

/// 粒子发射器组件
#[derive(Component, Debug)]
pub struct ParticleEmitter {
    /// 调度器
    pub scheduler: EmissionScheduler,
    /// 粒子池
    pub pool: ParticlePool,
    /// 是否启用（下一帧由激活系统挂载或卸载）
    pub enabled: bool,
}

impl ParticleEmitter {
    pub fn new(scheduler: EmissionScheduler, pool: ParticlePool) -> Self {
        Self {
            scheduler,
            pool,
            enabled: true,
        }
    }

    /// 使用全局设置中的默认粒子池
    pub fn from_settings(config: EmitterConfig, settings: &EmissionSettings) -> Self {
        Self::new(
            EmissionScheduler::new(config),
            ParticlePool::from_config(&settings.pool),
        )
    }

    pub fn is_active(&self) -> bool {
        self.scheduler.is_active(Some(&self.pool))
    }
}

impl Drop for ParticleEmitter {
    fn drop(&mut self) {
        if self.scheduler.is_attached() {
            if let Err(e) = self.scheduler.detach(&mut self.pool) {
                tracing::trace!(target: "emission", "Detach on drop skipped: {}", e);
            }
        }
    }
}

/// 插入发射系统所需的资源
pub fn init_emission_resources(world: &mut World, settings: &EmissionSettings) {
    world.insert_resource(FrameTime::default());
    world.insert_resource(EditorPreview {
        interactive: settings.preview.interactive,
    });
}

/// 根据 `enabled` 挂载或卸载发射器
pub fn emitter_activation_system(mut emitters: Query<(Entity, &mut ParticleEmitter)>) {
    for (entity, mut emitter) in emitters.iter_mut() {
        let emitter = &mut *emitter;
        match (emitter.enabled, emitter.scheduler.is_attached()) {
            (true, false) => {
                if let Err(e) = emitter.scheduler.attach(&mut emitter.pool) {
                    tracing::warn!(target: "emission", "Failed to attach emitter {:?}: {}", entity, e);
                }
            }
            (false, true) => {
                if let Err(e) = emitter.scheduler.detach(&mut emitter.pool) {
                    tracing::warn!(target: "emission", "Failed to detach emitter {:?}: {}", entity, e);
                }
            }
            _ => {}
        }
    }
}

/// 粒子池老化
pub fn particle_pool_update_system(time: Res<FrameTime>, mut emitters: Query<&mut ParticleEmitter>) {
    let delta = time.delta_seconds;
    for mut emitter in emitters.iter_mut() {
        emitter.pool.advance(delta);
    }
}

/// 调度 tick，只驱动已订阅每帧通知的发射器
pub fn emitter_tick_system(
    mut commands: Commands,
    time: Res<FrameTime>,
    preview: Option<Res<EditorPreview>>,
    mut emitters: Query<(Entity, Option<&EmitterPosition>, &mut ParticleEmitter)>,
) {
    let interactive = preview.map_or(false, |p| p.interactive);

    for (entity, position, mut emitter) in emitters.iter_mut() {
        if !emitter.pool.has_subscribers() {
            continue;
        }

        let mut frame = FrameContext::new(time.delta_seconds).with_interactive_preview(interactive);
        if let Some(position) = position {
            frame = frame.with_position(position.0);
        }

        let emitter = &mut *emitter;
        let report = emitter.scheduler.tick(&frame, &mut emitter.pool);
        if report.status == TickStatus::DespawnRequested {
            tracing::debug!(target: "emission", "Despawning finished emitter {:?}", entity);
            commands.entity(entity).despawn();
        }
    }
}

/// 创建发射调度器的系统调度
pub fn build_emission_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            emitter_activation_system,
            particle_pool_update_system,
            emitter_tick_system,
        )
            .chain(),
    );
    schedule
}
