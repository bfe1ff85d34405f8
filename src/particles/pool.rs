//! 容量受限的粒子池
//!
//! `ParticleSink` 的默认实现：只做容量与寿命记账，不做物理模拟。

use glam::Vec3;

use crate::config::PoolConfig;
use crate::particles::sink::{EmissionKind, EmitContext, ParticleSink, SubscriptionId};

/// 池中的单个粒子
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PooledParticle {
    /// 出生位置
    pub position: Vec3,
    /// 当前年龄（秒）
    pub age: f32,
    /// 寿命（秒）
    pub lifetime: f32,
    /// 发射来源
    pub kind: EmissionKind,
    /// 发射时的进度
    pub progress: f32,
    /// 发射时的周期随机值
    pub cycle_random: f32,
}

impl PooledParticle {
    pub fn is_alive(&self) -> bool {
        self.age < self.lifetime
    }
}

/// 粒子池统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    /// 总发射数
    pub total_emitted: u64,
    /// 本帧发射数
    pub frame_emitted: u32,
    /// 因容量已满被拒绝的发射数
    pub rejected: u64,
}

/// 粒子池
#[derive(Debug, Clone)]
pub struct ParticlePool {
    capacity: usize,
    particle_lifetime: f32,
    particles: Vec<PooledParticle>,
    valid: bool,
    active: bool,
    subscribers: Vec<SubscriptionId>,
    next_subscription: u64,
    stats: PoolStats,
}

impl ParticlePool {
    /// 创建粒子池
    pub fn new(capacity: usize, particle_lifetime: f32) -> Self {
        Self {
            capacity,
            particle_lifetime,
            particles: Vec::with_capacity(capacity.min(4096)),
            valid: true,
            active: true,
            subscribers: Vec::new(),
            next_subscription: 0,
            stats: PoolStats::default(),
        }
    }

    /// 按全局池配置创建
    pub fn from_config(config: &PoolConfig) -> Self {
        Self::new(config.max_particles, config.particle_lifetime)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn particles(&self) -> &[PooledParticle] {
        &self.particles
    }

    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    pub fn subscribers(&self) -> &[SubscriptionId] {
        &self.subscribers
    }

    /// 是否有调度器订阅了每帧通知
    pub fn has_subscribers(&self) -> bool {
        !self.subscribers.is_empty()
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// 标记为失效（宿主销毁容器）
    pub fn invalidate(&mut self) {
        self.valid = false;
        self.particles.clear();
    }

    /// 推进粒子年龄并回收死亡粒子，返回回收数量
    pub fn advance(&mut self, delta: f32) -> usize {
        self.stats.frame_emitted = 0;
        if !delta.is_finite() || delta <= 0.0 {
            return 0;
        }

        let before = self.particles.len();
        for particle in &mut self.particles {
            particle.age += delta;
        }
        self.particles.retain(PooledParticle::is_alive);
        before - self.particles.len()
    }

    /// 立即清空所有粒子
    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

impl Default for ParticlePool {
    fn default() -> Self {
        Self::from_config(&PoolConfig::default())
    }
}

impl ParticleSink for ParticlePool {
    fn is_full(&self) -> bool {
        self.particles.len() >= self.capacity
    }

    fn is_valid(&self) -> bool {
        self.valid
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn particle_count(&self) -> usize {
        self.particles.len()
    }

    fn emit_one(&mut self, context: &EmitContext) {
        if !self.valid || self.is_full() {
            self.stats.rejected += 1;
            tracing::trace!(target: "emission.pool", "Emission rejected: pool full or invalid");
            return;
        }

        self.particles.push(PooledParticle {
            position: context.position.unwrap_or(Vec3::ZERO),
            age: 0.0,
            lifetime: self.particle_lifetime,
            kind: context.kind,
            progress: context.progress,
            cycle_random: context.cycle_random,
        });
        self.stats.total_emitted += 1;
        self.stats.frame_emitted += 1;
    }

    fn subscribe(&mut self) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.subscribers.push(id);
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|s| *s != id);
    }
}
