//! 测试辅助：记录型容器与可控随机数

use crate::particles::random::RandomSource;
use crate::particles::sink::{EmissionKind, EmitContext, ParticleSink, SubscriptionId};

/// 记录每次发射的容器
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub capacity: Option<usize>,
    pub emitted: Vec<EmitContext>,
    pub valid: bool,
    pub active: bool,
    /// 模拟存活粒子数，测试可直接改写以模拟耗尽
    pub alive: usize,
    pub subscriptions: Vec<SubscriptionId>,
    next_id: u64,
}

impl RecordingSink {
    pub fn unbounded() -> Self {
        Self {
            valid: true,
            active: true,
            ..Default::default()
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::unbounded()
        }
    }

    pub fn count_of(&self, kind: EmissionKind) -> usize {
        self.emitted.iter().filter(|c| c.kind == kind).count()
    }
}

impl ParticleSink for RecordingSink {
    fn is_full(&self) -> bool {
        self.capacity.map_or(false, |c| self.emitted.len() >= c)
    }

    fn is_valid(&self) -> bool {
        self.valid
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn particle_count(&self) -> usize {
        self.alive
    }

    fn emit_one(&mut self, context: &EmitContext) {
        assert!(!self.is_full(), "emit_one called on a full sink");
        self.emitted.push(*context);
        self.alive += 1;
    }

    fn subscribe(&mut self) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscriptions.push(id);
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscriptions.retain(|s| *s != id);
    }
}

/// 只计数不记录的容器，用于大批量发射
#[derive(Debug, Default)]
pub struct CountingSink {
    pub capacity: u64,
    pub emitted: u64,
    pub subscribed: bool,
}

impl CountingSink {
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }
}

impl ParticleSink for CountingSink {
    fn is_full(&self) -> bool {
        self.emitted >= self.capacity
    }

    fn is_valid(&self) -> bool {
        true
    }

    fn is_active(&self) -> bool {
        true
    }

    fn particle_count(&self) -> usize {
        self.emitted as usize
    }

    fn emit_one(&mut self, _context: &EmitContext) {
        self.emitted += 1;
    }

    fn subscribe(&mut self) -> SubscriptionId {
        self.subscribed = true;
        SubscriptionId(1)
    }

    fn unsubscribe(&mut self, _id: SubscriptionId) {
        self.subscribed = false;
    }
}

/// 按给定序列循环返回的随机数
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f32>,
    index: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, index: 0 }
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value
    }
}
