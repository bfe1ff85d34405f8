//! 发射形状策略
//!
//! 爆发数量与瞬时速率的唯一扩展点，默认实现直接读取配置。

use crate::particles::lifecycle::EmitterConfig;
use crate::particles::scheduler::CycleState;

/// 发射策略
pub trait EmissionStrategy: Send + Sync {
    /// 本周期的爆发数量
    fn burst_count(&self, config: &EmitterConfig, _cycle: &CycleState) -> f32 {
        config.burst_count
    }

    /// 给定归一化进度下的瞬时速率（粒子/秒）
    fn rate_count(&self, config: &EmitterConfig, _cycle: &CycleState, progress: f32) -> f32 {
        config.rate_curve.sample(progress)
    }
}

/// 默认策略
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultStrategy;

impl EmissionStrategy for DefaultStrategy {}

/// 按周期随机值在 `[1 - spread, 1 + spread]` 范围内缩放爆发与速率
#[derive(Debug, Clone, Copy)]
pub struct JitteredStrategy {
    /// 爆发数量的相对抖动
    pub burst_spread: f32,
    /// 速率的相对抖动
    pub rate_spread: f32,
}

impl JitteredStrategy {
    pub fn new(burst_spread: f32, rate_spread: f32) -> Self {
        Self {
            burst_spread: burst_spread.clamp(0.0, 1.0),
            rate_spread: rate_spread.clamp(0.0, 1.0),
        }
    }

    fn scale(spread: f32, cycle_random: f32) -> f32 {
        1.0 - spread + 2.0 * spread * cycle_random
    }
}

impl EmissionStrategy for JitteredStrategy {
    fn burst_count(&self, config: &EmitterConfig, cycle: &CycleState) -> f32 {
        (config.burst_count * Self::scale(self.burst_spread, cycle.cycle_random())).round()
    }

    fn rate_count(&self, config: &EmitterConfig, cycle: &CycleState, progress: f32) -> f32 {
        config.rate_curve.sample(progress) * Self::scale(self.rate_spread, cycle.cycle_random())
    }
}
