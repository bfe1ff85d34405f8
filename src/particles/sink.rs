//! 粒子容器协作接口
//!
//! 调度器只决定"何时、发射多少"，粒子的实际表示与容量记账由容器负责。

use glam::Vec3;

/// 每帧通知通道的订阅句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// 本次发射的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmissionKind {
    /// 周期开始时的爆发
    Burst,
    /// 按移动距离累积
    Distance,
    /// 按时间速率
    Rate,
}

/// 单次发射上下文，供容器初始化新粒子
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmitContext {
    /// 发射来源
    pub kind: EmissionKind,
    /// 爆发时为 `index / burst_count`，其余为归一化周期进度
    pub progress: f32,
    /// 当前周期的随机值
    pub cycle_random: f32,
    /// 发射器当前世界位置（若宿主提供）
    pub position: Option<Vec3>,
}

/// 容量受限的粒子容器
pub trait ParticleSink {
    /// 容器是否已满
    fn is_full(&self) -> bool;

    /// 容器是否仍然有效（未被宿主销毁）
    fn is_valid(&self) -> bool;

    /// 容器是否处于激活状态
    fn is_active(&self) -> bool;

    /// 当前存活粒子数
    fn particle_count(&self) -> usize;

    /// 发射一个粒子
    fn emit_one(&mut self, context: &EmitContext);

    /// 订阅每帧通知
    fn subscribe(&mut self) -> SubscriptionId;

    /// 取消订阅
    fn unsubscribe(&mut self, id: SubscriptionId);
}
