//! 发射调度器
//!
//! 每帧根据生命周期配置决定爆发、按距离与按速率的发射数量，
//! 并逐个交给粒子容器。
//!
//! ## 单帧流程
//!
//! ```text
//! 冻结检查 → 推进时钟 → 延迟窗口 → 周期结束/循环重置
//!          → 爆发 → 距离发射 → 速率发射
//! ```

use std::fmt;

use glam::Vec3;

use crate::core::error::{EmissionError, EmissionResult};
use crate::particles::distance::DistanceAccumulator;
use crate::particles::lifecycle::EmitterConfig;
use crate::particles::random::{sanitize_unit, RandomSource, ThreadRandom};
use crate::particles::sink::{EmissionKind, EmitContext, ParticleSink, SubscriptionId};
use crate::particles::strategy::{DefaultStrategy, EmissionStrategy};

/// 宿主每帧提供的输入
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// 帧时间增量（秒）
    pub delta: f32,
    /// 发射器当前世界位置
    pub world_position: Option<Vec3>,
    /// 是否处于交互式编辑会话
    pub interactive_preview: bool,
}

impl FrameContext {
    pub fn new(delta: f32) -> Self {
        Self {
            delta,
            world_position: None,
            interactive_preview: false,
        }
    }

    /// 附带世界位置采样
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.world_position = Some(position);
        self
    }

    /// 设置交互式预览能力
    pub fn with_interactive_preview(mut self, interactive: bool) -> Self {
        self.interactive_preview = interactive;
        self
    }
}

/// 单个周期的计时状态
#[derive(Debug, Clone, PartialEq)]
pub struct CycleState {
    elapsed: f32,
    emitted_count: u64,
    burst_pending: bool,
    cycle_random: f32,
}

impl Default for CycleState {
    fn default() -> Self {
        Self {
            elapsed: 0.0,
            emitted_count: 0,
            burst_pending: true,
            cycle_random: 0.0,
        }
    }
}

impl CycleState {
    #[cfg(test)]
    pub(crate) fn with_random(cycle_random: f32) -> Self {
        Self {
            cycle_random,
            ..Default::default()
        }
    }

    /// 周期开始以来的时间（含延迟）
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// 本周期已按速率发射的数量
    pub fn emitted_count(&self) -> u64 {
        self.emitted_count
    }

    /// 本周期的爆发是否尚未触发
    pub fn burst_pending(&self) -> bool {
        self.burst_pending
    }

    /// 本周期的随机值
    pub fn cycle_random(&self) -> f32 {
        self.cycle_random
    }
}

/// 单帧结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// 未挂载、容器不可用或被挂起，状态未变
    Frozen,
    /// 仍在延迟窗口内
    Delayed,
    /// 正常发射
    Emitting,
    /// 循环周期结束并已重置，下一帧开始发射
    Restarted,
    /// 非循环周期已结束
    Finished,
    /// 交互式预览下结束的周期被重置
    PreviewRestarted,
    /// 周期结束且粒子耗尽，宿主应销毁发射器
    DespawnRequested,
}

/// 单帧发射统计
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub status: TickStatus,
    pub burst_emitted: u64,
    pub distance_emitted: u64,
    pub rate_emitted: u64,
}

impl TickReport {
    fn new(status: TickStatus) -> Self {
        Self {
            status,
            burst_emitted: 0,
            distance_emitted: 0,
            rate_emitted: 0,
        }
    }

    /// 本帧总发射数
    pub fn total_emitted(&self) -> u64 {
        self.burst_emitted + self.distance_emitted + self.rate_emitted
    }
}

/// 发射调度器
///
/// 每个发射器一个实例，同一时刻最多挂载到一个粒子容器。
pub struct EmissionScheduler {
    config: EmitterConfig,
    cycle: CycleState,
    distance: DistanceAccumulator,
    strategy: Box<dyn EmissionStrategy>,
    random: Box<dyn RandomSource>,
    subscription: Option<SubscriptionId>,
    suspended: bool,
    stop_looping: bool,
    finished: bool,
}

impl EmissionScheduler {
    pub fn new(config: EmitterConfig) -> Self {
        Self {
            config,
            cycle: CycleState::default(),
            distance: DistanceAccumulator::new(),
            strategy: Box::new(DefaultStrategy),
            random: Box::new(ThreadRandom),
            subscription: None,
            suspended: false,
            stop_looping: false,
            finished: false,
        }
    }

    /// 替换发射策略
    pub fn with_strategy(mut self, strategy: impl EmissionStrategy + 'static) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    /// 替换随机数来源
    pub fn with_random(mut self, random: impl RandomSource + 'static) -> Self {
        self.random = Box::new(random);
        self
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// 修改配置，下一帧生效
    pub fn config_mut(&mut self) -> &mut EmitterConfig {
        &mut self.config
    }

    pub fn cycle(&self) -> &CycleState {
        &self.cycle
    }

    pub fn distance(&self) -> &DistanceAccumulator {
        &self.distance
    }

    pub fn subscription(&self) -> Option<SubscriptionId> {
        self.subscription
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// 挂起：后续帧完全冻结，时钟不前进
    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    /// 恢复：从挂起时的状态继续
    pub fn resume(&mut self) {
        self.suspended = false;
    }

    /// 停止循环：当前周期照常进行，结束后不再重置
    pub fn stop_looping(&mut self) {
        if !self.stop_looping {
            tracing::debug!(target: "emission", "Looping stopped by host");
        }
        self.stop_looping = true;
    }

    /// 考虑停止循环信号后的实际循环状态
    pub fn is_looping(&self) -> bool {
        self.config.looping && !self.stop_looping
    }

    /// 最近一帧是否进入了非循环结束分支
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// 挂载到粒子容器
    ///
    /// 订阅每帧通知、重置周期并清除距离基准点。容器无效时返回
    /// `SinkUnavailable`，调度器状态保持不变，由宿主负责上报。
    pub fn attach<S>(&mut self, sink: &mut S) -> EmissionResult<SubscriptionId>
    where
        S: ParticleSink + ?Sized,
    {
        if self.subscription.is_some() {
            return Err(EmissionError::AlreadyAttached);
        }
        if !sink.is_valid() {
            return Err(EmissionError::SinkUnavailable);
        }

        let id = sink.subscribe();
        self.subscription = Some(id);
        self.reset_cycle();
        self.distance.reset_baseline();

        tracing::debug!(target: "emission", "Emitter attached with subscription {}", id.0);
        Ok(id)
    }

    /// 从粒子容器卸载，保留已累积的距离
    pub fn detach<S>(&mut self, sink: &mut S) -> EmissionResult<SubscriptionId>
    where
        S: ParticleSink + ?Sized,
    {
        let id = self.subscription.take().ok_or(EmissionError::NotAttached)?;
        sink.unsubscribe(id);

        tracing::debug!(target: "emission", "Emitter detached from subscription {}", id.0);
        Ok(id)
    }

    /// 作用域挂载：返回的守卫在析构时自动卸载
    pub fn attach_scoped<'a, S>(&'a mut self, sink: &'a mut S) -> EmissionResult<Attachment<'a, S>>
    where
        S: ParticleSink + ?Sized,
    {
        self.attach(sink)?;
        Ok(Attachment {
            scheduler: self,
            sink,
        })
    }

    /// 开始新周期，不触碰距离累积
    pub fn reset_cycle(&mut self) {
        self.cycle = CycleState {
            elapsed: 0.0,
            emitted_count: 0,
            burst_pending: true,
            cycle_random: sanitize_unit(self.random.next_unit()),
        };
        self.finished = false;
    }

    fn delay(&self) -> f32 {
        if self.config.delay.is_finite() {
            self.config.delay.max(0.0)
        } else {
            0.0
        }
    }

    /// 延迟结束以来的运行时间，延迟窗口内为负
    pub fn run_time(&self) -> f32 {
        self.cycle.elapsed - self.delay()
    }

    /// 归一化周期进度 `[0, 1]`
    ///
    /// 持续时间非正或 NaN 时视为已走完；无限持续时间的进度恒为 0。
    pub fn progress(&self) -> f32 {
        let duration = self.config.duration;
        if duration > 0.0 {
            (self.run_time() / duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// 爆发已触发且周期时间已走完
    pub fn is_cycle_finished(&self) -> bool {
        if self.cycle.burst_pending {
            return false;
        }
        let duration = self.config.duration;
        if duration > 0.0 {
            self.cycle.elapsed > duration + self.delay()
        } else {
            self.run_time() >= 0.0
        }
    }

    /// 供宿主做临时特效回收的活跃查询
    ///
    /// 挂起时为 `false`；否则只有非循环周期真正结束且容器已不可用时才为 `false`。
    pub fn is_active<S>(&self, sink: Option<&S>) -> bool
    where
        S: ParticleSink + ?Sized,
    {
        if self.suspended {
            return false;
        }
        let sink_gone = sink.map_or(true, |s| !s.is_valid());
        let concluded = !self.is_looping()
            && !self.cycle.burst_pending
            && self.run_time() >= 0.0
            && self.is_cycle_finished()
            && sink_gone;
        !concluded
    }

    /// 推进一帧
    pub fn tick<S>(&mut self, frame: &FrameContext, sink: &mut S) -> TickReport
    where
        S: ParticleSink + ?Sized,
    {
        if self.subscription.is_none() || self.suspended || !sink.is_valid() || !sink.is_active() {
            return TickReport::new(TickStatus::Frozen);
        }

        let delta = if frame.delta.is_finite() {
            frame.delta.max(0.0)
        } else {
            0.0
        };
        self.cycle.elapsed += delta;

        let run_time = self.run_time();
        if run_time < 0.0 {
            return TickReport::new(TickStatus::Delayed);
        }

        if self.is_cycle_finished() {
            if self.is_looping() {
                self.reset_cycle();
                tracing::debug!(target: "emission", "Cycle restarted (random: {:.3})", self.cycle.cycle_random);
                return TickReport::new(TickStatus::Restarted);
            }
            return self.finish(frame, sink);
        }

        let mut report = TickReport::new(TickStatus::Emitting);
        let position = frame.world_position;

        if self.cycle.burst_pending {
            self.cycle.burst_pending = false;
            report.burst_emitted = self.emit_burst(position, sink);
        }

        if let Some(threshold) = self.config.distance_threshold() {
            if let Some(sample) = position {
                report.distance_emitted = self.emit_distance(sample, threshold, sink);
            }
        }

        report.rate_emitted = self.emit_rate(run_time, position, sink);

        tracing::trace!(
            target: "emission",
            "Tick emitted burst={} distance={} rate={} (elapsed {:.3})",
            report.burst_emitted,
            report.distance_emitted,
            report.rate_emitted,
            self.cycle.elapsed
        );
        report
    }

    fn finish<S>(&mut self, frame: &FrameContext, sink: &mut S) -> TickReport
    where
        S: ParticleSink + ?Sized,
    {
        if !self.finished {
            self.finished = true;
            tracing::debug!(target: "emission", "Emission cycle finished");
        }

        let drained = sink.particle_count() == 0;
        let status = if frame.interactive_preview {
            if drained {
                self.reset_cycle();
                tracing::debug!(target: "emission", "Preview cycle restarted");
                TickStatus::PreviewRestarted
            } else {
                TickStatus::Finished
            }
        } else if self.config.destroy_on_end && drained {
            TickStatus::DespawnRequested
        } else {
            TickStatus::Finished
        };
        TickReport::new(status)
    }

    fn context(&self, kind: EmissionKind, progress: f32, position: Option<Vec3>) -> EmitContext {
        EmitContext {
            kind,
            progress,
            cycle_random: self.cycle.cycle_random,
            position,
        }
    }

    fn emit_burst<S>(&mut self, position: Option<Vec3>, sink: &mut S) -> u64
    where
        S: ParticleSink + ?Sized,
    {
        let count = self.strategy.burst_count(&self.config, &self.cycle);
        if !count.is_finite() || count <= 0.0 {
            return 0;
        }

        // 计数用整数、比较用 f64，超过 f32 精确整数范围后仍严格递增
        let count = f64::from(count);
        let mut index: u64 = 0;
        while (index as f64) < count && !sink.is_full() {
            let progress = (index as f64 / count) as f32;
            let context = self.context(EmissionKind::Burst, progress, position);
            sink.emit_one(&context);
            index += 1;
        }
        index
    }

    fn emit_distance<S>(&mut self, sample: Vec3, threshold: f32, sink: &mut S) -> u64
    where
        S: ParticleSink + ?Sized,
    {
        self.distance.sample(sample);

        let progress = self.progress();
        let mut emitted = 0;
        while !sink.is_full() && self.distance.try_consume(threshold) {
            let context = self.context(EmissionKind::Distance, progress, Some(sample));
            sink.emit_one(&context);
            emitted += 1;
        }
        emitted
    }

    fn emit_rate<S>(&mut self, run_time: f32, position: Option<Vec3>, sink: &mut S) -> u64
    where
        S: ParticleSink + ?Sized,
    {
        let progress = self.progress();
        let rate = self.strategy.rate_count(&self.config, &self.cycle, progress);
        let target = f64::from(rate) * f64::from(run_time);
        let target = if target.is_finite() {
            target
        } else {
            tracing::trace!(target: "emission", "Non-finite rate target ignored");
            0.0
        };

        let mut emitted = 0;
        while !sink.is_full() && (self.cycle.emitted_count as f64) < target {
            self.cycle.emitted_count += 1;
            let context = self.context(EmissionKind::Rate, progress, position);
            sink.emit_one(&context);
            emitted += 1;
        }
        emitted
    }
}

impl fmt::Debug for EmissionScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmissionScheduler")
            .field("config", &self.config)
            .field("cycle", &self.cycle)
            .field("distance", &self.distance)
            .field("subscription", &self.subscription)
            .field("suspended", &self.suspended)
            .field("stop_looping", &self.stop_looping)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

/// 作用域挂载守卫
///
/// 持有调度器与容器的可变借用，析构时（包括展开路径）自动卸载。
pub struct Attachment<'a, S: ParticleSink + ?Sized> {
    scheduler: &'a mut EmissionScheduler,
    sink: &'a mut S,
}

impl<'a, S: ParticleSink + ?Sized> Attachment<'a, S> {
    pub fn tick(&mut self, frame: &FrameContext) -> TickReport {
        self.scheduler.tick(frame, &mut *self.sink)
    }

    pub fn is_active(&self) -> bool {
        self.scheduler.is_active(Some(&*self.sink))
    }

    pub fn scheduler(&self) -> &EmissionScheduler {
        &*self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut EmissionScheduler {
        &mut *self.scheduler
    }

    pub fn sink(&self) -> &S {
        &*self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut *self.sink
    }
}

impl<'a, S: ParticleSink + ?Sized> Drop for Attachment<'a, S> {
    fn drop(&mut self) {
        if let Err(e) = self.scheduler.detach(&mut *self.sink) {
            tracing::trace!(target: "emission", "Scoped detach skipped: {}", e);
        }
    }
}
