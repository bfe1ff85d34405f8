//! 发射器生命周期配置

use crate::core::error::{EmissionError, EmissionResult};
use crate::particles::curve::RateCurve;

/// 每次距离发射对应的世界单位基数（`rate_over_distance` 以每 100 单位计）
pub const DISTANCE_UNIT: f32 = 100.0;

/// 发射器生命周期配置
///
/// 宿主可在挂载前后随时修改，但在一次 tick 内视为不可变。
#[derive(Clone, Debug)]
pub struct EmitterConfig {
    /// 是否循环
    pub looping: bool,
    /// 非循环周期结束且粒子耗尽后请求销毁宿主实体
    pub destroy_on_end: bool,
    /// 周期持续时间（秒，不含延迟）
    pub duration: f32,
    /// 周期开始前的延迟（秒）
    pub delay: f32,
    /// 每个周期开始时的爆发数量
    pub burst_count: f32,
    /// 随周期进度变化的发射速率（粒子/秒）
    pub rate_curve: RateCurve,
    /// 每移动 100 单位发射的粒子数
    pub rate_over_distance: f32,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            looping: true,
            destroy_on_end: false,
            duration: 5.0,
            delay: 0.0,
            burst_count: 0.0,
            rate_curve: RateCurve::default(),
            rate_over_distance: 0.0,
        }
    }
}

impl EmitterConfig {
    /// 一次性爆发配置：不循环，无持续速率
    pub fn one_shot(burst_count: f32) -> Self {
        Self {
            looping: false,
            duration: 1.0,
            burst_count,
            rate_curve: RateCurve::zero(),
            ..Default::default()
        }
    }

    /// 设置是否循环
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// 设置结束后是否销毁
    pub fn with_destroy_on_end(mut self, destroy: bool) -> Self {
        self.destroy_on_end = destroy;
        self
    }

    /// 设置持续时间
    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    /// 设置延迟
    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    /// 设置爆发数量
    pub fn with_burst(mut self, count: f32) -> Self {
        self.burst_count = count;
        self
    }

    /// 设置恒定速率
    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate_curve = RateCurve::Constant(rate);
        self
    }

    /// 设置速率曲线
    pub fn with_rate_curve(mut self, curve: RateCurve) -> Self {
        self.rate_curve = curve;
        self
    }

    /// 设置按距离发射速率
    pub fn with_rate_over_distance(mut self, rate: f32) -> Self {
        self.rate_over_distance = rate;
        self
    }

    /// 距离发射阈值：每累积这么多距离发射一个粒子
    ///
    /// `rate_over_distance` 非正或非有限时返回 `None`，表示关闭距离发射。
    pub fn distance_threshold(&self) -> Option<f32> {
        if self.rate_over_distance.is_finite() && self.rate_over_distance > 0.0 {
            Some(DISTANCE_UNIT / self.rate_over_distance)
        } else {
            None
        }
    }

    /// 周期结束时刻（含延迟）
    pub fn cycle_end(&self) -> f32 {
        self.duration + self.delay
    }

    /// 验证配置
    ///
    /// 调度器对所有这些情况都有防护，校验仅用于宿主提示。
    pub fn validate(&self) -> EmissionResult<()> {
        let fields = [
            ("duration", self.duration),
            ("delay", self.delay),
            ("burst_count", self.burst_count),
            ("rate_over_distance", self.rate_over_distance),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(EmissionError::InvalidConfig(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }

        if self.duration <= 0.0 {
            return Err(EmissionError::InvalidConfig(format!(
                "duration must be positive, got {}",
                self.duration
            )));
        }
        if self.delay < 0.0 {
            return Err(EmissionError::InvalidConfig(format!(
                "delay must not be negative, got {}",
                self.delay
            )));
        }
        if self.burst_count < 0.0 {
            return Err(EmissionError::InvalidConfig(format!(
                "burst_count must not be negative, got {}",
                self.burst_count
            )));
        }
        if self.rate_over_distance < 0.0 {
            return Err(EmissionError::InvalidConfig(format!(
                "rate_over_distance must not be negative, got {}",
                self.rate_over_distance
            )));
        }
        Ok(())
    }
}
