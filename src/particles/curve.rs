//! 发射速率曲线
//!
//! 将归一化的周期进度 `t ∈ [0, 1]` 映射为瞬时发射速率（粒子/秒）。

use std::fmt;
use std::sync::Arc;

/// 自定义速率函数
pub type RateFn = Arc<dyn Fn(f32) -> f32 + Send + Sync>;

/// 速率曲线类型
#[derive(Clone)]
pub enum RateCurve {
    /// 恒定速率
    Constant(f32),
    /// 线性变化
    Linear { start: f32, end: f32 },
    /// 分段线性曲线，控制点 `(t, rate)` 按 `t` 升序
    Curve { points: Vec<(f32, f32)> },
    /// 宿主提供的任意函数
    Custom(RateFn),
}

impl RateCurve {
    /// 零速率（仅爆发或按距离发射）
    pub fn zero() -> Self {
        Self::Constant(0.0)
    }

    /// 由控制点构造分段曲线，控制点会按时间排序
    pub fn from_points(mut points: Vec<(f32, f32)>) -> Self {
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self::Curve { points }
    }

    /// 由闭包构造
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f32) -> f32 + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// 采样速率
    ///
    /// 返回值可能为负或非有限值（自定义函数），调用方负责防护。
    pub fn sample(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Constant(rate) => *rate,
            Self::Linear { start, end } => start + (end - start) * t,
            Self::Curve { points } => sample_curve(points, t),
            Self::Custom(f) => f(t),
        }
    }
}

impl Default for RateCurve {
    fn default() -> Self {
        Self::Constant(10.0)
    }
}

impl fmt::Debug for RateCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(rate) => f.debug_tuple("Constant").field(rate).finish(),
            Self::Linear { start, end } => f
                .debug_struct("Linear")
                .field("start", start)
                .field("end", end)
                .finish(),
            Self::Curve { points } => f.debug_struct("Curve").field("points", points).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<f32> for RateCurve {
    fn from(rate: f32) -> Self {
        Self::Constant(rate)
    }
}

/// 曲线采样
fn sample_curve(points: &[(f32, f32)], t: f32) -> f32 {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return 0.0,
    };

    if t <= first.0 {
        return first.1;
    }

    for pair in points.windows(2) {
        let (t0, v0) = pair[0];
        let (t1, v1) = pair[1];
        if t >= t0 && t <= t1 {
            let span = t1 - t0;
            if span <= f32::EPSILON {
                return v1;
            }
            let local_t = (t - t0) / span;
            return v0 + (v1 - v0) * local_t;
        }
    }

    last.1
}
