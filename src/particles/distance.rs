//! 按移动距离累积发射
//!
//! 累积量跨周期保留，只有基准点会在挂载时清空，
//! 因此距离发射在世界空间中是连续的。

use glam::Vec3;

/// 距离累积器
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceAccumulator {
    accumulated: f32,
    last_position: Option<Vec3>,
}

impl DistanceAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已累积但尚未消耗的距离
    pub fn accumulated(&self) -> f32 {
        self.accumulated
    }

    /// 上一次采样位置
    pub fn last_position(&self) -> Option<Vec3> {
        self.last_position
    }

    /// 清除基准点，下一次采样只记录位置
    pub fn reset_baseline(&mut self) {
        self.last_position = None;
    }

    /// 记录一次位置采样，返回新增的距离
    ///
    /// 非有限位置会被忽略，不会污染基准点。
    pub fn sample(&mut self, position: Vec3) -> f32 {
        if !position.is_finite() {
            return 0.0;
        }

        match self.last_position.replace(position) {
            None => 0.0,
            Some(last) => {
                let delta = last.distance(position);
                if delta.is_finite() {
                    self.accumulated += delta;
                    delta
                } else {
                    0.0
                }
            }
        }
    }

    /// 累积量严格超过阈值时消耗一个阈值并返回 `true`
    pub fn try_consume(&mut self, threshold: f32) -> bool {
        if threshold > 0.0 && self.accumulated > threshold {
            self.accumulated -= threshold;
            true
        } else {
            false
        }
    }
}
