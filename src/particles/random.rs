//! 均匀随机数来源
//!
//! 每个周期重置时抽取一次 `cycle_random`，质量要求很低，
//! 宿主可以替换为自己的生成器。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// `[0, 1)` 均匀随机数来源
pub trait RandomSource: Send + Sync {
    /// 抽取下一个 `[0, 1)` 内的值
    fn next_unit(&mut self) -> f32;
}

/// 线程本地随机数
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_unit(&mut self) -> f32 {
        rand::thread_rng().gen::<f32>()
    }
}

/// 固定种子的可复现随机数
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }
}

/// 将任意值收敛到 `[0, 1)`，防止宿主实现越界
pub(crate) fn sanitize_unit(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0 - f32::EPSILON)
    } else {
        0.0
    }
}
