//! 统一错误处理模块
//!
//! ## 错误类型分层
//!
//! - **调度层错误** (`EmissionError`): 发射器挂载、配置校验等
//! - **配置层错误** (`config::ConfigError`): 配置文件读取与解析
//!
//! 调度器本身在 tick 中不产生错误：无效输入一律被钳制为无操作。

use thiserror::Error;

/// 发射调度错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmissionError {
    /// 粒子容器无效或不存在，无法挂载
    #[error("Particle sink unavailable")]
    SinkUnavailable,

    /// 调度器已挂载，需先卸载
    #[error("Emitter is already attached to a particle sink")]
    AlreadyAttached,

    /// 调度器尚未挂载到任何粒子容器
    #[error("Emitter is not attached to a particle sink")]
    NotAttached,

    /// 发射器配置无效
    #[error("Invalid emitter configuration: {0}")]
    InvalidConfig(String),

    /// 日志系统初始化失败
    #[error("Logging initialization failed: {0}")]
    Logging(String),
}

/// 调度结果类型
pub type EmissionResult<T> = Result<T, EmissionError>;
