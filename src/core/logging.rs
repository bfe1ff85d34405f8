//! 日志初始化
//!
//! 基于 `tracing-subscriber` 的 fmt 输出，过滤级别优先取 `RUST_LOG`，
//! 否则使用配置中的级别。

use crate::config::LoggingConfig;
use crate::core::error::{EmissionError, EmissionResult};
use tracing_subscriber::EnvFilter;

/// 初始化全局日志订阅器
///
/// 重复调用会返回 `EmissionError::Logging`，调用方可以安全忽略。
pub fn init_logging(config: &LoggingConfig) -> EmissionResult<()> {
    if !config.log_to_console {
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| EmissionError::Logging(e.to_string()))?;

    tracing::info!(target: "emission", "Logging initialized at level {}", config.level.as_filter());
    Ok(())
}
