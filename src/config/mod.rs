/// 统一配置系统
///
/// 提供TOML/JSON配置文件、环境变量覆盖与校验。
/// 发射器自身的生命周期参数由宿主在运行时设置，不在此处持久化。
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::impl_default;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 文件读取错误
    #[error("Config file error: {0}")]
    FileError(#[from] std::io::Error),
    /// 解析错误
    #[error("Config parse error: {0}")]
    ParseError(String),
    /// 验证错误
    #[error("Config validation error: {0}")]
    ValidationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// 发射调度器全局设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmissionSettings {
    /// 默认粒子池配置
    #[serde(default)]
    pub pool: PoolConfig,

    /// 编辑器预览配置
    #[serde(default)]
    pub preview: PreviewConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl_default!(EmissionSettings {
    pool: PoolConfig::default(),
    preview: PreviewConfig::default(),
    logging: LoggingConfig::default(),
});

impl EmissionSettings {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 从TOML文件加载配置
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_toml_str(&content)
    }

    /// 从TOML字符串解析配置
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 从JSON文件加载配置
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_json_str(&content)
    }

    /// 从JSON字符串解析配置
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 保存为TOML文件
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 保存为JSON文件
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 从环境变量覆盖配置
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("EMISSION_POOL_MAX_PARTICLES") {
            if let Ok(max) = val.parse() {
                self.pool.max_particles = max;
            }
        }
        if let Ok(val) = env::var("EMISSION_POOL_PARTICLE_LIFETIME") {
            if let Ok(lifetime) = val.parse() {
                self.pool.particle_lifetime = lifetime;
            }
        }
        if let Ok(val) = env::var("EMISSION_PREVIEW_INTERACTIVE") {
            self.preview.interactive = val.parse().unwrap_or(self.preview.interactive);
        }
        if let Ok(val) = env::var("EMISSION_LOG_LEVEL") {
            if let Some(level) = LogLevel::parse(&val) {
                self.logging.level = level;
            }
        }
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        self.pool.validate()?;
        Ok(())
    }

    /// 自动查找并加载配置文件
    ///
    /// 按以下顺序查找：
    /// 1. ./emission.toml
    /// 2. ./emission.json
    /// 3. ~/.config/emission_scheduler/emission.toml
    /// 4. 使用默认配置
    pub fn load_or_default() -> Self {
        if let Ok(config) = Self::from_toml_file("emission.toml") {
            tracing::info!(target: "emission.config", "Loaded config from emission.toml");
            return config;
        }

        if let Ok(config) = Self::from_json_file("emission.json") {
            tracing::info!(target: "emission.config", "Loaded config from emission.json");
            return config;
        }

        if let Some(home) = env::var_os("HOME") {
            let config_path = PathBuf::from(home)
                .join(".config")
                .join("emission_scheduler")
                .join("emission.toml");

            if let Ok(config) = Self::from_toml_file(&config_path) {
                tracing::info!(target: "emission.config", "Loaded config from {:?}", config_path);
                return config;
            }
        }

        tracing::info!(target: "emission.config", "Using default configuration");
        Self::default()
    }
}

/// 默认粒子池配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// 最大粒子数
    pub max_particles: usize,

    /// 粒子存活时间（秒）
    pub particle_lifetime: f32,
}

impl_default!(PoolConfig {
    max_particles: 10_000,
    particle_lifetime: 2.0,
});

impl PoolConfig {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_particles == 0 {
            return Err(ConfigError::ValidationError(
                "Pool capacity must be at least one particle".to_string(),
            ));
        }
        if !self.particle_lifetime.is_finite() || self.particle_lifetime <= 0.0 {
            return Err(ConfigError::ValidationError(
                "Particle lifetime must be a positive number".to_string(),
            ));
        }
        Ok(())
    }
}

/// 编辑器预览配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// 是否处于交互式编辑会话（结束的非循环发射器会自动重播）
    pub interactive: bool,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: LogLevel,

    /// 是否输出到控制台
    pub log_to_console: bool,
}

impl_default!(LoggingConfig {
    level: LogLevel::Info,
    log_to_console: true,
});

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    /// 跟踪
    Trace,
    /// 调试
    Debug,
    /// 信息
    Info,
    /// 警告
    Warn,
    /// 错误
    Error,
}

impl LogLevel {
    /// EnvFilter 指令字符串
    pub fn as_filter(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// 大小写不敏感地解析级别名称
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}
