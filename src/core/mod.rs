//! 核心基础设施：错误类型、日志初始化与通用宏

pub mod error;
pub mod logging;
pub mod macros;

pub use error::{EmissionError, EmissionResult};
pub use logging::init_logging;
