//! 基础设施层 - 技术实现
//!
//! 提供配置加载与日志初始化

pub mod config;
pub mod logging;
