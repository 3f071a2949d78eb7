//! 访问日志分析器
//!
//! 读取最新的 nginx 访问日志，按 URL 统计请求耗时，生成按总耗时排序的 HTML 报告。
//!
//! 核心是单遍流式聚合：每个 URL 只保存常数大小的状态（含近似中位数），
//! 与日志中的请求总量无关。

pub mod cli;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
pub mod proptest_strategies;

pub use error::{AppError, Result, StatisticsError};
pub use infrastructure::config::AnalyzerConfig;
pub use models::{ReportRow, RunTotals, UrlStats};
pub use services::{run, RunOutcome};
