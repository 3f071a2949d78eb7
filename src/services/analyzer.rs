//! 分析流程编排
//!
//! 查找日志 → 检查是否已处理 → 读取并聚合 → 错误比例闸门 → 排序 → 渲染报告

use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::{info, instrument};

use crate::error::{AppError, Result};
use crate::infrastructure::config::AnalyzerConfig;
use crate::models::RunTotals;
use crate::services::report_builder::compute_report;
use crate::services::report_renderer::ReportRenderer;
use crate::services::statistics_aggregator::aggregate_reader;
use crate::utils::{find_unprocessed_log, open_log, LogLookup};

/// 一次成功运行的结果
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub log_path: PathBuf,
    pub log_date: NaiveDate,
    pub report_path: PathBuf,
    /// 写入报告的行数（不超过 REPORT_SIZE）
    pub rows_written: usize,
    pub totals: RunTotals,
}

/// 执行一次完整分析
#[instrument(skip_all, fields(log_dir = %config.log_dir.display()))]
pub fn run(config: &AnalyzerConfig) -> Result<RunOutcome> {
    config.verify_directories()?;

    let log = match find_unprocessed_log(&config.log_dir, &config.report_dir) {
        LogLookup::Found(log) => log,
        LogLookup::NotFound => return Err(AppError::NoNewLog(config.log_dir.clone())),
        LogLookup::AlreadyProcessed(log) => return Err(AppError::AlreadyProcessed(log.path)),
    };

    // 模板在读日志前加载，模板错误不必等整份日志解析完
    let renderer = ReportRenderer::from_config(config.report_template.as_deref())?;

    let aggregation = aggregate_reader(open_log(&log)?).map_err(|e| {
        AppError::io_error(
            format!("Can not read the log file: {}", e),
            Some(log.path.clone()),
        )
    })?;
    let totals = aggregation.totals;
    info!(
        lines = totals.lines_seen,
        parse_errors = totals.parse_errors,
        urls = aggregation.urls.len(),
        "log file parsed"
    );

    let mut rows = compute_report(&aggregation, config.parse_error_threshold)
        .map_err(|e| AppError::statistics(&log.path, e))?;
    rows.truncate(config.report_size);

    let report_path = renderer.write_report(&rows, &config.report_dir, log.date)?;

    Ok(RunOutcome {
        log_path: log.path,
        log_date: log.date,
        report_path,
        rows_written: rows.len(),
        totals,
    })
}
