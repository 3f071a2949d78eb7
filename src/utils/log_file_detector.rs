//! 日志文件检测器模块
//!
//! 在日志目录中递归查找最新的 `nginx-access-ui.log-YYYYMMDD[.gz]`，
//! 并判断对应日期的报告是否已经生成。

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::models::log_file::report_name_for;
use crate::models::{Compression, LogFileInfo};

static LOG_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^nginx-access-ui\.log-(20\d{2})(\d{2})(\d{2})(\.gz)?$")
        .expect("log name pattern is a valid regex")
});

/// 从文件名中识别日志日期与压缩方式
///
/// 不匹配命名规则或日期非法时返回 `None`。
pub fn detect_log_name(file_name: &str) -> Option<(NaiveDate, Compression)> {
    let captures = LOG_NAME_PATTERN.captures(file_name)?;
    let year: i32 = captures[1].parse().ok()?;
    let month: u32 = captures[2].parse().ok()?;
    let day: u32 = captures[3].parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let compression = if captures.get(4).is_some() {
        Compression::Gzip
    } else {
        Compression::Plain
    };
    Some((date, compression))
}

/// 查找日期最新的日志文件
pub fn find_newest_log(log_dir: &Path) -> Option<LogFileInfo> {
    let mut newest: Option<LogFileInfo> = None;

    for entry in WalkDir::new(log_dir) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", log_dir.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(file_name) = entry.file_name().to_str() else {
            continue;
        };
        let Some((date, compression)) = detect_log_name(file_name) else {
            continue;
        };

        debug!(file = %entry.path().display(), %date, "log file candidate");
        if newest.as_ref().map_or(true, |current| date > current.date) {
            newest = Some(LogFileInfo {
                path: entry.into_path(),
                date,
                compression,
            });
        }
    }

    newest
}

/// 报告目录中是否已有该日期的报告
pub fn report_exists(report_dir: &Path, date: NaiveDate) -> bool {
    report_dir.join(report_name_for(date)).is_file()
}

/// 日志查找结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLookup {
    /// 找到尚未处理的日志
    Found(LogFileInfo),
    /// 目录中没有符合命名规则的日志
    NotFound,
    /// 最新日志的报告已经存在
    AlreadyProcessed(LogFileInfo),
}

/// 查找尚未生成报告的最新日志
pub fn find_unprocessed_log(log_dir: &Path, report_dir: &Path) -> LogLookup {
    let Some(newest) = find_newest_log(log_dir) else {
        info!("Do not find a suitable log file in {}.", log_dir.display());
        return LogLookup::NotFound;
    };

    if report_exists(report_dir, newest.date) {
        info!(
            "Report for {} is already in {}",
            newest.path.display(),
            report_dir.display()
        );
        return LogLookup::AlreadyProcessed(newest);
    }

    info!("Find the log to process {}", newest.path.display());
    LogLookup::Found(newest)
}
