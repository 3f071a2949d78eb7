use chrono::NaiveDate;
use std::path::PathBuf;

/// 日志文件压缩方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Plain,
    Gzip,
}

/// 待处理的日志文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFileInfo {
    pub path: PathBuf,
    /// 文件名中的日期
    pub date: NaiveDate,
    pub compression: Compression,
}

/// 日志日期对应的报告文件名，如 `report-2017.06.30.html`
pub fn report_name_for(date: NaiveDate) -> String {
    format!("report-{}.html", date.format("%Y.%m.%d"))
}
