//! HTML 报告渲染
//!
//! 模板中的 `$table_json` 被替换为报告行的 JSON 数组，其余内容原样输出。

use chrono::NaiveDate;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{AppError, Result};
use crate::models::log_file::report_name_for;
use crate::models::ReportRow;

pub const TABLE_PLACEHOLDER: &str = "$table_json";

const BUILTIN_TEMPLATE: &str = include_str!("../../templates/report.html");

/// 报告渲染器
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    template: String,
}

impl ReportRenderer {
    /// 使用给定模板文本；缺少占位符时报错
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if !template.contains(TABLE_PLACEHOLDER) {
            return Err(AppError::template_error(format!(
                "placeholder {} not found",
                TABLE_PLACEHOLDER
            )));
        }
        Ok(Self { template })
    }

    /// 内置模板
    pub fn builtin() -> Self {
        Self {
            template: BUILTIN_TEMPLATE.to_string(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let template = fs::read_to_string(path).map_err(|e| {
            AppError::io_error(
                format!("Can not read the report template: {}", e),
                Some(path.to_path_buf()),
            )
        })?;
        Self::new(template)
    }

    /// 配置了模板路径时读取文件，否则使用内置模板
    pub fn from_config(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::builtin()),
        }
    }

    /// 渲染报告文本
    pub fn render(&self, rows: &[ReportRow]) -> Result<String> {
        // 防止 URL 中的 `</script>` 提前结束脚本块
        let table_json = serde_json::to_string(rows)?.replace("</", "<\\/");
        Ok(self.template.replace(TABLE_PLACEHOLDER, &table_json))
    }

    /// 渲染并写入 `report_dir/report-YYYY.MM.DD.html`
    ///
    /// 先写临时文件再原子替换，失败时不会留下半截报告。
    pub fn write_report(
        &self,
        rows: &[ReportRow],
        report_dir: &Path,
        date: NaiveDate,
    ) -> Result<PathBuf> {
        let report = self.render(rows)?;
        let report_path = report_dir.join(report_name_for(date));

        let mut temp_file = NamedTempFile::new_in(report_dir)?;
        temp_file.write_all(report.as_bytes())?;
        temp_file.flush()?;
        temp_file.persist(&report_path).map_err(|e| {
            AppError::io_error(
                format!("Can not save the report: {}", e.error),
                Some(report_path.clone()),
            )
        })?;

        info!(
            "Report with {} rows saved to {}",
            rows.len(),
            report_path.display()
        );
        Ok(report_path)
    }
}
