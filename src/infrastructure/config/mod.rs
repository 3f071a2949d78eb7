//! 配置管理基础设施层
//!
//! 分层合并：
//! - 内置默认值
//! - 用户 JSON 配置文件（覆盖默认值，未知键忽略）

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error};
use validator::Validate;

use crate::error::{AppError, Result};

/// `--config` 不带参数时使用的配置文件
pub const DEFAULT_CONFIG_PATH: &str = "log_analyzer_config.json";

/// 配置错误类型
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("Invalid configuration file {}: {message}", .path.display())]
    #[diagnostic(
        code(config::format_error),
        help("The configuration must be a JSON object with upper-case keys")
    )]
    FormatError { path: PathBuf, message: String },

    #[error("Configuration validation failed: {0}")]
    #[diagnostic(code(config::validation_error))]
    Validation(String),
}

/// 分析器配置
///
/// 键名与 JSON 配置文件保持一致（大写），同时接受小写别名。
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct AnalyzerConfig {
    /// 报告中保留的 URL 条数（按 time_sum 排序后的前 N 条）
    #[serde(rename = "REPORT_SIZE", alias = "report_size")]
    #[validate(range(min = 1))]
    pub report_size: usize,

    /// 报告输出目录
    #[serde(rename = "REPORT_DIR", alias = "report_dir")]
    pub report_dir: PathBuf,

    /// 日志搜索目录
    #[serde(rename = "LOG_DIR", alias = "log_dir")]
    pub log_dir: PathBuf,

    /// 运行日志文件；为空时输出到 stderr
    #[serde(rename = "LOG_FILE", alias = "log_file", default)]
    pub log_file: Option<PathBuf>,

    /// 允许的解析错误比例，[0, 1]
    #[serde(rename = "PARSE_ERROR_THRESHOLD", alias = "parse_error_threshold")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub parse_error_threshold: f64,

    /// 自定义 HTML 模板；为空时使用内置模板
    #[serde(rename = "REPORT_TEMPLATE", alias = "report_template", default)]
    pub report_template: Option<PathBuf>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            report_size: 1000,
            report_dir: PathBuf::from("./reports"),
            log_dir: PathBuf::from("./log"),
            log_file: None,
            parse_error_threshold: 0.5,
            report_template: None,
        }
    }
}

impl AnalyzerConfig {
    /// 加载配置：默认值之上叠加配置文件
    ///
    /// `path` 为 `None` 时只使用默认值。
    pub fn load(path: Option<&Path>) -> std::result::Result<Self, ConfigError> {
        let defaults = Self::default();
        let Some(path) = path else {
            return Ok(defaults);
        };

        let format_error = |message: String| ConfigError::FormatError {
            path: path.to_path_buf(),
            message,
        };

        let defaults_source =
            config::Config::try_from(&defaults).map_err(|e| format_error(e.to_string()))?;
        let settings = config::Config::builder()
            .add_source(defaults_source)
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Json)
                    .required(true),
            )
            .build()
            .map_err(|e| format_error(e.to_string()))?;

        let loaded: Self = settings
            .try_deserialize()
            .map_err(|e| format_error(e.to_string()))?;
        loaded
            .validate()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;

        debug!(config = ?loaded, "configuration loaded from {}", path.display());
        Ok(loaded)
    }

    /// 校验日志目录与报告目录均存在且为目录
    pub fn verify_directories(&self) -> Result<()> {
        verify_directory_path(&self.log_dir)?;
        verify_directory_path(&self.report_dir)
    }
}

/// 目录路径校验
pub fn verify_directory_path(directory_path: &Path) -> Result<()> {
    let message = if !directory_path.exists() {
        Some(format!(
            "Can not find the directory {}.",
            directory_path.display()
        ))
    } else if !directory_path.is_dir() {
        Some(format!(
            "The entered path {} is not a directory path.",
            directory_path.display()
        ))
    } else {
        None
    };

    match message {
        Some(message) => {
            error!("{}", message);
            Err(AppError::InvalidPath(message))
        }
        None => Ok(()),
    }
}
