use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

use crate::infrastructure::config::ConfigError;

/**
 * 统计阶段的失败 - 整个日志无法产出报告
 *
 * 单行解析失败不在此列：它们只计数，不作为错误上抛
 */
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum StatisticsError {
    #[error("Log contains no lines")]
    #[diagnostic(
        code(statistics::empty_log),
        help("The log file is empty, there is nothing to analyze")
    )]
    EmptyLog,

    #[error("Too many parsing errors. Errors per log lines ratio is {ratio} (threshold {threshold})")]
    #[diagnostic(
        code(statistics::too_many_parse_errors),
        help("Check the log format or raise PARSE_ERROR_THRESHOLD")
    )]
    TooManyParseErrors { ratio: f64, threshold: f64 },
}

/**
 * 应用错误类型 - 使用 miette 提供用户友好的错误诊断
 *
 * 这个枚举用于用户可见的错误，提供详细的诊断信息
 */
#[derive(Error, Debug, Diagnostic)]
pub enum AppError {
    #[error("IO error: {0}")]
    #[diagnostic(code(app::io_error))]
    Io(#[from] std::io::Error),

    #[error("IO error: {message}")]
    #[diagnostic(code(app::io_error_detailed))]
    IoDetailed {
        message: String,
        path: Option<PathBuf>,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid path: {0}")]
    #[diagnostic(
        code(app::invalid_path),
        help("Ensure the path exists and is a directory")
    )]
    InvalidPath(String),

    #[error("No new log file is in {}", .0.display())]
    #[diagnostic(code(app::no_new_log))]
    NoNewLog(PathBuf),

    #[error("Report for the log {} is already built", .0.display())]
    #[diagnostic(code(app::already_processed))]
    AlreadyProcessed(PathBuf),

    #[error("Can not parse the log file {}: {source}", .path.display())]
    #[diagnostic(code(app::statistics_error))]
    Statistics {
        path: PathBuf,
        #[source]
        #[diagnostic_source]
        source: StatisticsError,
    },

    #[error("Template error: {0}")]
    #[diagnostic(
        code(app::template_error),
        help("The report template must contain the $table_json placeholder")
    )]
    Template(String),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(app::serialization_error))]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /**
     * 创建详细的IO错误
     */
    pub fn io_error(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        AppError::IoDetailed {
            message: message.into(),
            path,
        }
    }

    /**
     * 为统计失败附加日志路径
     */
    pub fn statistics(path: impl Into<PathBuf>, source: StatisticsError) -> Self {
        AppError::Statistics {
            path: path.into(),
            source,
        }
    }

    /**
     * 创建模板错误
     */
    pub fn template_error(message: impl Into<String>) -> Self {
        AppError::Template(message.into())
    }
}

/**
 * 统一结果类型
 */
pub type Result<T> = std::result::Result<T, AppError>;
