//! 运行日志初始化
//!
//! 配置了 `LOG_FILE` 时写入文件（非阻塞），否则写入 stderr。

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

use crate::error::{AppError, Result};

const TIMESTAMP_FORMAT: &str = "%Y.%m.%d %H:%M:%S";

/// 初始化 tracing 订阅者
///
/// 返回的 guard 必须在整个运行期间持有，drop 时刷新文件缓冲。
pub fn init_logging(log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    // 文件打不开时在安装订阅者之前返回错误
    let appender = log_file.map(file_appender).transpose()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
        .with_target(false);

    match appender {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            builder.with_writer(writer).with_ansi(false).init();
            Ok(Some(guard))
        }
        None => {
            builder.with_writer(std::io::stderr).init();
            Ok(None)
        }
    }
}

/// 打开 `LOG_FILE` 对应的追加写入器，不轮转
fn file_appender(path: &Path) -> Result<RollingFileAppender> {
    let file_name = path
        .file_name()
        .ok_or_else(|| AppError::io_error("LOG_FILE has no file name", Some(path.to_path_buf())))?;
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(directory)
        .map_err(|e| {
            AppError::io_error(
                format!("Can not open the log file for writing: {}", e),
                Some(path.to_path_buf()),
            )
        })
}
