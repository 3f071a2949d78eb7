//! 通用工具函数模块
//!
//! 日志文件查找与日志行读取。

pub mod log_file_detector;
pub mod log_reader;

pub use log_file_detector::{find_newest_log, find_unprocessed_log, LogLookup};
pub use log_reader::{open_log, open_log_lines, LogLines};
