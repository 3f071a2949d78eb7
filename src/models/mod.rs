pub mod log_file;
pub mod report;
pub mod url_statistics;

// 重新导出核心类型
pub use log_file::{Compression, LogFileInfo};
pub use report::ReportRow;
pub use url_statistics::{RunTotals, UrlStats};
