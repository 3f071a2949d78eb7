//! 日志分析器 - 主入口
//!
//! 应用程序入口点，负责：
//! - 解析命令行参数并加载配置
//! - 初始化日志系统
//! - 执行分析并把失败映射为退出码

use std::process::ExitCode;

use access_log_analyzer::cli::Cli;
use access_log_analyzer::infrastructure::logging::init_logging;
use access_log_analyzer::{run, AnalyzerConfig};
use clap::Parser;
use miette::Diagnostic;
use tracing::{error, info};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AnalyzerConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return report_failure(&e),
    };

    // guard 持有到进程结束，保证文件日志被刷新
    let _log_guard = match init_logging(config.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => return report_failure(&e),
    };

    info!("Log Analyzer v{} - starting", env!("CARGO_PKG_VERSION"));

    match run(&config) {
        Ok(outcome) => {
            info!(
                lines = outcome.totals.lines_seen,
                parse_errors = outcome.totals.parse_errors,
                rows = outcome.rows_written,
                "Report {} is ready",
                outcome.report_path.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            report_failure(&e)
        }
    }
}

fn report_failure(error: &dyn Diagnostic) -> ExitCode {
    eprintln!("{}", error);
    if let Some(help) = error.help() {
        eprintln!("help: {}", help);
    }
    ExitCode::FAILURE
}
