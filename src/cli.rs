//! 命令行参数

use clap::Parser;
use std::path::PathBuf;

use crate::infrastructure::config::DEFAULT_CONFIG_PATH;

/// Build a per-URL latency report from the newest nginx access log
#[derive(Parser, Debug)]
#[command(name = "access-log-analyzer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON configuration file; without a value uses log_analyzer_config.json
    #[arg(
        long,
        value_name = "PATH",
        num_args = 0..=1,
        default_missing_value = DEFAULT_CONFIG_PATH
    )]
    pub config: Option<PathBuf>,
}
