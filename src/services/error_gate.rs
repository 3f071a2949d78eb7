//! 解析错误比例闸门
//!
//! 在整个日志读完后执行一次，不做提前中止。

use tracing::{debug, error};

use crate::error::StatisticsError;
use crate::models::RunTotals;

/// 检查解析错误比例
///
/// 返回通过时的错误比例。比例恰好等于阈值时通过。
pub fn check_parse_errors(totals: &RunTotals, threshold: f64) -> Result<f64, StatisticsError> {
    let Some(error_ratio) = totals.error_ratio() else {
        error!("Could not parse any request: the log contains no lines");
        return Err(StatisticsError::EmptyLog);
    };

    if error_ratio > threshold {
        error!(
            "Too many parsing errors. Errors per log lines ratio is {}",
            error_ratio
        );
        return Err(StatisticsError::TooManyParseErrors {
            ratio: error_ratio,
            threshold,
        });
    }

    debug!(error_ratio, threshold, "parse error ratio accepted");
    Ok(error_ratio)
}
