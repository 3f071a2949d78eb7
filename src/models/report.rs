use serde::{Deserialize, Serialize};

use super::url_statistics::{RunTotals, UrlStats};

/// 报告行
///
/// 字段名与 HTML 报告模板中的表格列保持一致。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub url: String,
    pub count: u64,
    /// 请求数占比
    pub count_perc: f64,
    pub time_sum: f64,
    /// 耗时占比
    pub time_perc: f64,
    pub time_avg: f64,
    pub time_max: f64,
    pub time_med: f64,
}

impl ReportRow {
    pub fn new(url: impl Into<String>, stats: &UrlStats, totals: &RunTotals) -> Self {
        let count_perc = if totals.total_requests > 0 {
            stats.count as f64 / totals.total_requests as f64
        } else {
            0.0
        };
        let time_perc = if totals.total_time > 0.0 {
            stats.time_sum / totals.total_time
        } else {
            0.0
        };

        Self {
            url: url.into(),
            count: stats.count,
            count_perc,
            time_sum: stats.time_sum,
            time_perc,
            time_avg: stats.time_avg,
            time_max: stats.time_max,
            time_med: stats.time_med,
        }
    }
}
