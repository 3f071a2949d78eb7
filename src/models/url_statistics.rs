use serde::{Deserialize, Serialize};

/// 单个 URL 的累计统计
///
/// 中位数是流式近似值：每次观测按 `time_sum / count²` 的步长
/// 向新样本方向推动一次，结果与样本顺序相关，并非精确中位数。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UrlStats {
    pub count: u64,
    pub time_sum: f64,
    pub time_avg: f64,
    pub time_max: f64,
    pub time_med: f64,
}

impl UrlStats {
    /// 首次观测：所有字段直接取该样本
    pub fn new(request_time: f64) -> Self {
        Self {
            count: 1,
            time_sum: request_time,
            time_avg: request_time,
            time_max: request_time,
            time_med: request_time,
        }
    }

    /// 追加一次观测
    ///
    /// 顺序固定：count → time_sum → time_avg → time_max → time_med，
    /// 中位数更新使用已更新的 count 与 time_sum。
    pub fn observe(&mut self, request_time: f64) {
        self.count += 1;
        self.time_sum += request_time;
        self.time_avg = self.time_sum / self.count as f64;
        if request_time > self.time_max {
            self.time_max = request_time;
        }
        self.time_med = updated_median(request_time, self.time_med, self.time_sum, self.count);
    }
}

/// 流式中位数估计的单步更新
///
/// `sample_number` 必须大于 0。
pub fn updated_median(sample: f64, median: f64, sample_sum: f64, sample_number: u64) -> f64 {
    debug_assert!(sample_number > 0);
    let delta = sample_sum / sample_number as f64 / sample_number as f64;
    if median <= sample {
        median + delta
    } else {
        median - delta
    }
}

/// 整个运行的全局计数
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunTotals {
    /// 读取的行数（含解析失败的行）
    pub lines_seen: u64,
    /// 解析失败的行数
    pub parse_errors: u64,
    /// 成功解析的请求数
    pub total_requests: u64,
    /// 成功解析的请求耗时总和
    pub total_time: f64,
}

impl RunTotals {
    pub fn record_error(&mut self) {
        self.lines_seen += 1;
        self.parse_errors += 1;
    }

    pub fn record_request(&mut self, request_time: f64) {
        self.lines_seen += 1;
        self.total_requests += 1;
        self.total_time += request_time;
    }

    /// 解析错误比例；没有读到任何行时为 `None`
    pub fn error_ratio(&self) -> Option<f64> {
        if self.lines_seen == 0 {
            None
        } else {
            Some(self.parse_errors as f64 / self.lines_seen as f64)
        }
    }
}
