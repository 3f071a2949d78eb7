//! 统计聚合驱动
//!
//! 逐行消费日志，把成功解析的观测累加到对应 URL，失败行只计数。
//! 聚合过程中不对外暴露任何中间结果，`finish` 之后才能读取。

use std::collections::HashMap;
use std::io;

use tracing::{debug, trace};

use crate::models::{RunTotals, UrlStats};
use crate::services::line_parser::parse_line;

/// 保持首次出现顺序的 URL → 统计映射
#[derive(Debug, Clone, Default)]
pub struct UrlStatsMap {
    index: HashMap<String, usize>,
    entries: Vec<(String, UrlStats)>,
}

impl UrlStatsMap {
    pub fn get(&self, url: &str) -> Option<&UrlStats> {
        self.index.get(url).map(|&slot| &self.entries[slot].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按首次出现顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&str, &UrlStats)> {
        self.entries.iter().map(|(url, stats)| (url.as_str(), stats))
    }

    /// 返回 true 表示该 URL 首次出现
    fn observe(&mut self, url: &str, request_time: f64) -> bool {
        match self.index.get(url) {
            Some(&slot) => {
                self.entries[slot].1.observe(request_time);
                false
            }
            None => {
                self.index.insert(url.to_string(), self.entries.len());
                self.entries
                    .push((url.to_string(), UrlStats::new(request_time)));
                true
            }
        }
    }
}

/// 聚合完成后的结果
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub urls: UrlStatsMap,
    pub totals: RunTotals,
}

/// 单次运行的聚合器
#[derive(Debug, Default)]
pub struct StatisticsAggregator {
    urls: UrlStatsMap,
    totals: RunTotals,
}

impl StatisticsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 消费一行原始日志
    pub fn consume_line(&mut self, line: &str) {
        let line_number = self.totals.lines_seen + 1;
        let parsed = parse_line(line);

        match parsed.observation() {
            Some(observation) => {
                self.record(observation.url, observation.request_time);
                trace!(line_number, url = observation.url, "row processed");
            }
            None => {
                self.totals.record_error();
                debug!(
                    line_number,
                    url_found = parsed.url.is_some(),
                    request_time_found = parsed.request_time.is_some(),
                    "Parsing error. Invalid line with number {}: {}",
                    line_number,
                    line
                );
            }
        }
    }

    /// 记录一次成功解析的观测
    pub fn record(&mut self, url: &str, request_time: f64) {
        self.totals.record_request(request_time);
        if self.urls.observe(url, request_time) {
            trace!(
                url,
                line_number = self.totals.lines_seen,
                "encounter url for the first time"
            );
        }
    }

    pub fn finish(self) -> Aggregation {
        debug!(
            lines_seen = self.totals.lines_seen,
            parse_errors = self.totals.parse_errors,
            urls = self.urls.len(),
            "aggregation finished"
        );
        Aggregation {
            urls: self.urls,
            totals: self.totals,
        }
    }
}

/// 聚合内存中的行序列
pub fn aggregate_lines<I, S>(lines: I) -> Aggregation
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut aggregator = StatisticsAggregator::new();
    for line in lines {
        aggregator.consume_line(line.as_ref());
    }
    aggregator.finish()
}

/// 聚合来自日志源的行序列，读取错误直接中止
pub fn aggregate_reader<I>(lines: I) -> io::Result<Aggregation>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let mut aggregator = StatisticsAggregator::new();
    for line in lines {
        aggregator.consume_line(&line?);
    }
    Ok(aggregator.finish())
}
