//! 访问日志行解析
//!
//! 每行只取两样东西：`HTTP/1.` 之前的请求路径，以及行尾的请求耗时。
//! 格式不符是正常情况，返回缺失字段而不是错误。

use once_cell::sync::Lazy;
use regex::Regex;

/// 请求路径：`HTTP/1.` 前、以空白开头的非空白 token
static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s(\S+) HTTP/1\.").expect("URL pattern is a valid regex")
});

/// 一次成功解析出的观测
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation<'a> {
    pub url: &'a str,
    pub request_time: f64,
}

/// 单行解析结果，两个字段分别可能缺失
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedLine<'a> {
    pub url: Option<&'a str>,
    pub request_time: Option<f64>,
}

impl<'a> ParsedLine<'a> {
    /// 两个字段都存在时才构成观测
    pub fn observation(&self) -> Option<Observation<'a>> {
        match (self.url, self.request_time) {
            (Some(url), Some(request_time)) => Some(Observation { url, request_time }),
            _ => None,
        }
    }
}

/// 解析一行日志
pub fn parse_line(line: &str) -> ParsedLine<'_> {
    ParsedLine {
        url: extract_url(line),
        request_time: extract_request_time(line),
    }
}

fn extract_url(line: &str) -> Option<&str> {
    URL_PATTERN
        .captures(line)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

/// 行尾 token 解析为有限、非负的浮点数
fn extract_request_time(line: &str) -> Option<f64> {
    let token = line.split_whitespace().next_back()?;
    let value: f64 = token.parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}
