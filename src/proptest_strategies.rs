//! Property-based testing strategies and helpers
//!
//! This module provides shared proptest strategies for use across test modules.

use proptest::prelude::*;
use proptest::test_runner::Config;

/// Standard proptest configuration for the statistics property tests
pub fn proptest_config() -> Config {
    Config {
        cases: 500,
        max_shrink_iters: 10000,
        ..Config::default()
    }
}

/// Custom strategies for domain-specific types
pub mod strategies {
    use super::*;

    /// Request paths as they appear in nginx logs
    pub fn url() -> impl Strategy<Value = String> {
        prop::collection::vec("[a-zA-Z0-9_-]{1,12}", 1..4)
            .prop_map(|parts| format!("/{}", parts.join("/")))
    }

    /// Request durations with millisecond precision, as nginx writes them
    pub fn request_time() -> impl Strategy<Value = f64> {
        (0u32..60_000).prop_map(|millis| millis as f64 / 1000.0)
    }

    /// A full `ui_short` formatted access log line
    pub fn access_log_line() -> impl Strategy<Value = (String, String, f64)> {
        (
            prop::sample::select(vec!["GET", "POST", "PUT", "DELETE", "HEAD"]),
            url(),
            request_time(),
            100u16..600,
            0u32..100_000,
        )
            .prop_map(|(method, url, request_time, status, bytes)| {
                let line = format!(
                    r#"1.194.135.240 -  - [29/Jun/2017:03:50:23 +0300] "{} {} HTTP/1.1" {} {} "-" "python-requests/2.13.0" "-" "1498697423-3979856266-4708-9752782" "8a7741a54297568b" {:.3}"#,
                    method, url, status, bytes, request_time
                );
                (line, url, request_time)
            })
    }

    /// Lines that can never be parsed: no `HTTP/1.` marker
    pub fn malformed_line() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 .:/\\[\\]-]{0,80}".prop_filter("must not contain the HTTP/1. marker", |s| {
            !s.contains("HTTP/1.")
        })
    }

    /// Durations of a single URL, in arrival order
    pub fn duration_sequence() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(request_time(), 1..200)
    }
}
