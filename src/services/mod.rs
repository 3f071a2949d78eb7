pub mod analyzer;
pub mod error_gate;
pub mod line_parser;
pub mod report_builder;
pub mod report_renderer;
pub mod statistics_aggregator;


pub use analyzer::{run, RunOutcome};
pub use error_gate::check_parse_errors;
pub use line_parser::{parse_line, Observation, ParsedLine};
pub use report_builder::{build_report_rows, compute_report, rank_report_rows};
pub use report_renderer::ReportRenderer;
pub use statistics_aggregator::{
    aggregate_lines, aggregate_reader, Aggregation, StatisticsAggregator, UrlStatsMap,
};
