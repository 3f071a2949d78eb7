use tracing::debug;

use crate::error::StatisticsError;
use crate::models::ReportRow;
use crate::services::error_gate::check_parse_errors;
use crate::services::statistics_aggregator::Aggregation;

/// 为每个 URL 生成报告行，保持首次出现顺序
pub fn build_report_rows(aggregation: &Aggregation) -> Vec<ReportRow> {
    aggregation
        .urls
        .iter()
        .map(|(url, stats)| ReportRow::new(url, stats, &aggregation.totals))
        .collect()
}

/// 按 time_sum 降序排序；稳定排序，相等时保留首次出现顺序
pub fn rank_report_rows(rows: &mut [ReportRow]) {
    rows.sort_by(|a, b| b.time_sum.total_cmp(&a.time_sum));
}

/// 闸门检查通过后生成排序好的报告行
pub fn compute_report(
    aggregation: &Aggregation,
    parse_error_threshold: f64,
) -> Result<Vec<ReportRow>, StatisticsError> {
    check_parse_errors(&aggregation.totals, parse_error_threshold)?;

    let mut rows = build_report_rows(aggregation);
    rank_report_rows(&mut rows);
    debug!(rows = rows.len(), "report rows calculated");
    Ok(rows)
}
