use access_log_analyzer::services::{aggregate_lines, compute_report, parse_line};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn create_test_log_lines(count: usize, distinct_urls: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            format!(
                r#"1.196.116.32 -  - [29/Jun/2017:03:50:22 +0300] "GET /api/v2/banner/{} HTTP/1.1" 200 927 "-" "Lynx/2.8.8dev.9" "-" "1498697422-2190034393-4708-{}" "dc7161be3" {}.{:03}"#,
                i % distinct_urls,
                i,
                i % 3,
                i % 1000
            )
        })
        .collect()
}

fn bench_parse_line(c: &mut Criterion) {
    let lines = create_test_log_lines(1000, 100);

    c.bench_function("parse_line", |b| {
        b.iter(|| {
            for line in &lines {
                black_box(parse_line(black_box(line)));
            }
        })
    });
}

fn bench_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation");

    for distinct_urls in [10usize, 1_000, 10_000] {
        let lines = create_test_log_lines(50_000, distinct_urls);
        group.throughput(Throughput::Elements(lines.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("aggregate_and_rank", distinct_urls),
            &lines,
            |b, lines| {
                b.iter(|| {
                    let aggregation = aggregate_lines(lines);
                    black_box(compute_report(&aggregation, 0.5))
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_parse_line, bench_aggregation);
criterion_main!(benches);
