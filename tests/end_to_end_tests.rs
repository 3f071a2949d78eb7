//! 端到端验证测试
//!
//! 在临时目录中布置日志与配置，验证从查找日志到写出报告的完整流程

use access_log_analyzer::{run, AnalyzerConfig, AppError, ReportRow, StatisticsError};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const FIRST_LOG_NAME: &str = "nginx-access-ui.log-20170101";
const LATEST_LOG_NAME: &str = "nginx-access-ui.log-20190930";
const LATEST_PACKED_LOG_NAME: &str = "nginx-access-ui.log-20190930.gz";
const OTHER_SERVICE_LOG_NAME: &str = "other_service.log-20300101";
const EXPECTED_REPORT_NAME: &str = "report-2019.09.30.html";

const LATEST_LOG: &str = r#"1.196.116.32 -  - [30/Sep/2019:03:50:22 +0300] "GET /api/v2/banner/25019354 HTTP/1.1" 200 927 "-" "Lynx/2.8.8dev.9" "-" "1498697422-2190034393-4708-9752759" "dc7161be3" 0.390
1.99.174.176 3b81f63526fa8  - [30/Sep/2019:03:50:22 +0300] "GET /api/1/photogenic_banners/list/?server_name=WIN7RB4 HTTP/1.1" 200 12 "-" "Python-urllib/2.7" "-" "1498697422-32900793-4708-9752770" "-" 0.133
1.169.137.128 -  - [30/Sep/2019:03:50:22 +0300] "GET /api/v2/banner/16852664 HTTP/1.1" 200 19415 "-" "Slotovod" "-" "1498697422-2118016444-4708-9752769" "712e90144abee9" 0.199
1.196.116.32 -  - [30/Sep/2019:03:50:23 +0300] "GET /api/v2/banner/25019354 HTTP/1.1" 200 927 "-" "Lynx/2.8.8dev.9" "-" "1498697423-2190034393-4708-9752760" "dc7161be3" 0.610
this line is broken
"#;

struct Fixture {
    root: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("logs")).unwrap();
        fs::create_dir(root.path().join("reports")).unwrap();
        Self { root }
    }

    fn log_dir(&self) -> PathBuf {
        self.root.path().join("logs")
    }

    fn report_dir(&self) -> PathBuf {
        self.root.path().join("reports")
    }

    fn add_log(&self, name: &str, content: &str) {
        fs::write(self.log_dir().join(name), content).unwrap();
    }

    fn add_packed_log(&self, name: &str, content: &str) {
        let file = File::create(self.log_dir().join(name)).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(content.as_bytes()).unwrap();
        encoder.finish().unwrap();
    }

    fn config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            report_size: 10,
            report_dir: self.report_dir(),
            log_dir: self.log_dir(),
            ..AnalyzerConfig::default()
        }
    }

    fn write_config_file(&self) -> PathBuf {
        let path = self.root.path().join("test_config.json");
        let body = serde_json::json!({
            "REPORT_SIZE": 10,
            "REPORT_DIR": self.report_dir(),
            "LOG_DIR": self.log_dir(),
        });
        fs::write(&path, body.to_string()).unwrap();
        path
    }

    fn expected_report(&self) -> PathBuf {
        self.report_dir().join(EXPECTED_REPORT_NAME)
    }
}

fn report_rows(path: &Path) -> Vec<ReportRow> {
    let html = fs::read_to_string(path).unwrap();
    let start = html.find("var table = ").unwrap() + "var table = ".len();
    let end = start + html[start..].find(";\n").unwrap();
    serde_json::from_str(&html[start..end]).unwrap()
}

#[test]
fn test_newest_log_is_reported() {
    let fixture = Fixture::new();
    fixture.add_log(FIRST_LOG_NAME, "GET /old HTTP/1.1 1.0\n");
    fixture.add_log(LATEST_LOG_NAME, LATEST_LOG);
    fixture.add_log(OTHER_SERVICE_LOG_NAME, "GET /other HTTP/1.1 1.0\n");

    let outcome = run(&fixture.config()).unwrap();

    assert_eq!(outcome.report_path, fixture.expected_report());
    assert_eq!(outcome.totals.lines_seen, 5);
    assert_eq!(outcome.totals.parse_errors, 1);
    assert_eq!(outcome.rows_written, 3);

    let rows = report_rows(&outcome.report_path);
    assert_eq!(rows[0].url, "/api/v2/banner/25019354");
    assert_eq!(rows[0].count, 2);
    assert!((rows[0].time_sum - 1.0).abs() < 1e-9);
    assert_eq!(rows[0].time_max, 0.610);
    assert!(rows.iter().all(|r| r.url != "/old" && r.url != "/other"));
}

#[test]
fn test_gzip_log_gives_same_report() {
    let plain = Fixture::new();
    plain.add_log(LATEST_LOG_NAME, LATEST_LOG);
    let plain_outcome = run(&plain.config()).unwrap();

    let packed = Fixture::new();
    packed.add_log(FIRST_LOG_NAME, "GET /old HTTP/1.1 1.0\n");
    packed.add_packed_log(LATEST_PACKED_LOG_NAME, LATEST_LOG);
    let packed_outcome = run(&packed.config()).unwrap();

    assert_eq!(
        report_rows(&plain_outcome.report_path),
        report_rows(&packed_outcome.report_path)
    );
}

#[test]
fn test_report_size_limits_rows() {
    let fixture = Fixture::new();
    fixture.add_log(LATEST_LOG_NAME, LATEST_LOG);
    let config = AnalyzerConfig {
        report_size: 1,
        ..fixture.config()
    };

    let outcome = run(&config).unwrap();
    assert_eq!(outcome.rows_written, 1);
    assert_eq!(report_rows(&outcome.report_path).len(), 1);
}

#[test]
fn test_repeated_start_is_refused() {
    let fixture = Fixture::new();
    fixture.add_log(LATEST_LOG_NAME, LATEST_LOG);

    run(&fixture.config()).unwrap();
    let second = run(&fixture.config());
    assert!(matches!(second, Err(AppError::AlreadyProcessed(_))));
}

#[test]
fn test_no_log_found() {
    let fixture = Fixture::new();
    fixture.add_log(OTHER_SERVICE_LOG_NAME, LATEST_LOG);
    assert!(matches!(run(&fixture.config()), Err(AppError::NoNewLog(_))));
}

#[test]
fn test_too_many_parse_errors() {
    let fixture = Fixture::new();
    fixture.add_log(LATEST_LOG_NAME, "broken\nbroken\nGET /a HTTP/1.1 0.1\n");

    let result = run(&fixture.config());
    assert!(matches!(
        result,
        Err(AppError::Statistics {
            source: StatisticsError::TooManyParseErrors { .. },
            ..
        })
    ));
    assert!(!fixture.expected_report().exists());
}

#[test]
fn test_empty_log() {
    let fixture = Fixture::new();
    fixture.add_log(LATEST_LOG_NAME, "");

    let result = run(&fixture.config());
    assert!(matches!(
        result,
        Err(AppError::Statistics {
            source: StatisticsError::EmptyLog,
            ..
        })
    ));
}

#[test]
fn test_missing_report_dir() {
    let fixture = Fixture::new();
    fixture.add_log(LATEST_LOG_NAME, LATEST_LOG);
    let config = AnalyzerConfig {
        report_dir: fixture.root.path().join("absent"),
        ..fixture.config()
    };
    assert!(matches!(run(&config), Err(AppError::InvalidPath(_))));
}

#[test]
fn test_binary_exit_codes() {
    let fixture = Fixture::new();
    fixture.add_log(LATEST_LOG_NAME, LATEST_LOG);
    let config_path = fixture.write_config_file();
    let binary = env!("CARGO_BIN_EXE_access-log-analyzer");

    let first = Command::new(binary)
        .arg("--config")
        .arg(&config_path)
        .output()
        .unwrap();
    assert!(first.status.success(), "first run failed: {:?}", first);
    assert!(fixture.expected_report().is_file());

    let second = Command::new(binary)
        .arg("--config")
        .arg(&config_path)
        .output()
        .unwrap();
    assert_eq!(second.status.code(), Some(1));
}

#[test]
fn test_binary_reports_parse_failure() {
    let fixture = Fixture::new();
    fixture.add_log(LATEST_LOG_NAME, "broken\nbroken\nbroken\n");
    let config_path = fixture.write_config_file();

    let output = Command::new(env!("CARGO_BIN_EXE_access-log-analyzer"))
        .arg("--config")
        .arg(&config_path)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Can not parse the log file"),
        "unexpected stderr: {}",
        stderr
    );
}

#[test]
fn test_binary_invalid_config_path() {
    let fixture = Fixture::new();
    let output = Command::new(env!("CARGO_BIN_EXE_access-log-analyzer"))
        .arg("--config")
        .arg(fixture.root.path().join("absent.json"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_binary_unwritable_log_file() {
    let fixture = Fixture::new();
    fixture.add_log(LATEST_LOG_NAME, LATEST_LOG);
    let occupied = fixture.root.path().join("occupied");
    fs::create_dir(&occupied).unwrap();

    let config_path = fixture.root.path().join("log_file_config.json");
    let body = serde_json::json!({
        "REPORT_DIR": fixture.report_dir(),
        "LOG_DIR": fixture.log_dir(),
        "LOG_FILE": occupied,
    });
    fs::write(&config_path, body.to_string()).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_access-log-analyzer"))
        .arg("--config")
        .arg(&config_path)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Can not open the log file for writing"),
        "unexpected stderr: {}",
        stderr
    );
    assert!(!fixture.expected_report().exists());
}
