//! Error path testing
//!
//! These tests verify that malformed logs and reports abort the run with
//! the right typed error instead of being repaired or skipped.

use perfreport::commands::{ArrangeCommand, Command, CompareCommand, ProduceCommand};
use perfreport::parser::CapturePolicy;
use perfreport::report::ReportStore;
use perfreport::ui::UI;
use perfreport::Error;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

struct TestUI {
    output: Vec<String>,
    errors: Vec<String>,
}

impl TestUI {
    fn new() -> Self {
        TestUI {
            output: Vec::new(),
            errors: Vec::new(),
        }
    }
}

impl UI for TestUI {
    fn info(&mut self, message: &str) -> perfreport::error::Result<()> {
        self.output.push(message.to_string());
        Ok(())
    }

    fn debug(&mut self, _message: &str) -> perfreport::error::Result<()> {
        Ok(())
    }

    fn warn(&mut self, message: &str) -> perfreport::error::Result<()> {
        self.errors.push(format!("Warning: {}", message));
        Ok(())
    }

    fn error(&mut self, message: &str) -> perfreport::error::Result<()> {
        self.errors.push(message.to_string());
        Ok(())
    }

    fn fatal(&mut self, message: &str) -> perfreport::error::Result<()> {
        self.errors.push(format!("Fatal: {}", message));
        Ok(())
    }
}

fn write_file(temp: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = temp.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_produce_missing_log_is_io_error() {
    let temp = TempDir::new().unwrap();
    let mut ui = TestUI::new();
    let cmd = ProduceCommand::new(
        temp.path().join("missing.log"),
        temp.path().to_path_buf(),
        CapturePolicy::None,
    );
    assert!(matches!(cmd.execute(&mut ui).unwrap_err(), Error::Io(_)));
}

#[test]
fn test_produce_orphan_close_aborts_run() {
    let temp = TempDir::new().unwrap();
    let log = write_file(&temp, "run.log", "[  FAILED  ] ghost (3 ms)\n");

    let mut ui = TestUI::new();
    let cmd = ProduceCommand::new(log, temp.path().to_path_buf(), CapturePolicy::None);
    let err = cmd.execute(&mut ui).unwrap_err();
    assert!(matches!(err, Error::Sequence { line: 1, .. }));
    // No report is produced on a fatal parse failure.
    assert!(!temp.path().join("perf_report.txt").exists());
}

#[test]
fn test_produce_malformed_close_reports_line() {
    let temp = TempDir::new().unwrap();
    let log = write_file(
        &temp,
        "run.log",
        "[ RUN      ] a\n[       OK ] a (1 ms)\n[ RUN      ] b\n[       OK ] b (fast)\n",
    );

    let mut ui = TestUI::new();
    let cmd = ProduceCommand::new(log, temp.path().to_path_buf(), CapturePolicy::None);
    match cmd.execute(&mut ui).unwrap_err() {
        Error::Parse { line, text } => {
            assert_eq!(line, 4);
            assert!(text.contains("b (fast)"));
        }
        other => panic!("expected parse error, got {}", other),
    }
}

#[test]
fn test_compare_missing_baseline_is_io_error() {
    let temp = TempDir::new().unwrap();
    let log = write_file(&temp, "run.log", "");

    let mut ui = TestUI::new();
    let cmd = CompareCommand::new(
        log,
        temp.path().join("missing.txt"),
        temp.path().to_path_buf(),
    );
    assert!(matches!(cmd.execute(&mut ui).unwrap_err(), Error::Io(_)));
}

#[test]
fn test_compare_corrupt_baseline_is_format_error() {
    let temp = TempDir::new().unwrap();
    let log = write_file(&temp, "run.log", "");
    let baseline = write_file(&temp, "baseline.txt", "# header\nnot a data row\n");

    let mut ui = TestUI::new();
    let cmd = CompareCommand::new(log, baseline, temp.path().to_path_buf());
    assert!(matches!(
        cmd.execute(&mut ui).unwrap_err(),
        Error::Format(_)
    ));
}

#[test]
fn test_arrange_corrupt_duration_is_format_error() {
    let temp = TempDir::new().unwrap();
    let baseline = write_file(&temp, "baseline.txt", "0:00:00.010\tPassed\tA\n");

    let mut ui = TestUI::new();
    let cmd = ArrangeCommand::new(baseline, temp.path().to_path_buf(), 100);
    assert!(matches!(
        cmd.execute(&mut ui).unwrap_err(),
        Error::Format(_)
    ));
}

#[test]
fn test_load_rejects_extra_fields() {
    let temp = TempDir::new().unwrap();
    let path = write_file(&temp, "bad.txt", "00:00:00.010\tPassed\tA\textra\n");
    assert!(matches!(
        ReportStore::load(&path).unwrap_err(),
        Error::Format(_)
    ));
}
