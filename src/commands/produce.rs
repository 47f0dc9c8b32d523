//! Produce a ranked performance report from a runner log

use crate::commands::Command;
use crate::duration::encode_millis;
use crate::error::Result;
use crate::parser::{CapturePolicy, FileCaptureSink, LogParser, NullCaptureSink};
use crate::report::{ReportStore, REPORT_FILE_NAME};
use crate::ui::UI;
use std::fs;
use std::io::BufReader;
use std::path::PathBuf;

pub struct ProduceCommand {
    log_path: PathBuf,
    out_dir: PathBuf,
    capture: CapturePolicy,
    count: usize,
}

impl ProduceCommand {
    pub fn new(log_path: PathBuf, out_dir: PathBuf, capture: CapturePolicy) -> Self {
        ProduceCommand {
            log_path,
            out_dir,
            capture,
            count: 10, // Default to top 10
        }
    }

    pub fn with_count(
        log_path: PathBuf,
        out_dir: PathBuf,
        capture: CapturePolicy,
        count: usize,
    ) -> Self {
        ProduceCommand {
            log_path,
            out_dir,
            capture,
            count,
        }
    }
}

impl Command for ProduceCommand {
    fn execute(&self, ui: &mut dyn UI) -> Result<i32> {
        let file = fs::File::open(&self.log_path)?;
        let reader = BufReader::new(file);

        let parser = LogParser::new(self.capture);
        let records = if self.capture.enabled() {
            let mut sink = FileCaptureSink::new(&self.out_dir);
            parser.parse(reader, ui, &mut sink)?
        } else {
            parser.parse(reader, ui, &mut NullCaptureSink)?
        };

        let mut store = ReportStore::from_records(records);
        ui.info(&format!(
            "Parsed {} test(s), total time {}",
            store.len(),
            encode_millis(store.total_millis())
        ))?;
        ui.info(&format!(
            "{} failed, success rate {:.2}%",
            store.failed_count(),
            store.success_rate()
        ))?;

        store.sort_descending_by_time();

        let display_count = self.count.min(store.len());
        ui.info(&format!("Slowest {} test(s):", display_count))?;
        for record in store.top(self.count) {
            ui.info(&format!(
                "{} - {}",
                encode_millis(record.elapsed_ms),
                record.name
            ))?;
        }

        let report_path = self.out_dir.join(REPORT_FILE_NAME);
        store.save(&report_path, &self.log_path.to_string_lossy())?;
        ui.info(&format!("Report written to {}", report_path.display()))?;

        Ok(0)
    }

    fn name(&self) -> &str {
        "produce"
    }

    fn help(&self) -> &str {
        "Parse a runner log and produce a ranked performance report"
    }
}
