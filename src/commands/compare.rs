//! Compare a fresh run against a previously produced report

use crate::commands::Command;
use crate::error::Result;
use crate::parser::{CapturePolicy, LogParser, NullCaptureSink};
use crate::report::ReportStore;
use crate::ui::UI;
use std::cmp::Ordering;
use std::fs;
use std::io::{BufReader, Write};
use std::path::PathBuf;

/// File name of the persisted diff.
pub const DIFF_FILE_NAME: &str = "perf_diff.txt";

/// Placeholder rendered when outcomes did not change (or no baseline row
/// exists); fixed width keeps the tab-separated columns aligned.
const NO_TRANSITION: &str = "          ";

/// One row of the diff artifact.
#[derive(Debug, Clone)]
pub struct DiffRow {
    pub name: String,
    /// Percent change of this run's time against the baseline; NaN when the
    /// baseline has no row of this name, infinite when the baseline time
    /// was zero.
    pub percent_delta: f64,
    /// `<this>-><baseline>` when the outcome changed, else blank.
    pub transition: String,
}

/// Total order for deltas: ascending, NaN last.
fn delta_order(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Derive the per-record diff rows of `this` against `other`.
///
/// Rows keep the store order of `this`; every record of `this` yields a row
/// even when the baseline has no match (first match by name wins when the
/// baseline has duplicates).
pub fn diff_rows(
    this: &ReportStore,
    other: &ReportStore,
    ui: &mut dyn UI,
) -> Result<Vec<DiffRow>> {
    let mut rows = Vec::with_capacity(this.len());
    for record in &this.records {
        let baseline = other.records.iter().find(|r| r.name == record.name);
        let row = match baseline {
            Some(baseline) => {
                let delta = (record.elapsed_ms as f64 - baseline.elapsed_ms as f64)
                    / baseline.elapsed_ms as f64
                    * 100.0;
                let transition = if record.outcome != baseline.outcome {
                    format!("{}->{}", record.outcome, baseline.outcome)
                } else {
                    NO_TRANSITION.to_string()
                };
                DiffRow {
                    name: record.name.clone(),
                    percent_delta: delta,
                    transition,
                }
            }
            None => {
                ui.warn(&format!("'{}' not found in baseline report", record.name))?;
                DiffRow {
                    name: record.name.clone(),
                    percent_delta: f64::NAN,
                    transition: NO_TRANSITION.to_string(),
                }
            }
        };
        rows.push(row);
    }
    Ok(rows)
}

/// Percent change of the total elapsed time.
pub fn total_diff(this: &ReportStore, other: &ReportStore) -> f64 {
    (this.total_millis() as f64 - other.total_millis() as f64)
        / other.total_millis() as f64
        * 100.0
}

pub struct CompareCommand {
    log_path: PathBuf,
    baseline_path: PathBuf,
    out_dir: PathBuf,
}

impl CompareCommand {
    pub fn new(log_path: PathBuf, baseline_path: PathBuf, out_dir: PathBuf) -> Self {
        CompareCommand {
            log_path,
            baseline_path,
            out_dir,
        }
    }
}

impl Command for CompareCommand {
    fn execute(&self, ui: &mut dyn UI) -> Result<i32> {
        let file = fs::File::open(&self.log_path)?;
        let records =
            LogParser::new(CapturePolicy::None).parse(BufReader::new(file), ui, &mut NullCaptureSink)?;
        let this = ReportStore::from_records(records);
        let other = ReportStore::load(&self.baseline_path)?;

        let mut rows = diff_rows(&this, &other, ui)?;
        rows.sort_by(|a, b| delta_order(a.percent_delta, b.percent_delta));

        let total = total_diff(&this, &other);
        let diff_path = self.out_dir.join(DIFF_FILE_NAME);
        let mut file = fs::File::create(&diff_path)?;
        writeln!(file, "# total diff: {:.2}%", total)?;
        for row in &rows {
            writeln!(
                file,
                "{:.2}%\t{}\t{}",
                row.percent_delta, row.transition, row.name
            )?;
        }

        ui.info(&format!(
            "Compared {} test(s) against {}, total diff {:.2}%",
            this.len(),
            self.baseline_path.display(),
            total
        ))?;
        ui.info(&format!("Diff written to {}", diff_path.display()))?;

        Ok(0)
    }

    fn name(&self) -> &str {
        "compare"
    }

    fn help(&self) -> &str {
        "Compare a runner log against a previously produced report"
    }
}
