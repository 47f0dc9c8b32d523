//! Ordered record store with report persistence
//!
//! A [`ReportStore`] holds the records of one logical report in discovery
//! order. Sorting is destructive and in place: an operation that reorders
//! the store changes what later operations over the same store see, which
//! is relied on by the produce flow (rank, then persist in ranked order).
//!
//! The persisted format is `#`-prefixed header lines followed by one
//! tab-separated `duration\toutcome\tname` row per record; the same format
//! is read back by [`ReportStore::load`].

use crate::duration::{decode_millis, encode_millis};
use crate::error::{Error, Result};
use crate::record::Record;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// File name of the persisted performance report.
pub const REPORT_FILE_NAME: &str = "perf_report.txt";

/// An ordered collection of completed records.
#[derive(Debug, Default)]
pub struct ReportStore {
    /// Records in discovery order, until a sort repositions them.
    pub records: Vec<Record>,
}

impl ReportStore {
    pub fn new() -> Self {
        ReportStore {
            records: Vec::new(),
        }
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        ReportStore { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of elapsed time over all records, in milliseconds.
    pub fn total_millis(&self) -> u64 {
        self.records.iter().map(|r| r.elapsed_ms).sum()
    }

    /// Number of records with a failed outcome.
    pub fn failed_count(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_failure()).count()
    }

    /// Percentage of passing records.
    ///
    /// An empty store yields NaN (0/0); callers render it with `{:.2}`
    /// formatting rather than treating it as an error.
    pub fn success_rate(&self) -> f64 {
        let total = self.len();
        let succeeded = total - self.failed_count();
        succeeded as f64 / total as f64 * 100.0
    }

    /// Reorder slowest-first.
    ///
    /// Implemented as an ascending sort followed by a reverse so that the
    /// relative order of equal times matches the produced artifacts exactly.
    pub fn sort_descending_by_time(&mut self) {
        self.records.sort_by_key(|r| r.elapsed_ms);
        self.records.reverse();
    }

    /// Reorder fastest-first.
    pub fn sort_ascending_by_time(&mut self) {
        self.records.sort_by_key(|r| r.elapsed_ms);
    }

    /// The first `count` records in current store order.
    pub fn top(&self, count: usize) -> &[Record] {
        &self.records[..count.min(self.records.len())]
    }

    /// Write the report file in the current store order.
    pub fn save(&self, path: &Path, source: &str) -> Result<()> {
        let mut file = fs::File::create(path)?;
        writeln!(file, "# source: {}", source)?;
        writeln!(file, "# tests: {}", self.len())?;
        writeln!(file, "# total: {}", encode_millis(self.total_millis()))?;
        writeln!(file, "# success rate: {:.2}%", self.success_rate())?;
        for record in &self.records {
            writeln!(
                file,
                "{}\t{}\t{}",
                encode_millis(record.elapsed_ms),
                record.outcome,
                record.name
            )?;
        }
        Ok(())
    }

    /// Read a previously produced report file.
    ///
    /// `#` lines are skipped; every other line must carry exactly three
    /// tab-separated fields. Loaded records never have captured lines.
    pub fn load(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        let reader = BufReader::new(file);

        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() != 3 {
                return Err(Error::Format(format!(
                    "expected 3 tab-separated fields, got {}: '{}'",
                    fields.len(),
                    line
                )));
            }
            let elapsed_ms = decode_millis(fields[0])?;
            let outcome = fields[1].parse()?;
            records.push(Record::new(fields[2], outcome, elapsed_ms));
        }

        Ok(ReportStore::from_records(records))
    }
}
