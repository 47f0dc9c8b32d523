//! Test-runner log stream parsing
//!
//! This module turns a line-oriented runner log into completed [`Record`]s.
//! The grammar is the googletest console format: `[ RUN      ]` opens a
//! record, `[       OK ]` / `[  FAILED  ]` close it with an elapsed time,
//! `[----------]` marks section boundaries and `[==========]` is banner
//! noise. Free text between the start and closing markers can optionally be
//! captured per record and written out to individual files.

use crate::error::{Error, Result};
use crate::record::{Outcome, Record};
use crate::ui::UI;
use regex::Regex;
use std::fs;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Marker opening a record.
pub const RUN_MARKER: &str = "[ RUN      ]";
/// Marker closing a record with a passed outcome.
pub const OK_MARKER: &str = "[       OK ]";
/// Marker closing a record with a failed outcome.
pub const FAILED_MARKER: &str = "[  FAILED  ]";
/// Section boundary marker.
pub const SECTION_MARKER: &str = "[----------]";
/// End-of-run banner marker, always ignored.
pub const BANNER_MARKER: &str = "[==========]";
/// The section line that terminates parsing; everything after it is summary
/// output that re-lists failures without timings.
pub const TEARDOWN_LINE: &str = "[----------] Global test environment tear-down";

/// Which outcome classes have their captured lines persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapturePolicy {
    /// Capture nothing.
    None,
    /// Persist output of passing tests only.
    OkOnly,
    /// Persist output of failing tests only.
    FailedOnly,
    /// Persist output of every test.
    Both,
}

impl CapturePolicy {
    /// Returns true if any capture is requested at all.
    pub fn enabled(&self) -> bool {
        !matches!(self, CapturePolicy::None)
    }

    /// Returns true if records with the given outcome should be persisted.
    pub fn captures(&self, outcome: Outcome) -> bool {
        match self {
            CapturePolicy::None => false,
            CapturePolicy::OkOnly => outcome == Outcome::Passed,
            CapturePolicy::FailedOnly => outcome == Outcome::Failed,
            CapturePolicy::Both => true,
        }
    }
}

/// Destination for a completed record's captured lines.
///
/// The sink is invoked before the record is appended to the parser's result
/// sequence, and the record's lines are cleared immediately afterwards.
pub trait CaptureSink {
    /// Persist the captured lines of one record.
    fn write_capture(&mut self, record: &Record) -> Result<()>;
}

/// Sink that discards all captures.
pub struct NullCaptureSink;

impl CaptureSink for NullCaptureSink {
    fn write_capture(&mut self, _record: &Record) -> Result<()> {
        Ok(())
    }
}

/// Sink writing one `<sanitized name>.txt` file per record.
///
/// Each file is opened, fully written and closed before the next record
/// completes; an existing file of the same name is truncated.
pub struct FileCaptureSink {
    directory: PathBuf,
}

impl FileCaptureSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        FileCaptureSink {
            directory: directory.into(),
        }
    }

    /// Replace path-unsafe characters in a test name with underscores.
    pub fn sanitize_name(name: &str) -> String {
        name.replace(['/', '.'], "_")
    }

    fn capture_path(&self, name: &str) -> PathBuf {
        self.directory
            .join(format!("{}.txt", Self::sanitize_name(name)))
    }
}

impl CaptureSink for FileCaptureSink {
    fn write_capture(&mut self, record: &Record) -> Result<()> {
        let path = self.capture_path(&record.name);
        let mut file = fs::File::create(&path)?;
        for line in &record.captured_lines {
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }
}

/// A record that has been opened but not yet closed.
struct OpenRecord {
    name: String,
    captured_lines: Vec<String>,
}

/// Line-oriented parser for the runner log grammar.
pub struct LogParser {
    policy: CapturePolicy,
    strict_sequencing: bool,
}

impl LogParser {
    pub fn new(policy: CapturePolicy) -> Self {
        LogParser {
            policy,
            strict_sequencing: false,
        }
    }

    /// A `RUN` marker while a record is still open normally replaces the
    /// in-flight record, matching what runners emit after a crash-and-retry.
    /// With strict sequencing it is a sequence error instead.
    pub fn with_strict_sequencing(mut self, strict: bool) -> Self {
        self.strict_sequencing = strict;
        self
    }

    /// Consume a log stream and return the completed records in discovery
    /// order.
    ///
    /// Captured lines of each completed record are flushed to `sink` before
    /// the record is appended, so the sink never holds a reference into the
    /// growing result sequence.
    pub fn parse<R: BufRead>(
        &self,
        reader: R,
        ui: &mut dyn UI,
        sink: &mut dyn CaptureSink,
    ) -> Result<Vec<Record>> {
        let close_re = Regex::new(r"^(.+) \((\d+) ms\)$")
            .map_err(|e| Error::Other(format!("invalid close pattern: {}", e)))?;

        let mut records = Vec::new();
        let mut open: Option<OpenRecord> = None;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = index + 1;
            let line = line.trim_end();

            if line.is_empty() || line.starts_with(BANNER_MARKER) {
                continue;
            }

            if let Some(rest) = line.strip_prefix(RUN_MARKER) {
                if let Some(stale) = open.take() {
                    if self.strict_sequencing {
                        return Err(Error::Sequence {
                            line: line_number,
                            message: format!(
                                "'{}' opened before '{}' closed",
                                rest.trim(),
                                stale.name
                            ),
                        });
                    }
                    ui.debug(&format!(
                        "discarding unterminated record '{}'",
                        stale.name
                    ))?;
                }
                open = Some(OpenRecord {
                    name: rest.trim().to_string(),
                    captured_lines: Vec::new(),
                });
                continue;
            }

            let close_marker = if line.starts_with(OK_MARKER) {
                Some((OK_MARKER, Outcome::Passed))
            } else if line.starts_with(FAILED_MARKER) {
                Some((FAILED_MARKER, Outcome::Failed))
            } else {
                None
            };

            if let Some((marker, outcome)) = close_marker {
                let current = open.take().ok_or_else(|| Error::Sequence {
                    line: line_number,
                    message: "closing marker before opening marker".to_string(),
                })?;

                let rest = line[marker.len()..].trim();
                let captures = close_re.captures(rest).ok_or_else(|| Error::Parse {
                    line: line_number,
                    text: line.to_string(),
                })?;
                let elapsed_ms: u64 =
                    captures[2].parse().map_err(|_| Error::Parse {
                        line: line_number,
                        text: line.to_string(),
                    })?;

                let mut record = Record {
                    name: current.name,
                    elapsed_ms,
                    outcome,
                    captured_lines: current.captured_lines,
                };
                if self.policy.captures(outcome) {
                    sink.write_capture(&record)?;
                    record.captured_lines.clear();
                }
                records.push(record);
                continue;
            }

            if line.starts_with(SECTION_MARKER) {
                if line == TEARDOWN_LINE {
                    break;
                }
                continue;
            }

            if line.starts_with('[') {
                ui.warn(&format!(
                    "unrecognized marker at line {}: {}",
                    line_number, line
                ))?;
                continue;
            }

            if let Some(ref mut current) = open {
                if self.policy.enabled() {
                    current.captured_lines.push(line.trim().to_string());
                }
            }
        }

        Ok(records)
    }
}
