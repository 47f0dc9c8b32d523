//! perfreport - performance report tooling for test-runner logs
//!
//! perfreport parses the console output of a googletest-style test runner,
//! reconstructs one record per executed test, and derives ranked timing
//! reports, comparison diffs and time-boxed selection plans from them.
//!
//! # Architecture
//!
//! The library is organized into several key modules:
//!
//! - [`parser`]: the marker-line state machine turning a raw log into records
//! - [`record`]: the per-test value types ([`record::Record`], [`record::Outcome`])
//! - [`duration`]: the `HH:MM:SS.mmm` ↔ milliseconds codec
//! - [`report`]: the ordered record store with report file save/load
//! - [`commands`]: the produce, compare and arrange analysis commands
//! - [`config`]: .perfr.conf configuration file parsing
//! - [`ui`]: injected log-sink abstraction for progress and warnings
//! - [`error`]: error types and Result alias
//!
//! # Artifacts
//!
//! - `perf_report.txt`: `#` header lines plus `duration\toutcome\tname` rows,
//!   slowest-first. Also the input format of compare/arrange baselines.
//! - `perf_diff.txt`: per-test percent deltas against a baseline report.
//! - `perf_arrange_<budget>ms.txt`: fastest tests fitting a time budget.
//! - `<test name>.txt`: optional per-test captured output.
//!
//! # Example
//!
//! ```no_run
//! use perfreport::commands::{Command, ProduceCommand};
//! use perfreport::parser::CapturePolicy;
//! use perfreport::ui::CliUI;
//! use std::path::PathBuf;
//!
//! # fn main() -> perfreport::error::Result<()> {
//! let mut ui = CliUI::new(false);
//! let cmd = ProduceCommand::new(
//!     PathBuf::from("run.log"),
//!     PathBuf::from("out"),
//!     CapturePolicy::FailedOnly,
//! );
//! cmd.execute(&mut ui)?;
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod config;
pub mod duration;
pub mod error;
pub mod parser;
pub mod record;
pub mod report;
pub mod ui;

pub use error::{Error, Result};
