//! Test execution record data structures

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Outcome of a test execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Test passed successfully.
    Passed,
    /// Test failed.
    Failed,
}

impl Outcome {
    /// Returns true if this outcome represents a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Passed => write!(f, "Passed"),
            Outcome::Failed => write!(f, "Failed"),
        }
    }
}

impl FromStr for Outcome {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Passed" => Ok(Outcome::Passed),
            "Failed" => Ok(Outcome::Failed),
            other => Err(Error::Format(format!("unknown outcome '{}'", other))),
        }
    }
}

/// One completed test execution.
///
/// A record is only constructed once its closing marker has been observed,
/// so `outcome` and `elapsed_ms` are always populated together. The name is
/// immutable after construction and is the lookup key in compare mode.
#[derive(Debug, Clone)]
pub struct Record {
    /// Test name as captured from the run-start marker line.
    pub name: String,
    /// Wall-clock time reported by the runner, in milliseconds.
    pub elapsed_ms: u64,
    /// Terminal outcome.
    pub outcome: Outcome,
    /// Free-text lines captured between the start and closing markers.
    ///
    /// Cleared as soon as they have been flushed to a capture file; records
    /// read back from a stored report never have any.
    pub captured_lines: Vec<String>,
}

impl Record {
    /// Create a completed record without captured output.
    pub fn new(name: impl Into<String>, outcome: Outcome, elapsed_ms: u64) -> Self {
        Record {
            name: name.into(),
            elapsed_ms,
            outcome,
            captured_lines: Vec::new(),
        }
    }
}
