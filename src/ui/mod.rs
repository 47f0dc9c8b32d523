//! User interface abstraction
//!
//! Components never talk to a process-wide logger; they are handed a `UI`
//! sink and report progress and warnings through it.

use crate::error::Result;
use std::io::{self, Write};

#[cfg(test)]
pub mod test_ui;

/// Abstract UI trait for progress and diagnostic output
pub trait UI {
    /// Report normal progress output
    fn info(&mut self, message: &str) -> Result<()>;

    /// Report detail useful when diagnosing a run
    fn debug(&mut self, message: &str) -> Result<()>;

    /// Report a recoverable problem
    fn warn(&mut self, message: &str) -> Result<()>;

    /// Report an error
    fn error(&mut self, message: &str) -> Result<()>;

    /// Report a fatal condition just before the run aborts
    fn fatal(&mut self, message: &str) -> Result<()>;
}

/// Command-line UI implementation
pub struct CliUI {
    stdout: Box<dyn Write>,
    stderr: Box<dyn Write>,
    verbose: bool,
}

impl CliUI {
    /// Creates a command-line UI writing to stdout and stderr.
    ///
    /// Debug output is suppressed unless `verbose` is set.
    pub fn new(verbose: bool) -> Self {
        CliUI {
            stdout: Box::new(io::stdout()),
            stderr: Box::new(io::stderr()),
            verbose,
        }
    }
}

impl Default for CliUI {
    fn default() -> Self {
        Self::new(false)
    }
}

impl UI for CliUI {
    fn info(&mut self, message: &str) -> Result<()> {
        writeln!(self.stdout, "{}", message)?;
        Ok(())
    }

    fn debug(&mut self, message: &str) -> Result<()> {
        if self.verbose {
            writeln!(self.stderr, "Debug: {}", message)?;
        }
        Ok(())
    }

    fn warn(&mut self, message: &str) -> Result<()> {
        writeln!(self.stderr, "Warning: {}", message)?;
        Ok(())
    }

    fn error(&mut self, message: &str) -> Result<()> {
        writeln!(self.stderr, "Error: {}", message)?;
        Ok(())
    }

    fn fatal(&mut self, message: &str) -> Result<()> {
        writeln!(self.stderr, "Fatal: {}", message)?;
        Ok(())
    }
}
