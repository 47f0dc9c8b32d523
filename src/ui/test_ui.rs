//! Test utilities for UI testing

use crate::error::Result;
use crate::ui::UI;

/// A UI implementation for testing that captures output in vectors
pub struct TestUI {
    pub output: Vec<String>,
    pub debug_lines: Vec<String>,
    pub errors: Vec<String>,
}

impl TestUI {
    pub fn new() -> Self {
        TestUI {
            output: Vec::new(),
            debug_lines: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Returns the captured warning messages (without their prefix).
    pub fn warnings(&self) -> Vec<&str> {
        self.errors
            .iter()
            .filter_map(|m| m.strip_prefix("Warning: "))
            .collect()
    }
}

impl Default for TestUI {
    fn default() -> Self {
        Self::new()
    }
}

impl UI for TestUI {
    fn info(&mut self, message: &str) -> Result<()> {
        self.output.push(message.to_string());
        Ok(())
    }

    fn debug(&mut self, message: &str) -> Result<()> {
        self.debug_lines.push(message.to_string());
        Ok(())
    }

    fn warn(&mut self, message: &str) -> Result<()> {
        self.errors.push(format!("Warning: {}", message));
        Ok(())
    }

    fn error(&mut self, message: &str) -> Result<()> {
        self.errors.push(message.to_string());
        Ok(())
    }

    fn fatal(&mut self, message: &str) -> Result<()> {
        self.errors.push(format!("Fatal: {}", message));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_ui_captures_severities() {
        let mut ui = TestUI::new();
        ui.info("a").unwrap();
        ui.debug("b").unwrap();
        ui.warn("c").unwrap();
        assert_eq!(ui.output, vec!["a"]);
        assert_eq!(ui.debug_lines, vec!["b"]);
        assert_eq!(ui.warnings(), vec!["c"]);
    }
}
