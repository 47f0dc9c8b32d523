//! Build a time-boxed test selection from a previously produced report

use crate::commands::Command;
use crate::error::Result;
use crate::record::Record;
use crate::report::ReportStore;
use crate::ui::UI;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// File name of the selection plan for a given budget.
pub fn arrange_file_name(budget_ms: u64) -> String {
    format!("perf_arrange_{}ms.txt", budget_ms)
}

/// Greedily select the fastest records that fit within `budget_ms`.
///
/// The store is reordered fastest-first; selection stops at the first record
/// whose time would push the running total past the budget, which also
/// excludes every slower record after it.
pub fn select_within_budget(store: &mut ReportStore, budget_ms: u64) -> Vec<&Record> {
    store.sort_ascending_by_time();

    let mut selected = Vec::new();
    let mut running = 0u64;
    for record in &store.records {
        if running + record.elapsed_ms > budget_ms {
            break;
        }
        running += record.elapsed_ms;
        selected.push(record);
    }
    selected
}

pub struct ArrangeCommand {
    baseline_path: PathBuf,
    out_dir: PathBuf,
    budget_ms: u64,
}

impl ArrangeCommand {
    pub fn new(baseline_path: PathBuf, out_dir: PathBuf, budget_ms: u64) -> Self {
        ArrangeCommand {
            baseline_path,
            out_dir,
            budget_ms,
        }
    }
}

impl Command for ArrangeCommand {
    fn execute(&self, ui: &mut dyn UI) -> Result<i32> {
        let mut store = ReportStore::load(&self.baseline_path)?;
        let selected = select_within_budget(&mut store, self.budget_ms);

        let plan_path = self.out_dir.join(arrange_file_name(self.budget_ms));
        let mut file = fs::File::create(&plan_path)?;
        for record in &selected {
            writeln!(file, "{}", record.name)?;
        }

        ui.info(&format!(
            "Selected {} test(s) within a {} ms budget",
            selected.len(),
            self.budget_ms
        ))?;
        ui.info(&format!("Plan written to {}", plan_path.display()))?;

        Ok(0)
    }

    fn name(&self) -> &str {
        "arrange"
    }

    fn help(&self) -> &str {
        "Select the fastest tests that fit a time budget"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Outcome;
    use crate::ui::test_ui::TestUI;
    use tempfile::TempDir;

    fn sample_store() -> ReportStore {
        ReportStore::from_records(vec![
            Record::new("A", Outcome::Passed, 10),
            Record::new("B", Outcome::Passed, 15),
            Record::new("C", Outcome::Passed, 5),
        ])
    }

    #[test]
    fn test_selection_is_ascending_and_budget_bounded() {
        let mut store = sample_store();
        let selected = select_within_budget(&mut store, 20);
        let names: Vec<&str> = selected.iter().map(|r| r.name.as_str()).collect();
        // Running totals 5, 15; B would reach 30 and is excluded.
        assert_eq!(names, vec!["C", "A"]);
    }

    #[test]
    fn test_selection_stops_at_first_overflow() {
        let mut store = ReportStore::from_records(vec![
            Record::new("small", Outcome::Passed, 1),
            Record::new("huge", Outcome::Passed, 100),
            Record::new("also_small", Outcome::Passed, 1),
        ]);
        // also_small sorts before huge and still fits; huge stops the scan.
        let selected = select_within_budget(&mut store, 10);
        let names: Vec<&str> = selected.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["small", "also_small"]);
    }

    #[test]
    fn test_zero_budget_selects_only_zero_time_tests() {
        let mut store = ReportStore::from_records(vec![
            Record::new("instant", Outcome::Passed, 0),
            Record::new("slow", Outcome::Passed, 1),
        ]);
        let selected = select_within_budget(&mut store, 0);
        let names: Vec<&str> = selected.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["instant"]);
    }

    #[test]
    fn test_arrange_file_name_encodes_budget() {
        assert_eq!(arrange_file_name(20), "perf_arrange_20ms.txt");
    }

    #[test]
    fn test_arrange_command_writes_plan() {
        let temp = TempDir::new().unwrap();
        let baseline_path = temp.path().join("baseline.txt");
        sample_store().save(&baseline_path, "old.log").unwrap();

        let mut ui = TestUI::new();
        let cmd = ArrangeCommand::new(baseline_path, temp.path().to_path_buf(), 20);
        assert_eq!(cmd.execute(&mut ui).unwrap(), 0);

        let plan = fs::read_to_string(temp.path().join("perf_arrange_20ms.txt")).unwrap();
        assert_eq!(plan, "C\nA\n");
        assert!(ui
            .output
            .iter()
            .any(|l| l.contains("Selected 2 test(s)")));
    }
}
