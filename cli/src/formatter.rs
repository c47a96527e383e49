use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Row, Table};
use echoprobe::{Outcome, Round, RunResult, Summary};
use std::fmt::Display;

/// Failing rounds listed before the table is cut short
const MAX_LISTED_FAILURES: usize = 20;

pub struct Formatter {
    max_failures: usize,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {
            max_failures: MAX_LISTED_FAILURES,
        }
    }

    pub fn format_run<V: Display>(&self, result: &RunResult<V>, summary: &Summary) -> String {
        let mut output = String::new();

        output.push_str(&self.format_overview(result, summary));
        output.push('\n');

        let failures: Vec<&Round<V>> = result.failures().collect();
        if !failures.is_empty() {
            output.push_str(&self.format_failures(&failures));
            output.push('\n');
        }

        output
    }

    fn format_overview<V>(&self, result: &RunResult<V>, summary: &Summary) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("Run").set_alignment(CellAlignment::Left),
            Cell::new("Value").set_alignment(CellAlignment::Left),
        ]));

        let rounds = if result.cancelled {
            format!(
                "{} of {} (cancelled)",
                result.rounds_completed, result.rounds_requested
            )
        } else {
            format!("{} of {}", result.rounds_completed, result.rounds_requested)
        };

        let rows = [
            ("Verdict", summary.verdict.to_string()),
            ("Seed", result.seed.to_string()),
            ("Domain", result.domain.clone()),
            ("Rounds", rounds),
            ("Passed", result.tally.passed.to_string()),
            ("Mismatched", result.tally.mismatched.to_string()),
            ("Adapter errors", result.tally.adapter_errors.to_string()),
        ];
        for (name, value) in rows {
            table.add_row(Row::from(vec![name.to_string(), value]));
        }

        table.to_string()
    }

    fn format_failures<V: Display>(&self, failures: &[&Round<V>]) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("Round").set_alignment(CellAlignment::Right),
            Cell::new("Expected").set_alignment(CellAlignment::Right),
            Cell::new("Observed").set_alignment(CellAlignment::Right),
            Cell::new("Outcome").set_alignment(CellAlignment::Left),
        ]));

        for round in failures.iter().take(self.max_failures) {
            let observed = round
                .observed
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string());
            let outcome = match &round.outcome {
                Outcome::Pass => "pass".to_string(),
                Outcome::Mismatch => "mismatch".to_string(),
                Outcome::AdapterError { stage, cause } => format!("{} failed: {}", stage, cause),
            };
            table.add_row(Row::from(vec![
                round.index.to_string(),
                round.input.to_string(),
                observed,
                outcome,
            ]));
        }

        let mut output = table.to_string();
        if failures.len() > self.max_failures {
            output.push_str(&format!(
                "\n... and {} more failing rounds (use --json for all)",
                failures.len() - self.max_failures
            ));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use echoprobe::{summarize, Engine, Faulty, FuzzConfig, IntRange, MemoryCell, Seed};

    #[test]
    fn test_format_passing_run_has_no_failure_table() {
        let result = Engine::new(FuzzConfig::new().with_rounds(3))
            .run(IntRange::default(), Seed(1), MemoryCell::new())
            .unwrap();
        let output = Formatter::default().format_run(&result, &summarize(&result));

        assert!(output.contains("PASS"));
        assert!(output.contains("3 of 3"));
        assert!(!output.contains("Expected"));
    }

    #[test]
    fn test_format_lists_failures() {
        let adapter = Faulty::new(MemoryCell::new()).fail_read(1);
        let result = Engine::new(FuzzConfig::new().with_rounds(3))
            .run(IntRange::default(), Seed(1), adapter)
            .unwrap();
        let output = Formatter::default().format_run(&result, &summarize(&result));

        assert!(output.contains("FAIL"));
        assert!(output.contains("Expected"));
        assert!(output.contains("read failed: injected read failure"));
    }

    #[test]
    fn test_format_truncates_long_failure_lists() {
        let mut adapter = Faulty::new(MemoryCell::new());
        for n in 0..30 {
            adapter = adapter.fail_write(n);
        }
        let result = Engine::new(FuzzConfig::new().with_rounds(30))
            .run(IntRange::default(), Seed(1), adapter)
            .unwrap();
        let output = Formatter::default().format_run(&result, &summarize(&result));

        assert!(output.contains("... and 10 more failing rounds"));
    }
}
