//! Test execution and reporting.
//!
//! The runner consumes the registry iterator, applies exact-match name
//! filters, executes each selected test strictly sequentially, and
//! aggregates a [`RunSummary`] whose failure count becomes the process
//! exit status.
//!
//! ## Reporter trait
//!
//! Reporting is separated from execution behind the [`Reporter`] trait so
//! output formats can be swapped (and so tests can record outcomes instead
//! of printing them). [`ConsoleReporter`] is the default: one colored line
//! per executed test on stderr, then a summary line.

use std::panic;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use crate::outcome::Outcome;
use crate::registry::TestEntry;

/// Options for one run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Exact-match test names; empty means "run every registered test".
    pub filters: Vec<String>,
    /// Show per-test durations.
    pub verbose: bool,
    /// Stop after the first failing test.
    pub fail_fast: bool,
}

impl RunOptions {
    /// Whether a test with this id executes under the current filters.
    ///
    /// Exact name equality, not pattern matching. An entry matching several
    /// filters is still selected once.
    pub fn selects(&self, id: &str) -> bool {
        self.filters.is_empty() || self.filters.iter().any(|filter| filter == id)
    }
}

/// Aggregated result of a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    /// Tests present in the registry.
    pub registered: usize,
    /// Tests selected by the filters.
    pub selected: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration: Duration,
}

impl RunSummary {
    /// Failure count saturated to the process exit-status width.
    pub fn failure_status(&self) -> u8 {
        u8::try_from(self.failed).unwrap_or(u8::MAX)
    }

    /// Process exit status: the number of failed tests, 0 on full pass.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.failure_status())
    }
}

/// Trait for reporting test execution results.
pub trait Reporter {
    /// Called once before execution with the number of selected tests.
    fn on_collection_complete(&mut self, _selected: usize) {}

    /// Called after each executed test.
    fn on_test_complete(&mut self, id: &str, outcome: &Outcome, duration: Duration);

    /// Called once after the loop.
    fn on_run_complete(&mut self, _summary: &RunSummary) {}
}

/// Renders the uncolored report line for one executed test.
///
/// This is the reporting contract: identity, line, and message surfaced
/// together per failure. An unexpected panic carries no call-site line, so
/// its rendering omits one.
pub fn outcome_line(id: &str, outcome: &Outcome) -> String {
    match outcome {
        Outcome::Pass => format!("passed: '{id}'"),
        Outcome::Fail(failure) => format!(
            "failed: '{id}' on line {}: {}",
            failure.line, failure.message
        ),
        Outcome::Panicked(message) => format!("failed: '{id}': {message}"),
    }
}

/// Renders the closing summary line.
pub fn summary_line(summary: &RunSummary) -> String {
    format!(
        "====== {} passed, {} failed in {:.2}s ======",
        summary.passed,
        summary.failed,
        summary.duration.as_secs_f64()
    )
}

/// Default console reporter: colored per-test lines on stderr.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    pub verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Reporter for ConsoleReporter {
    fn on_test_complete(&mut self, id: &str, outcome: &Outcome, duration: Duration) {
        let color = if outcome.is_pass() {
            "\x1b[32m"
        } else {
            "\x1b[31m"
        };
        let line = outcome_line(id, outcome);
        if self.verbose {
            eprintln!("{color}{line}\x1b[0m ({:.0}ms)", duration.as_millis());
        } else {
            eprintln!("{color}{line}\x1b[0m");
        }
    }

    fn on_run_complete(&mut self, summary: &RunSummary) {
        let color = if summary.failed > 0 {
            "\x1b[1;31m"
        } else {
            "\x1b[1;32m"
        };
        eprintln!("{color}{}\x1b[0m", summary_line(summary));
    }
}

/// Executes every selected test in placement order and aggregates a
/// summary.
///
/// Tests run strictly sequentially; the runner blocks on each completion
/// before moving on. The default panic hook is silenced for the duration
/// of the loop so an unwinding assertion does not interleave the default
/// panic banner with the report lines, and restored afterwards.
pub fn run<'a>(
    entries: impl IntoIterator<Item = &'a TestEntry>,
    opts: &RunOptions,
    reporter: &mut dyn Reporter,
) -> RunSummary {
    let start = Instant::now();

    let entries: Vec<&TestEntry> = entries.into_iter().collect();
    let registered = entries.len();
    let selected: Vec<&TestEntry> = entries
        .into_iter()
        .filter(|entry| opts.selects(entry.id))
        .collect();

    tracing::debug!(registered, selected = selected.len(), "collected tests");
    reporter.on_collection_complete(selected.len());

    let mut summary = RunSummary {
        registered,
        selected: selected.len(),
        ..Default::default()
    };

    let previous_hook = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));

    for entry in selected {
        let test_start = Instant::now();
        let outcome = entry.execute();
        let duration = test_start.elapsed();

        if outcome.is_pass() {
            summary.passed += 1;
        } else {
            summary.failed += 1;
        }
        reporter.on_test_complete(entry.id, &outcome, duration);

        if opts.fail_fast && outcome.is_fail() {
            tracing::debug!(id = entry.id, "stopping on first failure");
            break;
        }
    }

    panic::set_hook(previous_hook);

    summary.duration = start.elapsed();
    reporter.on_run_complete(&summary);
    summary
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingReporter {
        collected: usize,
        executed: Vec<(String, Outcome)>,
        completed: bool,
    }

    impl Reporter for RecordingReporter {
        fn on_collection_complete(&mut self, selected: usize) {
            self.collected = selected;
        }

        fn on_test_complete(&mut self, id: &str, outcome: &Outcome, _duration: Duration) {
            self.executed.push((id.to_string(), outcome.clone()));
        }

        fn on_run_complete(&mut self, _summary: &RunSummary) {
            self.completed = true;
        }
    }

    fn passes() {}

    fn fails() {
        crate::check!(false);
    }

    fn entries() -> Vec<TestEntry> {
        vec![
            TestEntry {
                id: "alpha",
                run: passes,
            },
            TestEntry {
                id: "beta",
                run: fails,
            },
            TestEntry {
                id: "gamma",
                run: passes,
            },
        ]
    }

    #[test]
    fn unfiltered_run_executes_everything() {
        let entries = entries();
        let mut reporter = RecordingReporter::default();
        let summary = run(entries.iter(), &RunOptions::default(), &mut reporter);

        assert_eq!(summary.registered, 3);
        assert_eq!(summary.selected, 3);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(reporter.collected, 3);
        assert!(reporter.completed);

        let ids: Vec<&str> = reporter.executed.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, ["alpha", "beta", "gamma"]);
    }

    #[test]
    fn filters_select_the_exact_subset() {
        let entries = entries();
        let opts = RunOptions {
            filters: vec![String::from("beta")],
            ..Default::default()
        };
        let mut reporter = RecordingReporter::default();
        let summary = run(entries.iter(), &opts, &mut reporter);

        assert_eq!(summary.selected, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(reporter.executed.len(), 1);
        assert_eq!(reporter.executed[0].0, "beta");
    }

    #[test]
    fn duplicate_filters_run_an_entry_once() {
        let entries = entries();
        let opts = RunOptions {
            filters: vec![String::from("alpha"), String::from("alpha")],
            ..Default::default()
        };
        let mut reporter = RecordingReporter::default();
        let summary = run(entries.iter(), &opts, &mut reporter);

        assert_eq!(summary.selected, 1);
        assert_eq!(reporter.executed.len(), 1);
    }

    #[test]
    fn empty_intersection_runs_nothing_and_succeeds() {
        let entries = entries();
        let opts = RunOptions {
            filters: vec![String::from("no-such-test")],
            ..Default::default()
        };
        let mut reporter = RecordingReporter::default();
        let summary = run(entries.iter(), &opts, &mut reporter);

        assert_eq!(summary.selected, 0);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.failure_status(), 0);
        assert!(reporter.executed.is_empty());
    }

    #[test]
    fn empty_registry_is_a_clean_success() {
        let mut reporter = RecordingReporter::default();
        let summary = run([], &RunOptions::default(), &mut reporter);

        assert_eq!(summary.registered, 0);
        assert_eq!(summary.failure_status(), 0);
        assert!(reporter.completed);
    }

    #[test]
    fn fail_fast_stops_after_the_first_failure() {
        let entries = vec![
            TestEntry {
                id: "first",
                run: fails,
            },
            TestEntry {
                id: "second",
                run: passes,
            },
        ];
        let opts = RunOptions {
            fail_fast: true,
            ..Default::default()
        };
        let mut reporter = RecordingReporter::default();
        let summary = run(entries.iter(), &opts, &mut reporter);

        assert_eq!(reporter.executed.len(), 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.failure_status(), 1);
    }

    #[test]
    fn failure_status_saturates_at_the_exit_width() {
        let summary = RunSummary {
            failed: 300,
            ..Default::default()
        };
        assert_eq!(summary.failure_status(), u8::MAX);
    }
}
