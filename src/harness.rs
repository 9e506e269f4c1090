//! Binary surface for quipu test targets.
//!
//! A quipu harness is any binary that calls [`main`], usually through the
//! [`test_harness!`](crate::test_harness) macro in an integration-test
//! target declared with `harness = false`. Invocation:
//!
//! ```text
//! <binary> [OPTIONS] [NAME ...]
//! ```
//!
//! With no names, every registered test runs; with names, only tests whose
//! declared identifier exactly equals one of them. The exit status is the
//! count of failed tests.

use std::process::ExitCode;

use clap::Parser;

use crate::registry;
use crate::runner::{self, ConsoleReporter, RunOptions};

/// Command-line arguments accepted by a quipu harness binary.
#[derive(Parser, Debug)]
#[command(about = "Run the tests registered in this binary", long_about = None)]
pub struct HarnessArgs {
    /// Exact names of tests to run (every registered test when omitted)
    #[arg(value_name = "NAME")]
    pub names: Vec<String>,

    /// Show per-test durations
    #[arg(short, long)]
    pub verbose: bool,

    /// Stop on first failure
    #[arg(short = 'x', long = "exitfirst")]
    pub fail_fast: bool,
}

impl HarnessArgs {
    pub fn into_options(self) -> RunOptions {
        RunOptions {
            filters: self.names,
            verbose: self.verbose,
            fail_fast: self.fail_fast,
        }
    }
}

/// Harness entry point: parse arguments, run the registry, exit with the
/// failure count.
pub fn main() -> ExitCode {
    // Initialize structured logging with env-based filter, defaulting to info
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();

    run_with_args(HarnessArgs::parse())
}

/// Runs the registered tests with already-parsed arguments.
pub fn run_with_args(args: HarnessArgs) -> ExitCode {
    let opts = args.into_options();
    let mut reporter = ConsoleReporter::new(opts.verbose);
    let summary = runner::run(registry::tests(), &opts, &mut reporter);
    summary.exit_code()
}

/// Expands to a `fn main()` that runs the quipu harness.
///
/// For integration-test targets that opt out of libtest:
///
/// ```toml
/// [[test]]
/// name = "my_tests"
/// harness = false
/// ```
///
/// ```ignore
/// quipu::test_harness!();
/// ```
#[macro_export]
macro_rules! test_harness {
    () => {
        fn main() -> ::std::process::ExitCode {
            $crate::harness::main()
        }
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_invocation() {
        let args = HarnessArgs::try_parse_from(["harness"]).unwrap();
        assert!(args.names.is_empty());
        assert!(!args.verbose);
        assert!(!args.fail_fast);
    }

    #[test]
    fn parses_name_filters() {
        let args = HarnessArgs::try_parse_from(["harness", "alpha", "beta"]).unwrap();
        assert_eq!(args.names, ["alpha", "beta"]);
    }

    #[test]
    fn parses_flags() {
        let args = HarnessArgs::try_parse_from(["harness", "-v", "-x", "gamma"]).unwrap();
        assert!(args.verbose);
        assert!(args.fail_fast);
        assert_eq!(args.names, ["gamma"]);
    }

    #[test]
    fn args_convert_into_run_options() {
        let args = HarnessArgs::try_parse_from(["harness", "--exitfirst", "delta"]).unwrap();
        let opts = args.into_options();
        assert_eq!(opts.filters, ["delta"]);
        assert!(opts.fail_fast);
        assert!(!opts.verbose);
    }
}
