//! quipu: a self-registering test runtime for Rust binaries.
//!
//! Tests annotated with [`#[quipu::test]`](macro@test) register themselves
//! at link time: each annotation places one [`TestEntry`] record in a
//! dedicated linker section, with no central list, no call-site
//! registration, and no build step. A harness binary iterates the section,
//! runs the tests selected by its command-line name filters, and exits
//! with the count of failures.
//!
//! ```ignore
//! #[quipu::test]
//! fn arithmetic_holds() {
//!     quipu::check_eq!(2 + 2, 4);
//! }
//!
//! quipu::test_harness!();
//! ```
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: no `.unwrap()` / `.expect()`; the runtime modules enforce
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Assertion unwinds**: the check! macros unwind with a typed [`Failure`]
//!   payload that [`TestEntry::execute`] catches at the test boundary. They are
//!   the one sanctioned panic path, and it never escapes the runner.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod asserts;
pub mod harness;
pub mod outcome;
pub mod registry;
pub mod runner;

pub use harness::HarnessArgs;
pub use outcome::{Failure, FailureKind, Outcome};
pub use registry::{tests, TestEntry};
pub use runner::{run, ConsoleReporter, Reporter, RunOptions, RunSummary};

/// Declares a test function and registers it with the runtime.
pub use quipu_macros::test;

/// Re-exports for the expansion of `#[quipu::test]`. Not public API.
#[doc(hidden)]
pub mod __private {
    pub use linkme::{self, distributed_slice};
}
