//! The test registry: entries, the linker section, and iteration.
//!
//! Every `#[quipu::test]` expands to one [`TestEntry`] static placed in a
//! dedicated linker section via [`linkme::distributed_slice`]. The linker
//! synthesizes the section's start/stop symbols, so [`TESTS`] is a plain
//! slice whose bounds are resolved at load time: registration has no
//! runtime cost, no central list, and no build-time code generation.
//!
//! Portability lives entirely inside `linkme`: per-format section naming,
//! the keep-even-if-unreferenced directive, alignment and stride, and the
//! sentinel-bounded fallback on toolchains without automatic boundary
//! symbols. This module only ever observes a dense, typed slice. A target
//! `linkme` cannot support fails at build time, never at run time.

use std::any::Any;
use std::panic;

use linkme::distributed_slice;

use crate::outcome::{Failure, Outcome};

/// One registered test: the declared name plus the function to run.
///
/// Entries are created at link time, are immutable, and live for the whole
/// process. `id` is the test function's name; uniqueness is not enforced,
/// so colliding names register independently and both run under a filter.
#[derive(Debug, Clone, Copy)]
pub struct TestEntry {
    pub id: &'static str,
    /// The test body. A plain function pointer: no closure state.
    pub run: fn(),
}

/// Every test registered in this binary, in placement order.
///
/// Placement order is link-dependent and unrelated to declaration order
/// across files. A binary with no registered tests yields an empty slice,
/// which is not an error.
#[distributed_slice]
pub static TESTS: [TestEntry] = [..];

/// Iterates the registered tests in placement order.
///
/// The bounds resolve once per process, so re-iteration yields the same
/// sequence every time. The runner depends only on this function, never on
/// the placement mechanism behind it.
pub fn tests() -> impl Iterator<Item = &'static TestEntry> {
    TESTS.iter()
}

impl TestEntry {
    /// Runs the test body and converts whatever escapes it into an
    /// [`Outcome`].
    ///
    /// A [`Failure`] payload raised by the check! macros becomes
    /// [`Outcome::Fail`]; any other panic becomes [`Outcome::Panicked`]; a
    /// normal return is a pass.
    pub fn execute(&self) -> Outcome {
        match panic::catch_unwind(self.run) {
            Ok(()) => Outcome::Pass,
            Err(payload) => match payload.downcast::<Failure>() {
                Ok(failure) => Outcome::Fail(*failure),
                Err(payload) => Outcome::Panicked(panic_message(payload.as_ref())),
            },
        }
    }
}

/// Best-effort rendering of a non-assertion panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        String::from("test panicked with a non-string payload")
    }
}

// ============================================================================
// Tests
// ============================================================================
