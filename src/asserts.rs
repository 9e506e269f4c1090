//! Assertion macros for test bodies.
//!
//! Each macro checks one condition and, on violation, unwinds with a
//! [`Failure`](crate::outcome::Failure) recording the cause, the call-site
//! line, and an expected-vs-received message. The first failing check
//! terminates the test body; later statements never run. Because
//! propagation is by unwinding, the macros also work inside helper
//! functions called from a test body.
//!
//! Equality and inequality use the operands' own `PartialEq`; there is no
//! coercion. `check_some!`/`check_none!` test `Option` validity, not value
//! truthiness.

/// Checks that a boolean expression is true.
#[macro_export]
macro_rules! check {
    ($cond:expr $(,)?) => {
        if !$cond {
            $crate::outcome::fail(
                $crate::outcome::FailureKind::Check,
                ::core::line!(),
                ::std::string::String::from("expected 'true', received 'false'"),
            );
        }
    };
}

/// Checks that two expressions compare equal.
///
/// Operands are evaluated exactly once and must implement `PartialEq` and
/// `Debug`; both values appear in the failure message.
#[macro_export]
macro_rules! check_eq {
    ($expected:expr, $received:expr $(,)?) => {
        match (&$expected, &$received) {
            (expected, received) => {
                if !(expected == received) {
                    $crate::outcome::fail(
                        $crate::outcome::FailureKind::Equality,
                        ::core::line!(),
                        ::std::format!("expected '{:?}', received '{:?}'", expected, received),
                    );
                }
            }
        }
    };
}

/// Checks that two expressions compare unequal.
#[macro_export]
macro_rules! check_ne {
    ($expected:expr, $received:expr $(,)?) => {
        match (&$expected, &$received) {
            (expected, received) => {
                if expected == received {
                    $crate::outcome::fail(
                        $crate::outcome::FailureKind::Inequality,
                        ::core::line!(),
                        ::std::format!(
                            "expected not '{:?}', received '{:?}'",
                            expected,
                            received
                        ),
                    );
                }
            }
        }
    };
}

/// Checks that an `Option` holds a value.
#[macro_export]
macro_rules! check_some {
    ($option:expr $(,)?) => {
        if ::std::option::Option::is_none(&$option) {
            $crate::outcome::fail(
                $crate::outcome::FailureKind::SomeExpected,
                ::core::line!(),
                ::std::string::String::from("expected a value, received 'None'"),
            );
        }
    };
}

/// Checks that an `Option` is `None`.
#[macro_export]
macro_rules! check_none {
    ($option:expr $(,)?) => {
        if ::std::option::Option::is_some(&$option) {
            $crate::outcome::fail(
                $crate::outcome::FailureKind::NoneExpected,
                ::core::line!(),
                ::std::string::String::from("expected 'None', received a value"),
            );
        }
    };
}

/// Checks that a `Result` is an error matching the given pattern.
///
/// Succeeding where an error was expected is a failure; failing with an
/// error the pattern does not match is a distinct failure. Both messages
/// name the expected pattern.
#[macro_export]
macro_rules! check_err {
    ($result:expr, $expected:pat $(,)?) => {{
        #[allow(unreachable_patterns, unused_variables)]
        match $result {
            ::std::result::Result::Err($expected) => {}
            ::std::result::Result::Err(_) => $crate::outcome::fail(
                $crate::outcome::FailureKind::ErrExpected,
                ::core::line!(),
                ::std::format!(
                    "expected '{}' to fail with '{}', received a different error",
                    ::core::stringify!($result),
                    ::core::stringify!($expected),
                ),
            ),
            ::std::result::Result::Ok(_) => $crate::outcome::fail(
                $crate::outcome::FailureKind::ErrExpected,
                ::core::line!(),
                ::std::format!(
                    "expected '{}' to fail with '{}', received success",
                    ::core::stringify!($result),
                    ::core::stringify!($expected),
                ),
            ),
        };
    }};
}

// ============================================================================
// Tests
// ============================================================================
