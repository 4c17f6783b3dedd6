//! Tools to check a single argument to a mocked method.
//!
//! The description builder already covers the common cases:
//! `takes`/`and` match by equality, `takes_any`/`and_any` accept
//! anything, and `takes_matching`/`and_matching` run a validator.
//! Anything implementing [`ArgMatcher`] can be passed to
//! `takes_with`/`and_with` for everything else.

mod any;
mod eq;
mod from_fn;
mod structural;

pub use any::{any, Any};
pub use eq::{eq, Eq};
pub use from_fn::from_fn;
pub use structural::{structural, Structural};

use std::fmt;

/// Matcher for a single argument of a method.
///
/// Implementors provide an expectation to match an argument against.
/// The [`fmt::Display`] implementation describes that expectation and
/// shows up in the failure message when the argument does not match.
///
/// # Examples
///
/// ```
/// use decoy::matcher::ArgMatcher;
/// use std::fmt::{self, Formatter};
///
/// struct IsEven;
///
/// impl ArgMatcher<i32> for IsEven {
///     fn matches(&self, argument: &i32) -> bool {
///         argument % 2 == 0
///     }
/// }
///
/// impl fmt::Display for IsEven {
///     fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
///         f.write_str("an even number")
///     }
/// }
///
/// assert!(IsEven.matches(&4));
/// assert!(IsEven.mismatch(&4).is_none());
/// assert_eq!(
///     IsEven.mismatch(&3).unwrap(),
///     "  expected: an even number\n  actual:   3"
/// );
/// ```
pub trait ArgMatcher<Arg: ?Sized>: fmt::Display {
    /// Checks if the argument matches the determined expectation.
    fn matches(&self, argument: &Arg) -> bool;

    /// Explains why the argument does not match, or `None` if it does.
    ///
    /// The default explanation shows the expectation next to the
    /// `Debug` rendering of the argument.
    fn mismatch(&self, argument: &Arg) -> Option<String>
    where
        Arg: fmt::Debug,
    {
        if self.matches(argument) {
            return None;
        }

        Some(format!("  expected: {}\n  actual:   {:?}", self, argument))
    }
}
