use std::fmt::{self, Formatter};

use super::ArgMatcher;

/// A predicate together with the source text it was written as.
struct Predicate<F> {
    source: &'static str,
    predicate: F,
}

impl<Arg, F> ArgMatcher<Arg> for Predicate<F>
where
    Arg: ?Sized,
    F: Fn(&Arg) -> bool,
{
    fn matches(&self, argument: &Arg) -> bool {
        (self.predicate)(argument)
    }

    fn mismatch(&self, argument: &Arg) -> Option<String>
    where
        Arg: fmt::Debug,
    {
        if self.matches(argument) {
            None
        } else {
            Some(format!(
                "  expected: {}\n  actual:   {:?} does not satisfy it",
                self.source, argument
            ))
        }
    }
}

impl<F> fmt::Display for Predicate<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.source)
    }
}

/// Backs [`from_fn!`](crate::from_fn!) and [`pattern!`](crate::pattern!).
#[doc(hidden)]
pub fn from_fn<Arg>(
    predicate: impl Fn(&Arg) -> bool + Send + 'static,
    source: &'static str,
) -> impl ArgMatcher<Arg> + Send + 'static
where
    Arg: ?Sized,
{
    Predicate { source, predicate }
}

/// Turns a closure into an [`ArgMatcher`](crate::matcher::ArgMatcher).
///
/// The closure's source text is its description, so keep it short;
/// anything bigger deserves its own `ArgMatcher` implementation.
///
/// ```
/// use decoy::{from_fn, matcher::ArgMatcher};
///
/// let temporary = from_fn!(|key: &String| key.starts_with("tmp/"));
///
/// assert!(temporary.matches(&"tmp/cache".to_string()));
/// assert!(temporary
///     .mismatch(&"etc/hosts".to_string())
///     .unwrap()
///     .ends_with("actual:   \"etc/hosts\" does not satisfy it"));
/// ```
#[macro_export]
macro_rules! from_fn {
    ($predicate:expr) => {
        $crate::matcher::from_fn($predicate, stringify!($predicate))
    };
}

/// Matches arguments against a pattern, with an optional guard.
///
/// Write `pattern!(type => pattern)` when the argument type cannot be
/// inferred from where the matcher is used.
///
/// ```
/// use decoy::{pattern, matcher::ArgMatcher};
///
/// let small = pattern!(u8 => 0..=9);
/// assert!(small.matches(&3));
/// assert!(!small.matches(&30));
///
/// let found = pattern!(Option<i32> => Some(n) if *n >= 0);
/// assert!(found.matches(&Some(0)));
/// assert!(!found.matches(&Some(-3)));
/// assert!(!found.matches(&None));
/// ```
#[macro_export]
macro_rules! pattern {
    ($( $pattern:pat_param )|+ $( if $guard:expr )? $(,)?) => {
        $crate::matcher::from_fn(
            move |argument| matches!(argument, $($pattern)|+ $(if $guard)?),
            stringify!($($pattern)|+ $(if $guard)?),
        )
    };
    ($ty:ty => $( $pattern:pat_param )|+ $( if $guard:expr )? $(,)?) => {
        $crate::matcher::from_fn(
            move |argument: &$ty| matches!(argument, $($pattern)|+ $(if $guard)?),
            stringify!($($pattern)|+ $(if $guard)?),
        )
    };
}
