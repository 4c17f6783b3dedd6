use std::{
    borrow::Borrow,
    fmt::{self, Formatter},
};

use super::ArgMatcher;
use crate::diff;

/// Equality matcher
///
/// It matches across borrows: `Eq<T>` implements not only
/// `ArgMatcher<T>`, but also `ArgMatcher<&T>`, and more generally
/// `ArgMatcher<Borrow<T>>`.
///
/// On mismatch it explains itself with a line diff of the pretty
/// `Debug` renderings of the expected and actual values.
#[derive(Debug, Clone)]
pub struct Eq<Expected>(Expected);

impl<Arg, Expected> ArgMatcher<Arg> for Eq<Expected>
where
    Arg: Borrow<Expected> + ?Sized,
    Expected: fmt::Debug + PartialEq,
{
    fn matches(&self, actual: &Arg) -> bool {
        &self.0 == actual.borrow()
    }

    fn mismatch(&self, actual: &Arg) -> Option<String>
    where
        Arg: fmt::Debug,
    {
        if self.matches(actual) {
            return None;
        }

        let expected = format!("{:#?}", self.0);
        let actual = format!("{:#?}", actual.borrow());
        Some(format!("(-expected +actual)\n{}", diff::lines(&expected, &actual)))
    }
}

impl<Expected: fmt::Debug> fmt::Display for Eq<Expected> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Creates an [`Eq`](struct@Eq) matcher.
pub fn eq<Expected: fmt::Debug + PartialEq>(expected: Expected) -> Eq<Expected> {
    Eq(expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Data {
        a: i32,
        b: u32,
    }

    #[test]
    fn matches_across_borrows() {
        let matcher = eq(Data { a: 1, b: 2 });
        assert!(matcher.matches(&Data { a: 1, b: 2 }));
        assert!(ArgMatcher::<Box<Data>>::matches(
            &matcher,
            &Box::new(Data { a: 1, b: 2 })
        ));
    }

    #[test]
    fn mismatch_is_a_diff() {
        let reason = eq(Data { a: 1, b: 2 })
            .mismatch(&Data { a: 1, b: 3 })
            .unwrap();

        assert_eq!(
            reason,
            "(-expected +actual)\n  Data {\n      a: 1,\n-     b: 2,\n+     b: 3,\n  }"
        );
    }
}
