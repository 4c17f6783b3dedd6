use super::ArgMatcher;
use std::fmt::{self, Formatter};

/// Matches any argument.
#[derive(Debug, Clone, Copy)]
pub struct Any;

impl<Arg: ?Sized> ArgMatcher<Arg> for Any {
    /// Always succeeds.
    fn matches(&self, _: &Arg) -> bool {
        true
    }
}

impl fmt::Display for Any {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("<any>")
    }
}

/// Returns an [`ArgMatcher`] that succeeds for any input.
pub fn any() -> Any {
    Any
}
