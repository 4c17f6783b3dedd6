use std::{
    fmt::{self, Formatter},
    panic::Location,
};

/// Where a candidate was described.
///
/// Only used in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    /// The call site of [`Describe::method`](crate::Describe::method).
    Caller(&'static Location<'static>),
    /// A label given through
    /// [`Describe::method_labeled`](crate::Describe::method_labeled).
    Explicit(String),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Label::Caller(location) => write!(f, "{}:{}", location.file(), location.line()),
            Label::Explicit(label) => f.write_str(label),
        }
    }
}
