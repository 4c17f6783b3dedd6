use std::{
    collections::BTreeSet,
    fmt::{self, Formatter},
    marker::PhantomData,
};

use serde::Serialize;
use serde_json::Value;

use super::ArgMatcher;

type Comparison = Box<dyn Fn(&Value, &Value) -> bool + Send + Sync>;

/// Structural matcher
///
/// Compares the serialized forms of the expected and actual values
/// field by field, and explains a mismatch by listing every path
/// that differs. Paths are dot-separated field names or sequence
/// indices (`"owner.name"`, `"items.2"`); the root is the empty path.
///
/// Created with [`structural`].
///
/// ```
/// use decoy::matcher::{structural, ArgMatcher};
/// use serde::Serialize;
///
/// #[derive(Debug, Serialize)]
/// struct Entry {
///     key: String,
///     created_at: u64,
/// }
///
/// let matcher = structural(Entry { key: "foo".into(), created_at: 0 }).ignore("created_at");
///
/// assert!(matcher.matches(&Entry { key: "foo".into(), created_at: 1234 }));
/// assert_eq!(
///     matcher.mismatch(&Entry { key: "bar".into(), created_at: 0 }).unwrap(),
///     "  key:\n    - \"foo\"\n    + \"bar\"",
/// );
/// ```
pub struct Structural<T> {
    expected: Result<Value, String>,
    ignored: Vec<String>,
    overrides: Vec<(String, Comparison)>,
    _marker: PhantomData<fn(&T)>,
}

/// Creates a [`Structural`] matcher.
pub fn structural<T: Serialize>(expected: T) -> Structural<T> {
    Structural {
        expected: serde_json::to_value(&expected).map_err(|e| e.to_string()),
        ignored: vec![],
        overrides: vec![],
        _marker: PhantomData,
    }
}

impl<T> Structural<T> {
    /// Excludes a path, and everything under it, from the comparison.
    pub fn ignore(mut self, path: impl Into<String>) -> Self {
        self.ignored.push(path.into());
        self
    }

    /// Compares the values at a path with `compare` instead of
    /// equality.
    ///
    /// ```
    /// use decoy::matcher::{structural, ArgMatcher};
    ///
    /// let close_enough = structural((1.0_f64, "ratio"))
    ///     .compare_at("0", |expected, actual| {
    ///         match (expected.as_f64(), actual.as_f64()) {
    ///             (Some(e), Some(a)) => (e - a).abs() < 0.01,
    ///             _ => false,
    ///         }
    ///     });
    ///
    /// assert!(close_enough.matches(&(1.001, "ratio")));
    /// assert!(!close_enough.matches(&(1.1, "ratio")));
    /// ```
    pub fn compare_at(
        mut self,
        path: impl Into<String>,
        compare: impl Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.overrides.push((path.into(), Box::new(compare)));
        self
    }

    fn differences(&self, expected: &Value, actual: &Value) -> Vec<String> {
        let mut out = vec![];
        self.compare("", Some(expected), Some(actual), &mut out);
        out
    }

    fn compare(
        &self,
        path: &str,
        expected: Option<&Value>,
        actual: Option<&Value>,
        out: &mut Vec<String>,
    ) {
        if self.ignored.iter().any(|ignored| ignored == path) {
            return;
        }

        let (expected, actual) = match (expected, actual) {
            (Some(expected), Some(actual)) => (expected, actual),
            (None, None) => return,
            (expected, actual) => {
                out.push(difference(path, expected, actual));
                return;
            }
        };

        if let Some((_, compare)) = self.overrides.iter().find(|(p, _)| p == path) {
            if !compare(expected, actual) {
                out.push(difference(path, Some(expected), Some(actual)));
            }
            return;
        }

        match (expected, actual) {
            (Value::Object(e), Value::Object(a)) => {
                let keys: BTreeSet<&String> = e.keys().chain(a.keys()).collect();
                for key in keys {
                    self.compare(&child(path, key), e.get(key), a.get(key), out);
                }
            }
            (Value::Array(e), Value::Array(a)) => {
                for i in 0..e.len().max(a.len()) {
                    self.compare(&child(path, &i.to_string()), e.get(i), a.get(i), out);
                }
            }
            (e, a) if e != a => out.push(difference(path, Some(e), Some(a))),
            _ => {}
        }
    }
}

fn child(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", path, segment)
    }
}

fn difference(path: &str, expected: Option<&Value>, actual: Option<&Value>) -> String {
    let path = if path.is_empty() { "<root>" } else { path };
    let render = |value: Option<&Value>| match value {
        Some(value) => value.to_string(),
        None => "<missing>".to_string(),
    };

    format!(
        "  {}:\n    - {}\n    + {}",
        path,
        render(expected),
        render(actual)
    )
}

impl<T: Serialize> ArgMatcher<T> for Structural<T> {
    fn matches(&self, actual: &T) -> bool {
        self.explain(actual).is_none()
    }

    fn mismatch(&self, actual: &T) -> Option<String>
    where
        T: fmt::Debug,
    {
        self.explain(actual)
    }
}

impl<T: Serialize> Structural<T> {
    fn explain(&self, actual: &T) -> Option<String> {
        let expected = match &self.expected {
            Ok(expected) => expected,
            Err(e) => return Some(format!("  could not serialize expected value: {}", e)),
        };
        let actual = match serde_json::to_value(actual) {
            Ok(actual) => actual,
            Err(e) => return Some(format!("  could not serialize actual value: {}", e)),
        };

        let differences = self.differences(expected, &actual);
        if differences.is_empty() {
            None
        } else {
            Some(differences.join("\n"))
        }
    }
}

impl<T> fmt::Display for Structural<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.expected {
            Ok(expected) => write!(f, "{}", expected)?,
            Err(e) => write!(f, "<unserializable: {}>", e)?,
        }
        if !self.ignored.is_empty() {
            write!(f, " ignoring [{}]", self.ignored.join(", "))?;
        }
        Ok(())
    }
}
