use std::fmt::{self, Formatter};

use crate::error::CountMismatch;

type Policy = Box<dyn Fn(usize) -> Result<(), CountMismatch> + Send + Sync>;

/// How many times a described candidate must be called.
///
/// The policy is only consulted when verifying, see
/// [`Assert`](crate::Assert). By default any number of calls,
/// including zero, is fine.
///
/// ```
/// use decoy::{CountMismatch, Times};
///
/// assert!(Times::exactly(2).check(2).is_ok());
/// assert_eq!(
///     Times::at_least(3).check(1),
///     Err(CountMismatch::AtLeast { expected: 3, got: 1 }),
/// );
/// ```
pub struct Times {
    policy: Policy,
    kind: Kind,
}

#[derive(Debug, Clone, Copy)]
enum Kind {
    Any,
    Exactly(usize),
    AtLeast(usize),
    Custom,
}

impl Times {
    /// Always satisfied.
    pub fn any() -> Self {
        Times {
            policy: Box::new(|_| Ok(())),
            kind: Kind::Any,
        }
    }

    pub fn exactly(expected: usize) -> Self {
        Times {
            policy: Box::new(move |got| {
                if got == expected {
                    Ok(())
                } else {
                    Err(CountMismatch::Exactly { expected, got })
                }
            }),
            kind: Kind::Exactly(expected),
        }
    }

    /// Satisfied by `expected` calls or more.
    pub fn at_least(expected: usize) -> Self {
        Times {
            policy: Box::new(move |got| {
                if got >= expected {
                    Ok(())
                } else {
                    Err(CountMismatch::AtLeast { expected, got })
                }
            }),
            kind: Kind::AtLeast(expected),
        }
    }

    /// Satisfied when `policy` returns `Ok`. The error message is
    /// reported as is.
    ///
    /// ```
    /// use decoy::Times;
    ///
    /// let even = Times::matching(|calls| {
    ///     if calls % 2 == 0 {
    ///         Ok(())
    ///     } else {
    ///         Err(format!("expected an even number of calls, got {}", calls))
    ///     }
    /// });
    ///
    /// assert!(even.check(4).is_ok());
    /// assert_eq!(
    ///     even.check(3).unwrap_err().to_string(),
    ///     "expected an even number of calls, got 3"
    /// );
    /// ```
    pub fn matching<E: fmt::Display>(
        policy: impl Fn(usize) -> Result<(), E> + Send + Sync + 'static,
    ) -> Self {
        Times {
            policy: Box::new(move |got| {
                policy(got).map_err(|e| CountMismatch::Custom(e.to_string()))
            }),
            kind: Kind::Custom,
        }
    }

    /// Checks an observed number of calls against the policy.
    pub fn check(&self, calls: usize) -> Result<(), CountMismatch> {
        (self.policy)(calls)
    }
}

impl Default for Times {
    fn default() -> Self {
        Times::any()
    }
}

impl fmt::Debug for Times {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.kind {
            Kind::Any => f.write_str("Times::any()"),
            Kind::Exactly(n) => write!(f, "Times::exactly({})", n),
            Kind::AtLeast(n) => write!(f, "Times::at_least({})", n),
            Kind::Custom => f.write_str("Times::matching(..)"),
        }
    }
}
