use std::fmt::{self, Formatter};

use thiserror::Error;

use crate::label::Label;

/// Failure to dispatch a call to a mocked method.
///
/// [`Mock::call`](crate::Mock::call) panics with the message of this
/// error; [`Mock::try_call`](crate::Mock::try_call) returns it.
#[derive(Debug, Error)]
pub enum CallError {
    /// The method was never described.
    #[error("unexpected call to mock for {mock}.{method}")]
    UnexpectedCall { mock: String, method: String },

    /// None of the described candidates accepted the arguments.
    #[error(
        "no matching candidate for call to mock for {mock}.{method} with args:\n\n\t{args}\n\nfailing candidates:\n{candidates}"
    )]
    NoMatchingCandidate {
        mock: String,
        method: String,
        args: RenderedArgs,
        candidates: FailedCandidates,
    },

    /// More than one described candidate accepted the arguments.
    #[error(
        "more than one candidate for call to mock for {mock}.{method} with args:\n\n\t{args}\n\nmatching candidates:\n{candidates}"
    )]
    AmbiguousMatch {
        mock: String,
        method: String,
        args: RenderedArgs,
        candidates: MatchingCandidates,
    },

    /// The method handle was registered on a different mocker.
    #[error("method {method} is not registered on mock for {mock}")]
    UnknownMethod { mock: String, method: String },
}

/// The `Debug` rendering of each argument of a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArgs(pub Vec<String>);

impl fmt::Display for RenderedArgs {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<no arguments>");
        }
        f.write_str(&self.0.join("\n\t"))
    }
}

/// A candidate that rejected a call, with the reason of every
/// mismatched parameter.
#[derive(Debug, Clone)]
pub struct FailedCandidate {
    pub label: Label,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct FailedCandidates(pub Vec<FailedCandidate>);

impl fmt::Display for FailedCandidates {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, candidate) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "\tcandidate described at {}:\n", candidate.label)?;
            for reason in &candidate.reasons {
                for line in reason.lines() {
                    write!(f, "\n\t\t{}", line)?;
                }
            }
        }
        Ok(())
    }
}

/// Every candidate that accepted an ambiguous call.
#[derive(Debug, Clone)]
pub struct MatchingCandidates(pub Vec<Label>);

impl fmt::Display for MatchingCandidates {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let lines: Vec<_> = self
            .0
            .iter()
            .map(|label| format!("\tcandidate described at {}", label))
            .collect();
        f.write_str(&lines.join("\n"))
    }
}

/// A parameter that did not match its expectation.
#[derive(Debug, Clone, Error)]
#[error("parameter #{position} \"{name}\" mismatch:\n{reason}")]
pub struct ArgumentMismatch {
    /// 1-based position of the parameter.
    pub position: usize,
    pub name: String,
    pub reason: String,
}

/// A user-supplied validator rejected a parameter.
#[derive(Debug, Clone, Error)]
#[error("parameter #{position} \"{name}\" custom matcher error: {message}")]
pub struct CustomMatcherError {
    /// 1-based position of the parameter.
    pub position: usize,
    pub name: String,
    pub message: String,
}

/// The observed number of calls did not satisfy a times policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CountMismatch {
    #[error("expected exactly {expected} calls, got {got}")]
    Exactly { expected: usize, got: usize },

    #[error("expected at least {expected} calls, got {got}")]
    AtLeast { expected: usize, got: usize },

    #[error("{0}")]
    Custom(String),
}

/// A method signature that cannot back the requested method handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("method {method} declares {declared} parameters but its argument tuple has {actual}")]
    Arity {
        method: String,
        declared: usize,
        actual: usize,
    },

    #[error("method {method} declares {declared} return values but its return type is {kind}")]
    Returns {
        method: String,
        declared: usize,
        kind: &'static str,
    },

    #[error("method {method} is already registered on mock for {mock}")]
    Duplicate { mock: String, method: String },
}
