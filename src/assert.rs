use std::{
    fmt::{self, Formatter},
    ops::Deref,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use crate::{error::CountMismatch, label::Label, times::Times};

/// The number of calls expected of one described candidate.
pub(crate) struct Check {
    method: String,
    label: Label,
    calls: Arc<AtomicUsize>,
    times: Times,
}

impl Check {
    pub fn new(method: String, label: Label, calls: Arc<AtomicUsize>, times: Times) -> Self {
        Check {
            method,
            label,
            calls,
            times,
        }
    }

    fn verify(&self) -> Option<Failure> {
        let calls = self.calls.load(Ordering::SeqCst);
        self.times.check(calls).err().map(|mismatch| Failure {
            method: self.method.clone(),
            label: self.label.clone(),
            mismatch,
        })
    }
}

/// Verifies the call counts of a described mock.
///
/// Counts are never checked while the mock is in use; calling a
/// candidate more often than expected only shows up here. Verifying
/// does not reset anything, so it can be repeated.
///
/// ```
/// # use decoy::{Method, MethodSignature, Mocker};
/// let mut mocker = Mocker::new("Clock");
/// let tick: Method<(), ()> = mocker.method(MethodSignature::new("tick")).unwrap();
///
/// let (mock, assert) = mocker.describe().method(&tick).times(2).mock();
/// mock.call(&tick, ());
///
/// let mut failures = vec![];
/// assert!(!assert.verify(&mut |method: &str, message: &str| {
///     failures.push(format!("{}: {}", method, message))
/// }));
/// assert_eq!(failures, vec!["tick: expected exactly 2 calls, got 1"]);
/// ```
pub struct Assert {
    mock: String,
    checks: Vec<Check>,
}

impl Assert {
    pub(crate) fn new(mock: String, checks: Vec<Check>) -> Self {
        Assert { mock, checks }
    }

    fn unmet(&self) -> Report {
        Report {
            mock: self.mock.clone(),
            failures: self.checks.iter().filter_map(Check::verify).collect(),
        }
    }

    /// Checks every candidate against its expected number of calls.
    pub fn report(&self) -> Report {
        let report = self.unmet();
        for failure in &report.failures {
            tracing::warn!(
                mock = %self.mock,
                method = %failure.method,
                label = %failure.label,
                "{}",
                failure.mismatch
            );
        }
        report
    }

    /// Sends every unmet expectation to `reporter`, as the method name
    /// and the failure message. Returns whether all expectations were
    /// met.
    pub fn verify(&self, reporter: &mut impl Reporter) -> bool {
        let report = self.report();
        for failure in report.failures() {
            reporter.report(&failure.method, &failure.message());
        }
        report.is_ok()
    }

    /// Panics with every unmet expectation, if any.
    #[track_caller]
    pub fn check(&self) {
        let report = self.report();
        if !report.is_ok() {
            panic!("{}", report);
        }
    }

    /// Checks the expectations when the returned guard is dropped.
    ///
    /// If the thread is already panicking the unmet expectations are
    /// logged as a warning instead, so the first panic stays the one
    /// reported.
    ///
    /// ```should_panic
    /// # use decoy::{Method, MethodSignature, Mocker};
    /// let mut mocker = Mocker::new("Clock");
    /// let tick: Method<(), ()> = mocker.method(MethodSignature::new("tick")).unwrap();
    ///
    /// let (mock, assert) = mocker.describe().method(&tick).times(1).mock();
    /// let _guard = assert.guard();
    ///
    /// // `tick` is never called: panics when `_guard` goes out of scope
    /// ```
    pub fn guard(self) -> Guard {
        Guard { assert: self }
    }
}

impl fmt::Debug for Assert {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assert")
            .field("mock", &self.mock)
            .field("checks", &self.checks.len())
            .finish()
    }
}

/// Receives unmet expectations from [`Assert::verify`].
pub trait Reporter {
    fn report(&mut self, method: &str, message: &str);
}

impl<F: FnMut(&str, &str)> Reporter for F {
    fn report(&mut self, method: &str, message: &str) {
        self(method, message)
    }
}

/// Runs [`Assert::check`] on drop, or logs the report while
/// panicking. Created by [`Assert::guard`].
#[derive(Debug)]
pub struct Guard {
    assert: Assert,
}

impl Deref for Guard {
    type Target = Assert;

    fn deref(&self) -> &Assert {
        &self.assert
    }
}

impl Drop for Guard {
    fn drop(&mut self) {
        if !std::thread::panicking() {
            self.assert.check();
            return;
        }

        let report = self.assert.unmet();
        if !report.is_ok() {
            tracing::warn!(
                mock = %self.assert.mock,
                "Unmet expectations while panicking:\n{}",
                report
            );
        }
    }
}

/// The outcome of verifying a mock.
#[derive(Debug, Clone)]
pub struct Report {
    mock: String,
    failures: Vec<Failure>,
}

impl Report {
    /// Whether every expectation was met.
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(
                f,
                "mock for {}.{}: {}\n\tcandidate described at {}",
                self.mock,
                failure.method,
                failure.message(),
                failure.label
            )?;
        }
        Ok(())
    }
}

/// An unmet expectation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub method: String,
    pub label: Label,
    pub mismatch: CountMismatch,
}

impl Failure {
    pub fn message(&self) -> String {
        self.mismatch.to_string()
    }
}
