use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use crate::{
    answer::Answer,
    args::Args,
    error::{CallError, FailedCandidate, FailedCandidates, MatchingCandidates, RenderedArgs},
    label::Label,
};

/// Checks one argument of the tuple; `Some` explains the mismatch.
pub(crate) type ArgCheck<I> = Box<dyn Fn(&I) -> Option<String> + Send>;

/// A sealed description of one acceptable call.
pub(crate) struct Descriptor<I, O> {
    label: Label,
    checks: Vec<ArgCheck<I>>,
    answer: Answer<I, O>,
    calls: Arc<AtomicUsize>,
}

impl<I, O> Descriptor<I, O> {
    pub fn new(
        label: Label,
        checks: Vec<ArgCheck<I>>,
        answer: Answer<I, O>,
        calls: Arc<AtomicUsize>,
    ) -> Self {
        Descriptor {
            label,
            checks,
            answer,
            calls,
        }
    }

    /// Every reason the arguments are rejected, in parameter order.
    fn mismatches(&self, input: &I) -> Vec<String> {
        self.checks.iter().filter_map(|check| check(input)).collect()
    }

    fn call(&mut self, input: I) -> O {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.call(input)
    }
}

/// The descriptors of one method, in declaration order.
pub(crate) struct Candidates<I, O>(Vec<Descriptor<I, O>>);

impl<I, O> Default for Candidates<I, O> {
    fn default() -> Self {
        Candidates(vec![])
    }
}

impl<I: Args, O> Candidates<I, O> {
    pub fn push(&mut self, descriptor: Descriptor<I, O>) {
        self.0.push(descriptor);
    }

    /// Selects the only candidate that accepts `input` and answers
    /// with it.
    ///
    /// Every candidate is evaluated, even after a match, so that an
    /// ambiguous description is always caught. Candidates whose call
    /// count is already satisfied are not skipped.
    pub fn resolve(&mut self, mock: &str, method: &str, input: I) -> Result<O, CallError> {
        if self.0.is_empty() {
            tracing::warn!(mock = %mock, method = %method, "Call to a method with no candidates");
            return Err(CallError::UnexpectedCall {
                mock: mock.to_string(),
                method: method.to_string(),
            });
        }

        let mut matched = vec![];
        let mut failed = vec![];
        for (i, candidate) in self.0.iter().enumerate() {
            let reasons = candidate.mismatches(&input);
            if reasons.is_empty() {
                matched.push(i);
            } else {
                failed.push(FailedCandidate {
                    label: candidate.label.clone(),
                    reasons,
                });
            }
        }

        match matched.as_slice() {
            [selected] => {
                let candidate = &mut self.0[*selected];
                tracing::debug!(
                    mock = %mock,
                    method = %method,
                    label = %candidate.label,
                    "Call resolved"
                );
                Ok(candidate.call(input))
            }
            [] => {
                tracing::warn!(
                    mock = %mock,
                    method = %method,
                    candidates = failed.len(),
                    "No candidate matched the call"
                );
                Err(CallError::NoMatchingCandidate {
                    mock: mock.to_string(),
                    method: method.to_string(),
                    args: RenderedArgs(input.render()),
                    candidates: FailedCandidates(failed),
                })
            }
            many => {
                tracing::warn!(
                    mock = %mock,
                    method = %method,
                    candidates = many.len(),
                    "More than one candidate matched the call"
                );
                Err(CallError::AmbiguousMatch {
                    mock: mock.to_string(),
                    method: method.to_string(),
                    args: RenderedArgs(input.render()),
                    candidates: MatchingCandidates(
                        many.iter().map(|&i| self.0[i].label.clone()).collect(),
                    ),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(
        label: &str,
        expected: i32,
        answer: &'static str,
    ) -> (Descriptor<(i32,), &'static str>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let check: ArgCheck<(i32,)> = Box::new(move |(actual,): &(i32,)| {
            if *actual == expected {
                None
            } else {
                Some(format!("wanted {}", expected))
            }
        });
        let descriptor = Descriptor::new(
            Label::Explicit(label.to_string()),
            vec![check],
            Answer::fixed(answer),
            calls.clone(),
        );
        (descriptor, calls)
    }

    #[test]
    fn selects_the_single_match() {
        let (one, one_calls) = candidate("one", 1, "first");
        let (two, two_calls) = candidate("two", 2, "second");
        let mut candidates = Candidates::default();
        candidates.push(one);
        candidates.push(two);

        assert_eq!(candidates.resolve("Foo", "bar", (2,)).unwrap(), "second");
        assert_eq!(one_calls.load(Ordering::SeqCst), 0);
        assert_eq!(two_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn reports_every_failed_candidate() {
        let (one, _) = candidate("one", 1, "first");
        let (two, _) = candidate("two", 2, "second");
        let mut candidates = Candidates::default();
        candidates.push(one);
        candidates.push(two);

        match candidates.resolve("Foo", "bar", (3,)) {
            Err(CallError::NoMatchingCandidate { args, candidates, .. }) => {
                assert_eq!(args, RenderedArgs(vec!["3".to_string()]));
                assert_eq!(candidates.0.len(), 2);
                assert_eq!(candidates.0[1].reasons, vec!["wanted 2".to_string()]);
            }
            other => panic!("unexpected resolution: {:?}", other),
        }
    }

    #[test]
    fn declaration_order_does_not_break_ties() {
        let (one, one_calls) = candidate("one", 1, "first");
        let (again, again_calls) = candidate("again", 1, "second");
        let mut candidates = Candidates::default();
        candidates.push(one);
        candidates.push(again);

        match candidates.resolve("Foo", "bar", (1,)) {
            Err(CallError::AmbiguousMatch { candidates, .. }) => {
                assert_eq!(
                    candidates.0,
                    vec![
                        Label::Explicit("one".to_string()),
                        Label::Explicit("again".to_string())
                    ]
                );
            }
            other => panic!("unexpected resolution: {:?}", other),
        }
        assert_eq!(one_calls.load(Ordering::SeqCst), 0);
        assert_eq!(again_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn ties_are_ambiguous_in_either_order() {
        let (again, _) = candidate("again", 1, "second");
        let (one, _) = candidate("one", 1, "first");
        let mut candidates = Candidates::default();
        candidates.push(again);
        candidates.push(one);

        match candidates.resolve("Foo", "bar", (1,)) {
            Err(CallError::AmbiguousMatch { candidates, .. }) => {
                assert_eq!(
                    candidates.0,
                    vec![
                        Label::Explicit("again".to_string()),
                        Label::Explicit("one".to_string())
                    ]
                );
            }
            other => panic!("unexpected resolution: {:?}", other),
        }
    }

    #[test]
    fn empty_is_unexpected() {
        let mut candidates: Candidates<(i32,), ()> = Candidates::default();
        assert!(matches!(
            candidates.resolve("Foo", "bar", (1,)),
            Err(CallError::UnexpectedCall { .. })
        ));
    }
}
