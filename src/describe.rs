use std::{
    any::Any,
    fmt::{self, Formatter},
    marker::PhantomData,
    panic::Location,
    sync::{atomic::AtomicUsize, Arc},
};

use crate::{
    answer::Answer,
    args::{ArgAt, Args, Complete, Subsequent, P0},
    assert::{Assert, Check},
    error::{ArgumentMismatch, CustomMatcherError},
    label::Label,
    matcher::{self, ArgMatcher},
    method::Method,
    mock::{
        descriptor::{ArgCheck, Candidates, Descriptor},
        store::{Dispatch, Slot, Store},
        Mock,
    },
    mocker::Mocker,
    times::Times,
};

/// Describes how the methods of a [`Mocker`] behave.
///
/// Each call to [`method`](Self::method) starts a new candidate for
/// that method. Its arguments are then bound one by one, in declared
/// order, followed by the returned value and optionally by how many
/// times it must be called:
///
/// ```
/// # use decoy::{Method, MethodSignature, Mocker};
/// let mut mocker = Mocker::new("KeyValues");
/// let get: Method<(String,), (i32, Option<String>)> = mocker
///     .method(
///         MethodSignature::new("get")
///             .param("key", "&str")
///             .returns("i32")
///             .returns("Option<String>"),
///     )
///     .unwrap();
///
/// let (mock, assert) = mocker
///     .describe()
///     .method(&get)
///     .takes("foo")
///     .returns((42, None))
///     .times(1)
///     .method(&get)
///     .takes_matching(|key: &String| {
///         if key.starts_with("tmp/") {
///             Ok(())
///         } else {
///             Err("not temporary")
///         }
///     })
///     .returns((0, None))
///     .mock();
///
/// assert_eq!(mock.call(&get, ("foo".into(),)), (42, None));
/// assert_eq!(mock.call(&get, ("tmp/a".into(),)), (0, None));
/// assert.check();
/// ```
///
/// Steps that do not apply do not compile: arguments cannot be
/// skipped, nothing can be described after all arguments are bound
/// but the returned value is missing, and `takes` is only available
/// for the first argument.
///
/// A `Describe` can be kept in a variable and continued later, so a
/// description may be spread over several statements.
pub struct Describe {
    mocker: Mocker,
    // `Candidates<I, O>` of each registered method, once described
    registry: Vec<Option<Box<dyn Any + Send>>>,
    checks: Vec<Check>,
}

struct Draft<I, O> {
    method: Method<I, O>,
    label: Label,
    checks: Vec<ArgCheck<I>>,
}

/// A candidate whose arguments are being bound. `P` is the position of
/// the next argument.
pub struct Describing<I, O, P> {
    describe: Describe,
    draft: Draft<I, O>,
    _position: PhantomData<fn() -> P>,
}

/// A candidate whose returned value is known.
pub struct Returning<I, O> {
    describe: Describe,
    draft: Draft<I, O>,
    answer: Answer<I, O>,
}

impl Describe {
    pub(crate) fn new(mocker: Mocker) -> Self {
        let registry = mocker.methods.iter().map(|_| None).collect();
        Describe {
            mocker,
            registry,
            checks: vec![],
        }
    }

    /// Starts a candidate for `method`, labeled with the location of
    /// this call.
    ///
    /// # Panics
    ///
    /// If `method` was registered on another mocker.
    #[track_caller]
    pub fn method<I: Args, O: 'static>(self, method: &Method<I, O>) -> Describing<I, O, P0> {
        self.start(method, Label::Caller(Location::caller()))
    }

    /// Starts a candidate for `method` with an explicit label.
    ///
    /// # Panics
    ///
    /// If `method` was registered on another mocker.
    pub fn method_labeled<I: Args, O: 'static>(
        self,
        method: &Method<I, O>,
        label: impl Into<String>,
    ) -> Describing<I, O, P0> {
        self.start(method, Label::Explicit(label.into()))
    }

    /// Finishes the description.
    ///
    /// Returns the mock and the assertions to verify once the mock is
    /// done being used. Methods with no candidates fail every call as
    /// unexpected, even if the mocker had an implementation for them.
    pub fn mock(self) -> (Mock, Assert) {
        let Describe {
            mocker,
            registry,
            checks,
        } = self;

        let slots = mocker
            .methods
            .into_iter()
            .zip(registry)
            .map(|(registered, candidates)| {
                let dispatch = match candidates {
                    Some(candidates) => Dispatch::Described(candidates),
                    None => Dispatch::Unexpected,
                };
                Slot::new(registered.signature, dispatch)
            })
            .collect();

        let mock = Mock::new(mocker.id, mocker.name.clone(), Store::new(slots));
        (mock, Assert::new(mocker.name, checks))
    }

    fn start<I: Args, O: 'static>(
        self,
        method: &Method<I, O>,
        label: Label,
    ) -> Describing<I, O, P0> {
        self.mocker.assert_owns(method);

        Describing {
            describe: self,
            draft: Draft {
                method: method.clone(),
                label,
                checks: vec![],
            },
            _position: PhantomData,
        }
    }

    fn seal<I: Args, O: 'static>(
        mut self,
        draft: Draft<I, O>,
        answer: Answer<I, O>,
        times: Times,
    ) -> Self {
        let Draft {
            method,
            label,
            checks,
        } = draft;
        let calls = Arc::new(AtomicUsize::new(0));

        tracing::trace!(
            mock = %self.mocker.name,
            method = %method.name(),
            label = %label,
            times = ?times,
            "Sealed candidate"
        );

        self.checks.push(Check::new(
            method.name().to_string(),
            label.clone(),
            calls.clone(),
            times,
        ));

        let candidates = self.registry[method.index]
            .get_or_insert_with(|| Box::new(Candidates::<I, O>::default()));
        match candidates.downcast_mut::<Candidates<I, O>>() {
            Some(candidates) => candidates.push(Descriptor::new(label, checks, answer, calls)),
            // handles are only created by `Mocker::method`, which fixes
            // the types of each index
            None => panic!("method {} described with another handle type", method.name()),
        }

        self
    }
}

impl fmt::Debug for Describe {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Describe")
            .field("mocker", &self.mocker)
            .field("candidates", &self.checks.len())
            .finish()
    }
}

impl<I, O, P> Describing<I, O, P>
where
    I: ArgAt<P>,
{
    fn bind(
        mut self,
        check: impl Fn(&I) -> Option<String> + Send + 'static,
    ) -> Describing<I, O, I::Next> {
        self.draft.checks.push(Box::new(check));
        Describing {
            describe: self.describe,
            draft: self.draft,
            _position: PhantomData,
        }
    }

    fn bind_matcher(
        self,
        matcher: impl ArgMatcher<I::Value> + Send + 'static,
    ) -> Describing<I, O, I::Next> {
        let position = I::POSITION + 1;
        let name = self.draft.method.signature.param_name(I::POSITION);

        self.bind(move |input| {
            matcher.mismatch(input.arg()).map(|reason| {
                ArgumentMismatch {
                    position,
                    name: name.clone(),
                    reason,
                }
                .to_string()
            })
        })
    }

    fn bind_validator<E: fmt::Display>(
        self,
        validator: impl Fn(&I::Value) -> Result<(), E> + Send + 'static,
    ) -> Describing<I, O, I::Next> {
        let position = I::POSITION + 1;
        let name = self.draft.method.signature.param_name(I::POSITION);

        self.bind(move |input| {
            validator(input.arg()).err().map(|e| {
                CustomMatcherError {
                    position,
                    name: name.clone(),
                    message: e.to_string(),
                }
                .to_string()
            })
        })
    }
}

impl<I, O> Describing<I, O, P0>
where
    I: ArgAt<P0>,
{
    /// Expects the first argument to equal `expected`.
    ///
    /// On mismatch the failure shows a diff of the pretty `Debug`
    /// renderings.
    pub fn takes(
        self,
        expected: impl Into<<I as ArgAt<P0>>::Value>,
    ) -> Describing<I, O, <I as ArgAt<P0>>::Next>
    where
        <I as ArgAt<P0>>::Value: PartialEq + Send,
    {
        self.bind_matcher(matcher::eq(expected.into()))
    }

    /// Accepts any first argument.
    pub fn takes_any(self) -> Describing<I, O, <I as ArgAt<P0>>::Next> {
        self.bind_matcher(matcher::any())
    }

    /// Accepts the first argument when `validator` returns `Ok`. The
    /// error is shown when the call matches no candidate.
    pub fn takes_matching<E: fmt::Display>(
        self,
        validator: impl Fn(&<I as ArgAt<P0>>::Value) -> Result<(), E> + Send + 'static,
    ) -> Describing<I, O, <I as ArgAt<P0>>::Next> {
        self.bind_validator(validator)
    }

    /// Checks the first argument with any [`ArgMatcher`].
    pub fn takes_with(
        self,
        matcher: impl ArgMatcher<<I as ArgAt<P0>>::Value> + Send + 'static,
    ) -> Describing<I, O, <I as ArgAt<P0>>::Next> {
        self.bind_matcher(matcher)
    }
}

impl<I, O, P> Describing<I, O, P>
where
    I: ArgAt<P>,
    P: Subsequent,
{
    /// Expects the next argument to equal `expected`.
    pub fn and(self, expected: impl Into<I::Value>) -> Describing<I, O, I::Next>
    where
        I::Value: PartialEq + Send,
    {
        self.bind_matcher(matcher::eq(expected.into()))
    }

    /// Accepts any next argument.
    pub fn and_any(self) -> Describing<I, O, I::Next> {
        self.bind_matcher(matcher::any())
    }

    /// Accepts the next argument when `validator` returns `Ok`.
    pub fn and_matching<E: fmt::Display>(
        self,
        validator: impl Fn(&I::Value) -> Result<(), E> + Send + 'static,
    ) -> Describing<I, O, I::Next> {
        self.bind_validator(validator)
    }

    /// Checks the next argument with any [`ArgMatcher`].
    pub fn and_with(
        self,
        matcher: impl ArgMatcher<I::Value> + Send + 'static,
    ) -> Describing<I, O, I::Next> {
        self.bind_matcher(matcher)
    }
}

impl<I, O, P> Describing<I, O, P>
where
    I: Complete<P>,
    O: 'static,
{
    /// Returns a clone of `value` on every matching call.
    pub fn returns(self, value: O) -> Returning<I, O>
    where
        O: Clone + Send,
    {
        self.answer(Answer::fixed(value))
    }

    /// Computes the returned value from the arguments of each matching
    /// call.
    ///
    /// ```
    /// # use decoy::{Method, MethodSignature, Mocker};
    /// let mut mocker = Mocker::new("Math");
    /// let sum: Method<(i32, Vec<i32>), i32> = mocker
    ///     .method(
    ///         MethodSignature::new("sum")
    ///             .param("first", "i32")
    ///             .variadic("rest", "i32")
    ///             .returns("i32"),
    ///     )
    ///     .unwrap();
    ///
    /// let (mock, _) = mocker
    ///     .describe()
    ///     .method(&sum)
    ///     .takes_any()
    ///     .and_any()
    ///     .returns_from(|(first, rest)| first + rest.iter().sum::<i32>())
    ///     .mock();
    ///
    /// assert_eq!(mock.call(&sum, (1, vec![2, 3])), 6);
    /// ```
    pub fn returns_from(self, answer: impl FnMut(I) -> O + Send + 'static) -> Returning<I, O> {
        self.answer(Answer::from_fn(answer))
    }

    fn answer(self, answer: Answer<I, O>) -> Returning<I, O> {
        Returning {
            describe: self.describe,
            draft: self.draft,
            answer,
        }
    }
}

impl<I, P> Describing<I, (), P>
where
    I: Complete<P>,
{
    fn into_parts(self) -> (Describe, Draft<I, ()>, Answer<I, ()>) {
        (self.describe, self.draft, Answer::unit())
    }
}

impl<I: Args, O: 'static> Returning<I, O> {
    fn into_parts(self) -> (Describe, Draft<I, O>, Answer<I, O>) {
        (self.describe, self.draft, self.answer)
    }
}

// the steps that seal the candidate, for every state where it is
// complete
macro_rules! ready_steps {
    ($ty:ty, [$($generics:tt)*], [$($bounds:tt)*]) => {
        impl<$($generics)*> $ty
        where
            $($bounds)*
        {
            /// Expects exactly `n` matching calls.
            pub fn times(self, n: usize) -> Describe {
                self.seal(Times::exactly(n))
            }

            /// Expects `n` or more matching calls.
            pub fn at_least_times(self, n: usize) -> Describe {
                self.seal(Times::at_least(n))
            }

            /// Checks the number of matching calls with `policy`.
            pub fn times_matching<E: fmt::Display>(
                self,
                policy: impl Fn(usize) -> Result<(), E> + Send + Sync + 'static,
            ) -> Describe {
                self.seal(Times::matching(policy))
            }

            /// Seals this candidate, with no expectation on its number
            /// of calls, and starts one for `method`.
            #[track_caller]
            pub fn method<A: Args, R: 'static>(
                self,
                method: &Method<A, R>,
            ) -> Describing<A, R, P0> {
                let label = Label::Caller(Location::caller());
                self.seal(Times::any()).start(method, label)
            }

            /// Seals this candidate and starts a labeled one for
            /// `method`.
            pub fn method_labeled<A: Args, R: 'static>(
                self,
                method: &Method<A, R>,
                label: impl Into<String>,
            ) -> Describing<A, R, P0> {
                self.seal(Times::any()).method_labeled(method, label)
            }

            /// Seals this candidate and finishes the description.
            pub fn mock(self) -> (Mock, Assert) {
                self.seal(Times::any()).mock()
            }

            fn seal(self, times: Times) -> Describe {
                let (describe, draft, answer) = self.into_parts();
                describe.seal(draft, answer, times)
            }
        }
    };
}

ready_steps!(Describing<I, (), P>, [I, P], [I: Complete<P>]);
ready_steps!(Returning<I, O>, [I, O], [I: Args, O: 'static]);
