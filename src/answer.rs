use std::fmt::{self, Formatter};

/// What a described candidate returns once it is selected.
pub(crate) enum Answer<I, O> {
    /// The same value every call, cloned out.
    Fixed(Box<dyn Fn() -> O + Send>),
    /// Computed from the arguments of each call.
    Computed(Box<dyn FnMut(I) -> O + Send>),
}

impl<I, O> Answer<I, O> {
    pub fn fixed(value: O) -> Self
    where
        O: Clone + Send + 'static,
    {
        Answer::Fixed(Box::new(move || value.clone()))
    }

    pub fn from_fn(answer: impl FnMut(I) -> O + Send + 'static) -> Self {
        Answer::Computed(Box::new(answer))
    }

    pub fn call(&mut self, input: I) -> O {
        match self {
            Answer::Fixed(value) => value(),
            Answer::Computed(answer) => answer(input),
        }
    }
}

impl<I> Answer<I, ()> {
    /// For methods that return nothing.
    pub fn unit() -> Self {
        Answer::Fixed(Box::new(|| ()))
    }
}

impl<I, O> fmt::Debug for Answer<I, O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Fixed(_) => f.write_str("Fixed"),
            Answer::Computed(_) => f.write_str("Computed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clones_every_call() {
        let mut answer: Answer<(i32,), Vec<i32>> = Answer::fixed(vec![1, 2]);
        assert_eq!(answer.call((5,)), vec![1, 2]);
        assert_eq!(answer.call((6,)), vec![1, 2]);
    }

    #[test]
    fn from_fn_sees_the_arguments() {
        let mut total = 0;
        let mut answer: Answer<(i32, Vec<i32>), i32> =
            Answer::from_fn(move |(a, rest): (i32, Vec<i32>)| {
                total += a + rest.iter().sum::<i32>();
                total
            });
        assert_eq!(answer.call((1, vec![2, 3])), 6);
        assert_eq!(answer.call((1, vec![])), 7);
    }
}
