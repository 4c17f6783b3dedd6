use std::{
    fmt::{self, Formatter},
    marker::PhantomData,
    sync::Arc,
};

use crate::signature::MethodSignature;

/// Typed handle to a method registered on a [`Mocker`](crate::Mocker).
///
/// `I` is the tuple of the method's parameters, with a variadic
/// parameter gathered into a trailing `Vec<T>`. `O` is what the method
/// returns: `()` when it returns nothing, a tuple when it returns
/// several values.
///
/// The same handle is used to describe the method and to call it on
/// the resulting [`Mock`](crate::Mock).
pub struct Method<I, O> {
    pub(crate) owner: u64,
    pub(crate) index: usize,
    pub(crate) signature: Arc<MethodSignature>,
    _marker: PhantomData<fn(I) -> O>,
}

impl<I, O> Method<I, O> {
    pub(crate) fn new(owner: u64, index: usize, signature: Arc<MethodSignature>) -> Self {
        Method {
            owner,
            index,
            signature,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        self.signature.name()
    }

    pub fn signature(&self) -> &MethodSignature {
        &self.signature
    }
}

// manual impls so neither `I` nor `O` need to be `Clone`/`Debug`
impl<I, O> Clone for Method<I, O> {
    fn clone(&self) -> Self {
        Method::new(self.owner, self.index, self.signature.clone())
    }
}

impl<I, O> fmt::Debug for Method<I, O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("signature", &self.signature.to_string())
            .finish()
    }
}
