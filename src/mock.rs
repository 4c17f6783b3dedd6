pub(crate) mod descriptor;
pub(crate) mod store;

use std::{
    fmt::{self, Formatter},
    sync::Arc,
};

use crate::{args::Args, error::CallError, method::Method};

use self::store::Store;

/// A mocked object.
///
/// Calls to it are resolved against what was described for each
/// method. It is cheap to clone, and clones share the same candidates
/// and call counts. It can be shared across threads.
#[derive(Clone)]
pub struct Mock {
    inner: Arc<Inner>,
}

struct Inner {
    id: u64,
    name: String,
    store: Store,
}

impl Mock {
    pub(crate) fn new(id: u64, name: String, store: Store) -> Self {
        Mock {
            inner: Arc::new(Inner { id, name, store }),
        }
    }

    /// The name used for this mock in diagnostics.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Calls a mocked method.
    ///
    /// # Panics
    ///
    /// If the call cannot be dispatched, with the message of the
    /// [`CallError`] that [`try_call`](Self::try_call) would return.
    ///
    /// ```should_panic
    /// use decoy::{Method, MethodSignature, Mocker};
    ///
    /// let mut mocker = Mocker::new("Clock");
    /// let now: Method<(), u64> = mocker
    ///     .method(MethodSignature::new("now").returns("u64"))
    ///     .unwrap();
    /// let mock = mocker.mock();
    ///
    /// // panics: "unexpected call to mock for Clock.now"
    /// mock.call(&now, ());
    /// ```
    #[track_caller]
    pub fn call<I: Args, O: 'static>(&self, method: &Method<I, O>, args: I) -> O {
        match self.try_call(method, args) {
            Ok(output) => output,
            Err(e) => panic!("{}", e),
        }
    }

    /// Calls a mocked method, returning why it failed instead of
    /// panicking.
    pub fn try_call<I: Args, O: 'static>(
        &self,
        method: &Method<I, O>,
        args: I,
    ) -> Result<O, CallError> {
        if method.owner != self.inner.id {
            tracing::warn!(
                mock = %self.inner.name,
                method = %method.name(),
                "Call with a method of another mock"
            );
            return Err(CallError::UnknownMethod {
                mock: self.inner.name.clone(),
                method: method.name().to_string(),
            });
        }

        self.inner.store.call(&self.inner.name, method.index, args)
    }
}

impl fmt::Debug for Mock {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let methods: Vec<_> = self
            .inner
            .store
            .methods()
            .map(|signature| signature.to_string())
            .collect();

        f.debug_struct("Mock")
            .field("name", &self.inner.name)
            .field("methods", &methods)
            .finish()
    }
}
