use std::{
    any::{self, Any, TypeId},
    fmt::{self, Formatter},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use crate::{
    args::Args,
    describe::Describe,
    error::SignatureError,
    method::Method,
    mock::{
        store::{Dispatch, Implementation, Slot, Store},
        Mock,
    },
    signature::MethodSignature,
};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Collects the methods of a mocked type.
///
/// Every method is registered once, from its [`MethodSignature`], and
/// yields a typed [`Method`] handle. The mocker then either describes
/// its methods with [`describe`](Self::describe), or, for full control,
/// receives plain implementations through
/// [`implement`](Self::implement) and becomes a [`Mock`] directly.
pub struct Mocker {
    pub(crate) id: u64,
    pub(crate) name: String,
    pub(crate) methods: Vec<Registered>,
}

pub(crate) struct Registered {
    pub(crate) signature: Arc<MethodSignature>,
    implementation: Option<Box<dyn Any + Send>>,
}

impl Mocker {
    /// Creates a mocker for a type; `type_name` is used in every
    /// diagnostic about the mock.
    pub fn new(type_name: impl Into<String>) -> Self {
        Mocker {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            name: type_name.into(),
            methods: vec![],
        }
    }

    /// Changes the name the mock goes by in diagnostics.
    ///
    /// ```
    /// use decoy::Mocker;
    ///
    /// let mocker = Mocker::new("KeyValues").rename("Store");
    /// assert_eq!(mocker.name(), "Store");
    /// ```
    pub fn rename(mut self, alias: impl Into<String>) -> Self {
        self.name = alias.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers a method.
    ///
    /// The handle's argument tuple must have one element per declared
    /// parameter, plus one for the variadic parameter if any, and its
    /// return type must be `()` exactly when no return types are
    /// declared.
    ///
    /// ```
    /// use decoy::{Method, MethodSignature, Mocker, SignatureError};
    ///
    /// let mut mocker = Mocker::new("Logger");
    ///
    /// let log: Method<(String, Vec<String>), ()> = mocker
    ///     .method(MethodSignature::new("log").param("format", "&str").variadic("args", "String"))
    ///     .unwrap();
    ///
    /// let bad: Result<Method<(String,), ()>, _> =
    ///     mocker.method(MethodSignature::new("flush").param("a", "i32").param("b", "i32"));
    /// assert!(matches!(bad, Err(SignatureError::Arity { declared: 2, actual: 1, .. })));
    /// ```
    pub fn method<I: Args, O: 'static>(
        &mut self,
        signature: MethodSignature,
    ) -> Result<Method<I, O>, SignatureError> {
        if signature.arity() != I::ARITY {
            return Err(SignatureError::Arity {
                method: signature.name().to_string(),
                declared: signature.arity(),
                actual: I::ARITY,
            });
        }

        let returns_unit = TypeId::of::<O>() == TypeId::of::<()>();
        if signature.return_types().is_empty() != returns_unit {
            return Err(SignatureError::Returns {
                method: signature.name().to_string(),
                declared: signature.return_types().len(),
                kind: any::type_name::<O>(),
            });
        }

        if self
            .methods
            .iter()
            .any(|registered| registered.signature.name() == signature.name())
        {
            return Err(SignatureError::Duplicate {
                mock: self.name.clone(),
                method: signature.name().to_string(),
            });
        }

        tracing::trace!(mock = %self.name, method = %signature, "Registered method");

        let signature = Arc::new(signature);
        let index = self.methods.len();
        self.methods.push(Registered {
            signature: signature.clone(),
            implementation: None,
        });
        Ok(Method::new(self.id, index, signature))
    }

    /// Answers every call to `method` with `implementation`, without
    /// checking arguments or counting calls.
    ///
    /// Only used by [`mock`](Self::mock); describing the mocker
    /// discards it.
    ///
    /// # Panics
    ///
    /// If `method` was registered on another mocker.
    pub fn implement<I: Args, O: 'static>(
        &mut self,
        method: &Method<I, O>,
        implementation: impl FnMut(I) -> O + Send + 'static,
    ) -> &mut Self {
        self.assert_owns(method);

        let implementation: Implementation<I, O> = Box::new(implementation);
        self.methods[method.index].implementation = Some(Box::new(implementation));
        self
    }

    /// Starts describing the mocked methods.
    pub fn describe(self) -> Describe {
        Describe::new(self)
    }

    /// Builds a mock from the implementations given so far. Methods
    /// without one fail every call as unexpected.
    pub fn mock(self) -> Mock {
        let slots = self
            .methods
            .into_iter()
            .map(|registered| {
                let dispatch = match registered.implementation {
                    Some(implementation) => Dispatch::Implemented(implementation),
                    None => Dispatch::Unexpected,
                };
                Slot::new(registered.signature, dispatch)
            })
            .collect();

        Mock::new(self.id, self.name, Store::new(slots))
    }

    pub(crate) fn assert_owns<I, O>(&self, method: &Method<I, O>) {
        if method.owner != self.id || method.index >= self.methods.len() {
            panic!(
                "method {} is not registered on mock for {}",
                method.name(),
                self.name
            );
        }
    }
}

impl fmt::Debug for Mocker {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let methods: Vec<_> = self
            .methods
            .iter()
            .map(|registered| registered.signature.to_string())
            .collect();

        f.debug_struct("Mocker")
            .field("name", &self.name)
            .field("methods", &methods)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_a_unit_handle_for_a_returning_method() {
        let mut mocker = Mocker::new("Foo");
        let result: Result<Method<(), ()>, _> =
            mocker.method(MethodSignature::new("bar").returns("i32"));

        assert_eq!(
            result.unwrap_err(),
            SignatureError::Returns {
                method: "bar".to_string(),
                declared: 1,
                kind: "()",
            }
        );
    }

    #[test]
    fn rejects_duplicates() {
        let mut mocker = Mocker::new("Foo");
        let _: Method<(), ()> = mocker.method(MethodSignature::new("bar")).unwrap();
        let again: Result<Method<(i32,), ()>, _> =
            mocker.method(MethodSignature::new("bar").param("a", "i32"));

        assert!(matches!(again, Err(SignatureError::Duplicate { .. })));
    }

    #[test]
    fn handles_are_per_mocker() {
        let mut first = Mocker::new("Foo");
        let mut second = Mocker::new("Foo");
        let bar: Method<(), ()> = first.method(MethodSignature::new("bar")).unwrap();
        let _: Method<(), ()> = second.method(MethodSignature::new("bar")).unwrap();

        let mock = second.mock();
        assert!(matches!(
            mock.try_call(&bar, ()),
            Err(crate::CallError::UnknownMethod { .. })
        ));
    }

    #[test]
    #[should_panic(expected = "method bar is not registered on mock for Other")]
    fn implementing_a_foreign_method_panics() {
        let mut first = Mocker::new("Foo");
        let bar: Method<(), ()> = first.method(MethodSignature::new("bar")).unwrap();

        Mocker::new("Other").implement(&bar, |_| ());
    }
}
