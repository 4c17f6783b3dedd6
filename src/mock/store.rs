use std::{any::Any, sync::Arc};

use parking_lot::Mutex;

use super::descriptor::Candidates;
use crate::{args::Args, error::CallError, signature::MethodSignature};

/// A direct implementation of a method, bypassing candidate resolution.
pub(crate) type Implementation<I, O> = Box<dyn FnMut(I) -> O + Send>;

/// How calls to one method are answered.
///
/// The boxed values are `Implementation<I, O>` and `Candidates<I, O>`
/// for the `I` and `O` of the method's handle.
pub(crate) enum Dispatch {
    Unexpected,
    Implemented(Box<dyn Any + Send>),
    Described(Box<dyn Any + Send>),
}

pub(crate) struct Slot {
    signature: Arc<MethodSignature>,
    dispatch: Mutex<Dispatch>,
}

impl Slot {
    pub fn new(signature: Arc<MethodSignature>, dispatch: Dispatch) -> Self {
        Slot {
            signature,
            dispatch: Mutex::new(dispatch),
        }
    }
}

/// One slot per registered method, in registration order.
#[derive(Default)]
pub(crate) struct Store {
    slots: Vec<Slot>,
}

impl Store {
    pub fn new(slots: Vec<Slot>) -> Self {
        Store { slots }
    }

    pub fn call<I: Args, O: 'static>(
        &self,
        mock: &str,
        index: usize,
        input: I,
    ) -> Result<O, CallError> {
        let slot = self.slots.get(index).ok_or_else(|| CallError::UnknownMethod {
            mock: mock.to_string(),
            method: format!("#{}", index),
        })?;
        let method = slot.signature.name();
        let unknown = || CallError::UnknownMethod {
            mock: mock.to_string(),
            method: method.to_string(),
        };

        // held while resolving and answering so a call is selected and
        // counted atomically with respect to other calls of the method
        let mut dispatch = slot.dispatch.lock();
        match &mut *dispatch {
            Dispatch::Unexpected => {
                tracing::warn!(mock = %mock, method = %method, "Unexpected call");
                Err(CallError::UnexpectedCall {
                    mock: mock.to_string(),
                    method: method.to_string(),
                })
            }
            Dispatch::Implemented(implementation) => {
                let implementation = implementation
                    .downcast_mut::<Implementation<I, O>>()
                    .ok_or_else(unknown)?;
                Ok(implementation(input))
            }
            Dispatch::Described(candidates) => candidates
                .downcast_mut::<Candidates<I, O>>()
                .ok_or_else(unknown)?
                .resolve(mock, method, input),
        }
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodSignature> {
        self.slots.iter().map(|slot| &*slot.signature)
    }
}
