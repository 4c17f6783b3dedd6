//! A library to describe mocks declaratively.
//!
//! `decoy` lets you describe, per mocked method, which arguments are
//! expected, what is returned when they match, and how many times the
//! call should happen. The description produces a [`Mock`], which
//! resolves every call against the described candidates, and an
//! [`Assert`], which verifies the call counts once the test is done.
//!
//! # Usage
//!
//! ```rust
//! use decoy::{Method, MethodSignature, Mock, Mocker};
//!
//! pub trait KeyValues {
//!     fn get(&self, key: &str) -> Result<i32, String>;
//!     fn put(&self, key: &str, value: i32) -> Result<(), String>;
//! }
//!
//! // the hand-written shim that forwards every trait method to the mock
//! struct MockKeyValues {
//!     mock: Mock,
//!     get: Method<(String,), Result<i32, String>>,
//!     put: Method<(String, i32), Result<(), String>>,
//! }
//!
//! impl KeyValues for MockKeyValues {
//!     fn get(&self, key: &str) -> Result<i32, String> {
//!         self.mock.call(&self.get, (key.to_owned(),))
//!     }
//!
//!     fn put(&self, key: &str, value: i32) -> Result<(), String> {
//!         self.mock.call(&self.put, (key.to_owned(), value))
//!     }
//! }
//!
//! fn increase_counter(repo: &impl KeyValues, key: &str) -> Result<(), String> {
//!     let value = repo.get(key)?;
//!     repo.put(key, value + 1)
//! }
//!
//! let mut mocker = Mocker::new("KeyValues");
//! let get: Method<(String,), Result<i32, String>> = mocker
//!     .method(
//!         MethodSignature::new("get")
//!             .param("key", "&str")
//!             .returns("Result<i32, String>"),
//!     )
//!     .unwrap();
//! let put: Method<(String, i32), Result<(), String>> = mocker
//!     .method(
//!         MethodSignature::new("put")
//!             .param("key", "&str")
//!             .param("value", "i32")
//!             .returns("Result<(), String>"),
//!     )
//!     .unwrap();
//!
//! let (mock, assert) = mocker
//!     .describe()
//!     .method(&get)
//!     .takes("foo")
//!     .returns(Ok(42))
//!     .times(1)
//!     .method(&put)
//!     .takes("foo")
//!     .and(43)
//!     .returns(Ok(()))
//!     .times(1)
//!     .mock();
//!
//! let repo = MockKeyValues { mock, get, put };
//! assert_eq!(increase_counter(&repo, "foo"), Ok(()));
//! assert.check();
//! ```
//!
//! # Resolution
//!
//! Every call is checked against *all* the candidates described for
//! its method. Exactly one has to match: no match and more than one
//! match are both fatal, and declaration order never breaks ties.
//! Call counts are only checked when verifying, so calling a method
//! too often surfaces as a verification failure rather than as a
//! panic at the call site.

pub mod args;
pub mod matcher;

mod answer;
mod assert;
mod describe;
mod diff;
mod error;
mod label;
mod method;
mod mock;
mod mocker;
mod signature;
mod times;

pub use assert::{Assert, Failure, Guard, Report, Reporter};
pub use describe::{Describe, Describing, Returning};
pub use error::{
    ArgumentMismatch, CallError, CountMismatch, CustomMatcherError, FailedCandidate,
    FailedCandidates, MatchingCandidates, RenderedArgs, SignatureError,
};
pub use label::Label;
pub use method::Method;
pub use mock::Mock;
pub use mocker::Mocker;
pub use signature::{MethodSignature, Parameter};
pub use times::Times;
