//! Execution engine - runs an example and checks its outcome

use serde_json::Value;
use tracing::debug;

use super::record::{same_value, Example, Expected};
use crate::exception::Exception;
use crate::function::{Body, BoxFuture, CallResult};
use crate::{Error, Result};

/// Result of executing a target: the returned value or the raised exception.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Call returned normally
    Returned(Value),
    /// Call raised
    Raised(Exception),
}

impl Outcome {
    /// Returned value, if the call returned.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Returned(value) => Some(value),
            Self::Raised(_) => None,
        }
    }

    /// Raised exception, if the call raised.
    #[must_use]
    pub const fn exception(&self) -> Option<&Exception> {
        match self {
            Self::Returned(_) => None,
            Self::Raised(exception) => Some(exception),
        }
    }
}

impl From<CallResult> for Outcome {
    fn from(result: CallResult) -> Self {
        match result {
            Ok(value) => Self::Returned(value),
            Err(exception) => Self::Raised(exception),
        }
    }
}

impl Example {
    /// Invoke the target with the recorded arguments.
    ///
    /// A raised exception is reported as [`Outcome::Raised`], not as an
    /// error. Async targets are driven to completion on the calling thread.
    ///
    /// # Errors
    ///
    /// [`Error::Binding`] if the arguments do not bind, [`Error::Runtime`]
    /// or [`Error::Io`] if an async target cannot be driven.
    pub fn execute(&self) -> Result<Outcome> {
        let target = self.target();
        let arguments = target.signature().apply_defaults(self.bind()?);
        debug!(function = %target.id(), is_async = target.is_async(), "Executing example");

        let result = match target.body() {
            Body::Sync(body) => body(&arguments),
            Body::Async(body) => drive(body(arguments))?,
        };
        Ok(result.into())
    }

    /// Execute and compare the outcome with the expectation.
    ///
    /// With `verify_return_type`, a returned value is also checked against
    /// the target's return annotation.
    ///
    /// # Errors
    ///
    /// - [`Error::Raised`] carrying the target's exception when none was expected
    /// - [`Error::ExpectationMismatch`] when the outcome differs from the expectation
    /// - [`Error::TypeValidation`] when the returned value fails the return annotation
    pub fn check(&self, verify_return_type: bool) -> Result<()> {
        let value = match self.execute()? {
            Outcome::Raised(exception) => return self.check_raised(exception),
            Outcome::Returned(value) => value,
        };

        if let Some(expected) = self.expected_exception() {
            return Err(Error::ExpectationMismatch {
                expected: format!("{expected} to be raised"),
                actual: format!("{value} was returned"),
            });
        }
        if let Expected::Value(expected) = self.expected_return() {
            if !same_value(expected, &value) {
                return Err(Error::ExpectationMismatch {
                    expected: format!("return value of {expected}"),
                    actual: format!("{value} was returned"),
                });
            }
        }
        if verify_return_type {
            self.target()
                .signature()
                .check_return(&self.target().id().to_string(), &value)?;
        }
        Ok(())
    }

    fn check_raised(&self, exception: Exception) -> Result<()> {
        match self.expected_exception() {
            None => Err(Error::Raised(exception)),
            Some(expected) if expected.matches(&exception) => Ok(()),
            Some(expected) => Err(Error::ExpectationMismatch {
                expected: format!("{expected} to be raised"),
                actual: format!("{exception} was raised"),
            }),
        }
    }

    /// [`Example::verify_signature`] then [`Example::check`], both with `check_types`.
    ///
    /// Signature problems are reported before the target runs.
    ///
    /// # Errors
    ///
    /// The first error from either step.
    pub fn verify_and_check(&self, check_types: bool) -> Result<()> {
        self.verify_signature(check_types)?;
        self.check(check_types)
    }
}

/// Drive an async body on a single-use current-thread runtime.
#[cfg(feature = "tokio")]
fn drive(future: BoxFuture) -> Result<CallResult> {
    if tokio::runtime::Handle::try_current().is_ok() {
        return Err(Error::Runtime(
            "async examples cannot be executed from inside a running tokio runtime".to_string(),
        ));
    }
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}

#[cfg(not(feature = "tokio"))]
fn drive(_future: BoxFuture) -> Result<CallResult> {
    Err(Error::Runtime(
        "async examples require the `tokio` feature".to_string(),
    ))
}
