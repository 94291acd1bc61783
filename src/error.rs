//! Error types for fn-examples
//!
//! Every failure surfaces synchronously to the immediate caller. Target
//! exceptions that were not expected pass through as [`Error::Raised`]
//! without being wrapped in another message.

use thiserror::Error;

use crate::exception::Exception;
use crate::signature::BindError;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// fn-examples error types
#[derive(Error, Debug)]
pub enum Error {
    /// An operation was handed an identifier that is not a function, module or module name
    #[error("Currently examples can not be attached to {0}")]
    UnsupportedIdentifier(String),

    /// The identifier resolved to zero examples where at least one was required
    #[error("Tried {action} for {name} {kind} but no examples are defined for that {kind}")]
    NotFound {
        /// Identifier kind (`function` or `module`)
        kind: &'static str,
        /// Qualified name of the identifier
        name: String,
        /// What the caller was trying to do
        action: &'static str,
    },

    /// Recorded arguments do not bind to the target's parameters
    #[error("Example arguments do not bind to `{function}`: {source}")]
    Binding {
        /// Qualified function name
        function: String,
        /// Binding rule that was violated
        #[source]
        source: BindError,
    },

    /// A bound argument or return value failed its declared type
    #[error("Type validation failed for `{function}`: `{parameter}` expected {expected} but got {found}")]
    TypeValidation {
        /// Qualified function name
        function: String,
        /// Offending parameter (`return` for return values)
        parameter: String,
        /// Declared type
        expected: String,
        /// Offending value
        found: String,
    },

    /// Actual outcome differs from the declared expectation
    #[error("Example expected {expected} but instead {actual}")]
    ExpectationMismatch {
        /// Declared expectation
        expected: String,
        /// Observed outcome
        actual: String,
    },

    /// Exception raised by the target when none was expected
    #[error(transparent)]
    Raised(#[from] Exception),

    /// Invalid example or function definition
    #[error("Invalid example: {0}")]
    Construction(String),

    /// Async target could not be driven to completion
    #[error("Async runtime error: {0}")]
    Runtime(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error is a failing example rather than a usage mistake.
    ///
    /// Binding, type, expectation and propagated target errors are example
    /// failures; construction and identifier errors are misuse of the API.
    #[must_use]
    pub const fn is_example_failure(&self) -> bool {
        matches!(
            self,
            Self::Binding { .. }
                | Self::TypeValidation { .. }
                | Self::ExpectationMismatch { .. }
                | Self::Raised(_)
        )
    }
}
