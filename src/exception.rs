//! Exceptions raised by example targets
//!
//! An [`Exception`] is a kind (the exception type name) plus the values it
//! was constructed with. Two exceptions are equal when both match.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error raised by a target function body.
///
/// ```rust
/// use fn_examples::Exception;
///
/// let raised = Exception::with_message("ValueError", "bad input");
/// assert_eq!(raised.kind(), "ValueError");
/// assert_eq!(raised.message(), Some("bad input"));
/// assert_eq!(raised.to_string(), r#"ValueError("bad input")"#);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exception {
    kind: String,
    args: Vec<Value>,
}

impl Exception {
    /// Create an exception with no constructor arguments.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            args: Vec::new(),
        }
    }

    /// Create an exception carrying a single message argument.
    #[must_use]
    pub fn with_message(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            args: vec![Value::String(message.into())],
        }
    }

    /// Create an exception with arbitrary constructor arguments.
    #[must_use]
    pub fn with_args<I, V>(kind: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            kind: kind.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `TypeError` with a message, raised when a body receives an argument it cannot use.
    #[must_use]
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::with_message("TypeError", message)
    }

    /// Exception type name.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Constructor arguments.
    #[must_use]
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// First constructor argument when it is a string.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.args.first().and_then(Value::as_str)
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.kind)?;
        for (index, arg) in self.args.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

impl std::error::Error for Exception {}
