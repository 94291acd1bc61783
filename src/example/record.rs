//! Example Record - one recorded call and its expected outcome

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::exception::Exception;
use crate::function::ExampleFn;
use crate::{Error, Result};

/// Expected return value of an example.
///
/// `NotSet` is distinct from `Value(Value::Null)`: the former checks
/// nothing, the latter expects the call to return `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Expected {
    /// No return value expectation
    #[default]
    NotSet,
    /// Call must return exactly this value
    Value(Value),
}

impl Expected {
    /// Whether a return value is expected.
    #[must_use]
    pub const fn is_set(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Expected value, if set.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::NotSet => None,
            Self::Value(value) => Some(value),
        }
    }
}

/// Value equality used when comparing outcomes with expectations.
///
/// Numbers compare by numeric value, so `4` equals `4.0`; arrays and
/// objects compare element-wise. Booleans never equal numbers.
#[allow(clippy::float_cmp)]
pub(crate) fn same_value(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) if a.is_f64() || b.is_f64() => {
            a.as_f64() == b.as_f64()
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| same_value(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| same_value(x, y)))
        }
        _ => left == right,
    }
}

/// Exception an example expects its call to raise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedException {
    /// Any exception of this kind matches
    Kind(String),
    /// Kind and constructor arguments must both match
    Instance(Exception),
}

impl ExpectedException {
    /// Expect any exception of `kind`.
    #[must_use]
    pub fn kind(kind: impl Into<String>) -> Self {
        Self::Kind(kind.into())
    }

    /// Whether `raised` satisfies this expectation.
    #[must_use]
    pub fn matches(&self, raised: &Exception) -> bool {
        match self {
            Self::Kind(kind) => raised.kind() == kind,
            Self::Instance(expected) => {
                raised.kind() == expected.kind()
                    && raised.args().len() == expected.args().len()
                    && raised
                        .args()
                        .iter()
                        .zip(expected.args())
                        .all(|(a, b)| same_value(a, b))
            }
        }
    }
}

impl From<Exception> for ExpectedException {
    fn from(exception: Exception) -> Self {
        Self::Instance(exception)
    }
}

impl From<&str> for ExpectedException {
    fn from(kind: &str) -> Self {
        Self::Kind(kind.to_string())
    }
}

impl From<String> for ExpectedException {
    fn from(kind: String) -> Self {
        Self::Kind(kind)
    }
}

impl fmt::Display for ExpectedException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kind(kind) => f.write_str(kind),
            Self::Instance(exception) => write!(f, "{exception}"),
        }
    }
}

/// One sample invocation of a target plus its expected outcome.
///
/// Immutable once constructed. Use [`crate::api::example`] or
/// [`crate::Examples::example`] to build and register one.
#[derive(Debug)]
pub struct Example {
    target: Arc<ExampleFn>,
    positional_args: Vec<Value>,
    named_args: Vec<(String, Value)>,
    expected_return: Expected,
    expected_exception: Option<ExpectedException>,
}

impl Example {
    /// Create an example record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Construction`] if both an expected return value and
    /// an expected exception are given, or a keyword is repeated.
    pub fn new(
        target: Arc<ExampleFn>,
        positional_args: Vec<Value>,
        named_args: Vec<(String, Value)>,
        expected_return: Expected,
        expected_exception: Option<ExpectedException>,
    ) -> Result<Self> {
        if expected_return.is_set() && expected_exception.is_some() {
            return Err(Error::Construction(
                "cannot specify both raises and returns on a single example".to_string(),
            ));
        }
        for (index, (name, _)) in named_args.iter().enumerate() {
            if named_args[..index].iter().any(|(earlier, _)| earlier == name) {
                return Err(Error::Construction(format!(
                    "keyword argument '{name}' repeated"
                )));
            }
        }
        Ok(Self {
            target,
            positional_args,
            named_args,
            expected_return,
            expected_exception,
        })
    }

    /// Function this example documents.
    #[must_use]
    pub const fn target(&self) -> &Arc<ExampleFn> {
        &self.target
    }

    /// Recorded positional arguments.
    #[must_use]
    pub fn positional_args(&self) -> &[Value] {
        &self.positional_args
    }

    /// Recorded keyword arguments, in the order given.
    #[must_use]
    pub fn named_args(&self) -> &[(String, Value)] {
        &self.named_args
    }

    /// Expected return value.
    #[must_use]
    pub const fn expected_return(&self) -> &Expected {
        &self.expected_return
    }

    /// Expected exception.
    #[must_use]
    pub const fn expected_exception(&self) -> Option<&ExpectedException> {
        self.expected_exception.as_ref()
    }

    /// Check that the recorded arguments fit the target's signature.
    ///
    /// With `check_types`, bound arguments and the expected return value are
    /// also checked against the declared annotations.
    ///
    /// # Errors
    ///
    /// [`Error::Binding`] if the arguments do not bind,
    /// [`Error::TypeValidation`] if a value does not match its annotation.
    pub fn verify_signature(&self, check_types: bool) -> Result<()> {
        let signature = self.target.signature();
        let bound = self.bind()?;

        if check_types && signature.has_type_hints() {
            let function = self.target.id().to_string();
            signature.check_arguments(&function, &bound)?;
            if let Expected::Value(expected) = &self.expected_return {
                signature.check_return(&function, expected)?;
            }
        }
        Ok(())
    }

    pub(crate) fn bind(&self) -> Result<crate::signature::Arguments> {
        self.target
            .signature()
            .bind(&self.positional_args, &self.named_args)
            .map_err(|source| Error::Binding {
                function: self.target.id().to_string(),
                source,
            })
    }
}
