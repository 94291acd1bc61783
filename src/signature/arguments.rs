//! Bound arguments handed to a target body

use serde_json::Value;

use crate::exception::Exception;

/// Argument values bound to parameter names, in declaration order.
///
/// Bodies read their inputs through the typed accessors, which raise a
/// `TypeError` [`Exception`] when a value is missing or has the wrong shape
/// so `?` can be used inside a body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: Vec<(String, Value)>,
}

impl Arguments {
    pub(crate) fn from_pairs(values: Vec<(String, Value)>) -> Self {
        Self { values }
    }

    /// Number of bound parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bound `(name, value)` pairs in parameter order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Whether `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Value bound to `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(bound, _)| bound == name)
            .map(|(_, value)| value)
    }

    /// Value bound to `name`.
    ///
    /// # Errors
    ///
    /// Raises `TypeError` if the parameter is not bound.
    pub fn value(&self, name: &str) -> Result<&Value, Exception> {
        self.get(name)
            .ok_or_else(|| Exception::type_error(format!("missing argument '{name}'")))
    }

    /// Integer bound to `name`.
    ///
    /// # Errors
    ///
    /// Raises `TypeError` if missing or not an integer.
    pub fn int(&self, name: &str) -> Result<i64, Exception> {
        let value = self.value(name)?;
        value.as_i64().ok_or_else(|| mismatch(name, "int", value))
    }

    /// Number bound to `name`.
    ///
    /// # Errors
    ///
    /// Raises `TypeError` if missing or not a number.
    pub fn float(&self, name: &str) -> Result<f64, Exception> {
        let value = self.value(name)?;
        value.as_f64().ok_or_else(|| mismatch(name, "float", value))
    }

    /// String bound to `name`.
    ///
    /// # Errors
    ///
    /// Raises `TypeError` if missing or not a string.
    pub fn str(&self, name: &str) -> Result<&str, Exception> {
        let value = self.value(name)?;
        value.as_str().ok_or_else(|| mismatch(name, "str", value))
    }

    /// Boolean bound to `name`.
    ///
    /// # Errors
    ///
    /// Raises `TypeError` if missing or not a boolean.
    pub fn bool(&self, name: &str) -> Result<bool, Exception> {
        let value = self.value(name)?;
        value.as_bool().ok_or_else(|| mismatch(name, "bool", value))
    }

    /// Array bound to `name` (var-positional parameters bind as arrays).
    ///
    /// # Errors
    ///
    /// Raises `TypeError` if missing or not an array.
    pub fn list(&self, name: &str) -> Result<&[Value], Exception> {
        let value = self.value(name)?;
        value
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| mismatch(name, "list", value))
    }
}

fn mismatch(name: &str, expected: &str, found: &Value) -> Exception {
    Exception::type_error(format!("argument '{name}' must be {expected}, not {found}"))
}
