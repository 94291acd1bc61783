//! Signature descriptors, argument binding and type validation
//!
//! A [`Signature`] is the parameter list a target function declares. It
//! binds recorded example arguments with the usual rules:
//!
//! - positional values fill positional parameters left to right, overflow
//!   goes to a var-positional parameter if one exists
//! - keyword values match parameters by name, unknown names go to a
//!   var-keyword parameter if one exists
//! - every parameter without a default must receive a value
//!
//! ```rust
//! use fn_examples::{Param, Signature, TypeHint};
//! use serde_json::json;
//!
//! let signature = Signature::new(
//!     vec![
//!         Param::new("number_1").typed(TypeHint::Int),
//!         Param::new("number_2").typed(TypeHint::Int).default(1),
//!     ],
//!     Some(TypeHint::Int),
//! )?;
//!
//! let bound = signature.bind(&[json!(5)], &[])?;
//! assert_eq!(bound.len(), 1);
//! assert_eq!(signature.apply_defaults(bound).int("number_2").ok(), Some(1));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod arguments;
mod type_hint;

pub use arguments::Arguments;
pub use type_hint::TypeHint;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{Error, Result};

/// How a parameter accepts values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// Only by position
    PositionalOnly,
    /// By position or by name
    PositionalOrKeyword,
    /// Collects surplus positional values into an array
    VarPositional,
    /// Only by name
    KeywordOnly,
    /// Collects surplus keyword values into an object
    VarKeyword,
}

impl ParamKind {
    const fn is_variadic(self) -> bool {
        matches!(self, Self::VarPositional | Self::VarKeyword)
    }

    const fn is_positional(self) -> bool {
        matches!(self, Self::PositionalOnly | Self::PositionalOrKeyword)
    }
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    name: String,
    kind: ParamKind,
    default: Option<Value>,
    hint: Option<TypeHint>,
}

impl Param {
    /// Positional-or-keyword parameter.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_kind(name, ParamKind::PositionalOrKeyword)
    }

    /// Positional-only parameter.
    #[must_use]
    pub fn positional_only(name: impl Into<String>) -> Self {
        Self::with_kind(name, ParamKind::PositionalOnly)
    }

    /// Keyword-only parameter.
    #[must_use]
    pub fn keyword_only(name: impl Into<String>) -> Self {
        Self::with_kind(name, ParamKind::KeywordOnly)
    }

    /// Var-positional parameter (`*args`).
    #[must_use]
    pub fn var_positional(name: impl Into<String>) -> Self {
        Self::with_kind(name, ParamKind::VarPositional)
    }

    /// Var-keyword parameter (`**kwargs`).
    #[must_use]
    pub fn var_keyword(name: impl Into<String>) -> Self {
        Self::with_kind(name, ParamKind::VarKeyword)
    }

    fn with_kind(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            hint: None,
        }
    }

    /// Set the default value.
    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Set the type annotation. For variadic parameters it applies to each collected value.
    #[must_use]
    pub fn typed(mut self, hint: TypeHint) -> Self {
        self.hint = Some(hint);
        self
    }

    /// Parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter kind.
    #[must_use]
    pub const fn kind(&self) -> ParamKind {
        self.kind
    }

    /// Default value, if any.
    #[must_use]
    pub const fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Type annotation, if any.
    #[must_use]
    pub const fn hint(&self) -> Option<&TypeHint> {
        self.hint.as_ref()
    }

    const fn is_required(&self) -> bool {
        self.default.is_none() && !self.kind.is_variadic()
    }
}

/// Binding rule violated by recorded arguments.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// More positional values than positional parameters
    #[error("too many positional arguments (expected at most {expected}, got {given})")]
    TooManyPositional {
        /// Positional parameter count
        expected: usize,
        /// Positional values supplied
        given: usize,
    },

    /// Keyword matches no parameter
    #[error("got an unexpected keyword argument '{0}'")]
    UnexpectedKeyword(String),

    /// Parameter filled both positionally and by keyword
    #[error("multiple values for argument '{0}'")]
    MultipleValues(String),

    /// Positional-only parameter passed by keyword
    #[error("'{0}' parameter is positional only, but was passed as a keyword")]
    PositionalOnlyByKeyword(String),

    /// Required parameter left without a value
    #[error("missing a required argument: '{0}'")]
    Missing(String),
}

/// Parameter list and return annotation of a target function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    params: Vec<Param>,
    returns: Option<TypeHint>,
}

impl Signature {
    /// Create a signature.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Construction`] for duplicate parameter names, more
    /// than one parameter of a variadic kind, or parameters declared out of
    /// kind order.
    pub fn new(params: Vec<Param>, returns: Option<TypeHint>) -> Result<Self> {
        for (index, param) in params.iter().enumerate() {
            if params[..index].iter().any(|earlier| earlier.name == param.name) {
                return Err(Error::Construction(format!(
                    "duplicate parameter '{}'",
                    param.name
                )));
            }
        }
        let kind_rank = |kind: ParamKind| match kind {
            ParamKind::PositionalOnly => 0,
            ParamKind::PositionalOrKeyword => 1,
            ParamKind::VarPositional => 2,
            ParamKind::KeywordOnly => 3,
            ParamKind::VarKeyword => 4,
        };
        for pair in params.windows(2) {
            let (before, after) = (kind_rank(pair[0].kind), kind_rank(pair[1].kind));
            if after < before || (before == after && pair[0].kind.is_variadic()) {
                return Err(Error::Construction(format!(
                    "parameter '{}' ({:?}) cannot follow '{}' ({:?})",
                    pair[1].name, pair[1].kind, pair[0].name, pair[0].kind
                )));
            }
        }
        Ok(Self { params, returns })
    }

    /// Declared parameters.
    #[must_use]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Parameter named `name`.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|param| param.name == name)
    }

    /// Return annotation.
    #[must_use]
    pub const fn returns(&self) -> Option<&TypeHint> {
        self.returns.as_ref()
    }

    /// Whether any parameter or the return value is annotated.
    #[must_use]
    pub fn has_type_hints(&self) -> bool {
        self.returns.is_some() || self.params.iter().any(|param| param.hint.is_some())
    }

    /// Bind positional and keyword values to the parameter list.
    ///
    /// The result holds only the parameters that received values; use
    /// [`Signature::apply_defaults`] before calling a body.
    ///
    /// # Errors
    ///
    /// Returns the first [`BindError`] encountered.
    pub fn bind(
        &self,
        positional: &[Value],
        named: &[(String, Value)],
    ) -> std::result::Result<Arguments, BindError> {
        let mut slots: Vec<Option<Value>> = vec![None; self.params.len()];

        let positional_slots = self
            .params
            .iter()
            .take_while(|param| param.kind.is_positional())
            .count();
        let var_positional = self
            .params
            .iter()
            .position(|param| param.kind == ParamKind::VarPositional);

        if positional.len() > positional_slots && var_positional.is_none() {
            return Err(BindError::TooManyPositional {
                expected: positional_slots,
                given: positional.len(),
            });
        }
        for (slot, value) in slots.iter_mut().zip(positional.iter().take(positional_slots)) {
            *slot = Some(value.clone());
        }
        if let Some(index) = var_positional {
            let surplus: Vec<Value> = positional.iter().skip(positional_slots).cloned().collect();
            if !surplus.is_empty() {
                slots[index] = Some(Value::Array(surplus));
            }
        }

        let var_keyword = self
            .params
            .iter()
            .position(|param| param.kind == ParamKind::VarKeyword);
        let mut surplus = Map::new();
        for (name, value) in named {
            let target = self
                .params
                .iter()
                .position(|param| param.name == *name && !param.kind.is_variadic());
            match target {
                Some(index) if self.params[index].kind == ParamKind::PositionalOnly => {
                    if var_keyword.is_none() {
                        return Err(BindError::PositionalOnlyByKeyword(name.clone()));
                    }
                    surplus.insert(name.clone(), value.clone());
                }
                Some(index) => {
                    if slots[index].is_some() {
                        return Err(BindError::MultipleValues(name.clone()));
                    }
                    slots[index] = Some(value.clone());
                }
                None if var_keyword.is_some() => {
                    surplus.insert(name.clone(), value.clone());
                }
                None => return Err(BindError::UnexpectedKeyword(name.clone())),
            }
        }
        if let Some(index) = var_keyword {
            if !surplus.is_empty() {
                slots[index] = Some(Value::Object(surplus));
            }
        }

        if let Some(missing) = self
            .params
            .iter()
            .zip(&slots)
            .find(|(param, slot)| param.is_required() && slot.is_none())
        {
            return Err(BindError::Missing(missing.0.name.clone()));
        }

        Ok(Arguments::from_pairs(
            self.params
                .iter()
                .zip(slots)
                .filter_map(|(param, slot)| slot.map(|value| (param.name.clone(), value)))
                .collect(),
        ))
    }

    /// Fill unbound parameters with their defaults (empty collections for variadics).
    #[must_use]
    pub fn apply_defaults(&self, bound: Arguments) -> Arguments {
        let values = self
            .params
            .iter()
            .filter_map(|param| {
                let value = bound.get(&param.name).cloned().or_else(|| match param.kind {
                    ParamKind::VarPositional => Some(Value::Array(Vec::new())),
                    ParamKind::VarKeyword => Some(Value::Object(Map::new())),
                    _ => param.default.clone(),
                })?;
                Some((param.name.clone(), value))
            })
            .collect();
        Arguments::from_pairs(values)
    }

    /// Check bound argument values against their parameter annotations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeValidation`] naming the first offending parameter.
    pub fn check_arguments(&self, function: &str, bound: &Arguments) -> Result<()> {
        for (name, value) in bound.iter() {
            let Some(param) = self.param(name) else {
                continue;
            };
            let Some(hint) = &param.hint else {
                continue;
            };
            let offending = match param.kind {
                ParamKind::VarPositional => value
                    .as_array()
                    .and_then(|items| items.iter().find(|item| !hint.accepts(item))),
                ParamKind::VarKeyword => value
                    .as_object()
                    .and_then(|map| map.values().find(|item| !hint.accepts(item))),
                _ => (!hint.accepts(value)).then_some(value),
            };
            if let Some(found) = offending {
                return Err(type_mismatch(function, name, hint, found));
            }
        }
        Ok(())
    }

    /// Check a return value against the return annotation, if declared.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeValidation`] with parameter `return` on mismatch.
    pub fn check_return(&self, function: &str, value: &Value) -> Result<()> {
        match &self.returns {
            Some(hint) if !hint.accepts(value) => Err(type_mismatch(function, "return", hint, value)),
            _ => Ok(()),
        }
    }
}

fn type_mismatch(function: &str, parameter: &str, hint: &TypeHint, found: &Value) -> Error {
    Error::TypeValidation {
        function: function.to_string(),
        parameter: parameter.to_string(),
        expected: hint.to_string(),
        found: found.to_string(),
    }
}
