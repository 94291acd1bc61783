//! Registration builder - the Rust form of the `@example(...)` decorator

use std::sync::Arc;

use serde_json::Value;

use super::record::{Example, Expected, ExpectedException};
use crate::function::ExampleFn;
use crate::registry::{self, Examples};
use crate::Result;

/// Where a built example is registered.
#[derive(Debug)]
pub(crate) enum Destination<'a> {
    Global,
    Local(&'a mut Examples),
}

/// Builder that records one call against a function and registers it.
///
/// ```rust
/// use fn_examples::{api, ExampleFn, Param, TypeHint};
/// use serde_json::json;
///
/// let add = ExampleFn::builder("doc_demo::math", "add")
///     .params([Param::new("a"), Param::new("b")])
///     .build(|args| Ok(json!(args.int("a")? + args.int("b")?)))?;
///
/// api::example(&add).args([1, 1]).returns(2).register()?;
/// api::example(&add).arg(2).kwarg("b", 3).returns(5).register()?;
///
/// api::test_examples(&add, true)?;
/// # Ok::<(), fn_examples::Error>(())
/// ```
#[derive(Debug)]
#[must_use = "an example is only recorded once `register` is called"]
pub struct ExampleBuilder<'a> {
    target: Arc<ExampleFn>,
    positional_args: Vec<Value>,
    named_args: Vec<(String, Value)>,
    expected_return: Expected,
    expected_exception: Option<ExpectedException>,
    doc_string: bool,
    destination: Destination<'a>,
}

impl<'a> ExampleBuilder<'a> {
    pub(crate) fn new(target: &Arc<ExampleFn>, destination: Destination<'a>) -> Self {
        Self {
            target: Arc::clone(target),
            positional_args: Vec::new(),
            named_args: Vec::new(),
            expected_return: Expected::NotSet,
            expected_exception: None,
            doc_string: true,
            destination,
        }
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional_args.push(value.into());
        self
    }

    /// Append several positional arguments.
    pub fn args<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.positional_args
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Append a keyword argument.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named_args.push((name.into(), value.into()));
        self
    }

    /// Expect the call to return exactly `value`.
    pub fn returns(mut self, value: impl Into<Value>) -> Self {
        self.expected_return = Expected::Value(value.into());
        self
    }

    /// Expect the call to raise. A `&str` expects any exception of that
    /// kind, an [`crate::Exception`] expects that exact instance.
    pub fn raises(mut self, expected: impl Into<ExpectedException>) -> Self {
        self.expected_exception = Some(expected.into());
        self
    }

    /// Whether to append the rendered example to the function's documentation.
    pub const fn doc_string(mut self, enabled: bool) -> Self {
        self.doc_string = enabled;
        self
    }

    /// Build the record without registering it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Construction`] if both `returns` and `raises`
    /// were given.
    pub fn build(self) -> Result<Example> {
        Example::new(
            self.target,
            self.positional_args,
            self.named_args,
            self.expected_return,
            self.expected_exception,
        )
    }

    /// Build the record and register it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Construction`] if both `returns` and `raises`
    /// were given; nothing is registered in that case.
    pub fn register(mut self) -> Result<Arc<Example>> {
        let doc_string = self.doc_string;
        let destination = std::mem::replace(&mut self.destination, Destination::Global);
        let example = self.build()?;
        Ok(match destination {
            Destination::Global => registry::register(example, doc_string),
            Destination::Local(examples) => examples.add(example, doc_string),
        })
    }
}

/// Reusable source of example builders for one function.
///
/// Keeps examples apart from the implementation: the function is defined
/// in one place and its examples registered elsewhere.
#[derive(Debug, Clone)]
pub struct ExampleFactory {
    function: Arc<ExampleFn>,
}

impl ExampleFactory {
    pub(crate) fn new(function: &Arc<ExampleFn>) -> Self {
        Self {
            function: Arc::clone(function),
        }
    }

    /// Function examples are added to.
    #[must_use]
    pub const fn function(&self) -> &Arc<ExampleFn> {
        &self.function
    }

    /// Start a new example for the function, registered globally.
    pub fn example(&self) -> ExampleBuilder<'static> {
        ExampleBuilder::new(&self.function, Destination::Global)
    }
}
