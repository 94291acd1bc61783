//! Module Example Set - the examples declared by one module

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::example::{append_to_doc, Destination, Example, ExampleBuilder};
use crate::function::{ExampleFn, FunctionKey};
use crate::Result;

/// Registry configuration.
///
/// Deserializes with defaults for missing fields, so `{}` is a valid config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Append each registered example to its function's documentation
    pub add_to_doc_strings: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            add_to_doc_strings: true,
        }
    }
}

/// Ordered examples plus a per-function index.
///
/// The global registry keeps one of these per module. A standalone
/// instance is an isolated registry:
///
/// ```rust
/// use fn_examples::{ExampleFn, Examples, Param};
/// use serde_json::json;
///
/// let double = ExampleFn::builder("doc_demo::local", "double")
///     .param(Param::new("x"))
///     .build(|args| Ok(json!(args.int("x")? * 2)))?;
///
/// let mut examples = Examples::builder().add_to_doc_strings(false).build();
/// examples.example(&double).arg(4).returns(8).register()?;
///
/// assert_eq!(examples.get(&double).len(), 1);
/// examples.verify_and_test_examples(true)?;
/// assert!(double.doc().is_none());
/// # Ok::<(), fn_examples::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct Examples {
    config: RegistryConfig,
    examples: Vec<Arc<Example>>,
    by_function: FxHashMap<FunctionKey, Vec<Arc<Example>>>,
}

impl Examples {
    /// Create an empty set with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty set with `config`.
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Create a builder.
    #[must_use]
    pub fn builder() -> ExamplesBuilder {
        ExamplesBuilder::default()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> RegistryConfig {
        self.config
    }

    pub(crate) fn set_config(&mut self, config: RegistryConfig) {
        self.config = config;
    }

    /// Start an example for `function`, registered into this set.
    pub fn example(&mut self, function: &Arc<ExampleFn>) -> ExampleBuilder<'_> {
        ExampleBuilder::new(function, Destination::Local(self))
    }

    /// Append a built example. Always appends, even if an identical example exists.
    pub fn add(&mut self, example: Example, doc_string: bool) -> Arc<Example> {
        let example = Arc::new(example);
        if doc_string && self.config.add_to_doc_strings {
            append_to_doc(&example);
        }
        debug!(function = %example.target().id(), "Registered example");

        self.examples.push(Arc::clone(&example));
        self.by_function
            .entry(FunctionKey::of(example.target()))
            .or_default()
            .push(Arc::clone(&example));
        example
    }

    /// All examples in registration order.
    #[must_use]
    pub fn examples(&self) -> &[Arc<Example>] {
        &self.examples
    }

    /// Examples targeting `function`, in registration order.
    #[must_use]
    pub fn get(&self, function: &ExampleFn) -> &[Arc<Example>] {
        self.by_function
            .get(&FunctionKey::of(function))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of examples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    /// True if no examples are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Verify every example's signature.
    ///
    /// # Errors
    ///
    /// The first failing example's error.
    pub fn verify_signatures(&self, check_types: bool) -> Result<()> {
        verify_signatures(&self.examples, check_types)
    }

    /// Run every example.
    ///
    /// # Errors
    ///
    /// The first failing example's error.
    pub fn test_examples(&self, verify_return_type: bool) -> Result<()> {
        test_examples(&self.examples, verify_return_type)
    }

    /// Verify then run every example.
    ///
    /// # Errors
    ///
    /// The first failing example's error.
    pub fn verify_and_test_examples(&self, check_types: bool) -> Result<()> {
        verify_and_test_examples(&self.examples, check_types)
    }
}

pub(crate) fn verify_signatures(examples: &[Arc<Example>], check_types: bool) -> Result<()> {
    examples
        .iter()
        .try_for_each(|example| example.verify_signature(check_types))
}

pub(crate) fn test_examples(examples: &[Arc<Example>], verify_return_type: bool) -> Result<()> {
    examples
        .iter()
        .try_for_each(|example| example.check(verify_return_type))
}

pub(crate) fn verify_and_test_examples(examples: &[Arc<Example>], check_types: bool) -> Result<()> {
    examples
        .iter()
        .try_for_each(|example| example.verify_and_check(check_types))
}

/// Builder for [`Examples`].
#[derive(Debug, Default)]
pub struct ExamplesBuilder {
    config: RegistryConfig,
}

impl ExamplesBuilder {
    /// Toggle appending examples to documentation strings.
    #[must_use]
    pub const fn add_to_doc_strings(mut self, enabled: bool) -> Self {
        self.config.add_to_doc_strings = enabled;
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub const fn config(mut self, config: RegistryConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the set.
    #[must_use]
    pub fn build(self) -> Examples {
        Examples::with_config(self.config)
    }
}
