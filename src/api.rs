//! Public query / verify / test API
//!
//! Every operation accepts an [`Identifier`]: a function, a module, or a
//! module name. Anything else is rejected with
//! [`Error::UnsupportedIdentifier`].
//!
//! | operation                    | function form        | module / name form        |
//! |------------------------------|----------------------|---------------------------|
//! | [`get_examples`]             | examples of function | examples of module        |
//! | [`verify_signatures`]        | not-found if none    | not-found if none         |
//! | [`test_examples`]            | not-found if none    | not-found if none         |
//! | [`verify_and_test_examples`] | not-found if none    | not-found if none         |
//!
//! The `*_all_*` variants walk every registered module and stop at the
//! first failure.
//!
//! ## Flag defaults
//!
//! Per-item operations conventionally run with type checks on
//! ([`DEFAULT_CHECK_TYPES`]), the whole-registry operations with them off
//! ([`DEFAULT_ALL_CHECK_TYPES`]).

use std::any::{type_name, Any};
use std::sync::Arc;

use tracing::{info, info_span};

use crate::example::{Destination, Example, ExampleBuilder, ExampleFactory};
use crate::function::{ExampleFn, Module};
use crate::registry;
use crate::{Error, Result};

/// Default `check_types` / `verify_return_type` for per-item operations.
pub const DEFAULT_CHECK_TYPES: bool = true;

/// Default `check_types` / `verify_return_type` for the `*_all_*` operations.
pub const DEFAULT_ALL_CHECK_TYPES: bool = false;

/// What an operation is asked about.
#[derive(Debug, Clone, Copy)]
pub enum Identifier<'a> {
    /// A single function
    Function(&'a ExampleFn),
    /// A module handle
    Module(&'a Module),
    /// A module by fully-qualified name
    ModuleName(&'a str),
    /// Any other kind of value; carries its type name
    Unsupported(&'static str),
}

impl<'a> Identifier<'a> {
    /// Classify an arbitrary value.
    ///
    /// ```rust
    /// use fn_examples::api::{self, Identifier};
    ///
    /// let identifier = Identifier::of(&42_i32);
    /// assert!(matches!(identifier, Identifier::Unsupported("i32")));
    /// assert!(api::get_examples(identifier).is_err());
    ///
    /// let name = String::from("some::module");
    /// assert!(matches!(Identifier::of(&name), Identifier::ModuleName("some::module")));
    /// ```
    #[must_use]
    pub fn of<T: Any>(item: &'a T) -> Self {
        let any: &'a dyn Any = item;
        if let Some(function) = any.downcast_ref::<Arc<ExampleFn>>() {
            Self::Function(function)
        } else if let Some(function) = any.downcast_ref::<ExampleFn>() {
            Self::Function(function)
        } else if let Some(module) = any.downcast_ref::<Module>() {
            Self::Module(module)
        } else if let Some(name) = any.downcast_ref::<String>() {
            Self::ModuleName(name)
        } else if let Some(name) = any.downcast_ref::<&'static str>() {
            Self::ModuleName(name)
        } else {
            Self::Unsupported(type_name::<T>())
        }
    }
}

impl<'a> From<&'a ExampleFn> for Identifier<'a> {
    fn from(function: &'a ExampleFn) -> Self {
        Self::Function(function)
    }
}

impl<'a> From<&'a Arc<ExampleFn>> for Identifier<'a> {
    fn from(function: &'a Arc<ExampleFn>) -> Self {
        Self::Function(function)
    }
}

impl<'a> From<&'a Module> for Identifier<'a> {
    fn from(module: &'a Module) -> Self {
        Self::Module(module)
    }
}

impl<'a> From<&'a str> for Identifier<'a> {
    fn from(name: &'a str) -> Self {
        Self::ModuleName(name)
    }
}

impl<'a> From<&'a String> for Identifier<'a> {
    fn from(name: &'a String) -> Self {
        Self::ModuleName(name)
    }
}

enum Target<'a> {
    Function(&'a ExampleFn),
    Module(&'a str),
}

impl<'a> Target<'a> {
    fn resolve(identifier: Identifier<'a>) -> Result<Self> {
        match identifier {
            Identifier::Function(function) => Ok(Self::Function(function)),
            Identifier::Module(module) => Ok(Self::Module(module.name())),
            Identifier::ModuleName(name) => Ok(Self::Module(name)),
            Identifier::Unsupported(type_name) => {
                Err(Error::UnsupportedIdentifier(type_name.to_string()))
            }
        }
    }

    fn examples(&self) -> Vec<Arc<Example>> {
        match self {
            Self::Function(function) => registry::lookup_by_function(function),
            Self::Module(name) => registry::lookup_by_module(name),
        }
    }

    fn name(&self) -> String {
        match self {
            Self::Function(function) => function.id().to_string(),
            Self::Module(name) => (*name).to_string(),
        }
    }

    const fn kind(&self) -> &'static str {
        match self {
            Self::Function(_) => "function",
            Self::Module(_) => "module",
        }
    }

    fn required_examples(&self, action: &'static str) -> Result<Vec<Arc<Example>>> {
        let examples = self.examples();
        if examples.is_empty() {
            return Err(Error::NotFound {
                kind: self.kind(),
                name: self.name(),
                action,
            });
        }
        Ok(examples)
    }
}

/// Start an example for `function`, registered in the global registry.
///
/// The example's module is the function's declaring module.
pub fn example(function: &Arc<ExampleFn>) -> ExampleBuilder<'static> {
    ExampleBuilder::new(function, Destination::Global)
}

/// Reusable example source for `function`, for registering examples away
/// from the function's definition.
///
/// ```rust
/// use fn_examples::{api, ExampleFn, Param};
/// use serde_json::json;
///
/// let multiply = ExampleFn::builder("doc_demo::separate", "multiply")
///     .params([Param::new("a"), Param::new("b")])
///     .build(|args| Ok(json!(args.int("a")? * args.int("b")?)))?;
///
/// let add_example = api::add_example_to(&multiply);
/// add_example.example().args([2, 2]).register()?;
/// let last = add_example.example().args([1, 1]).returns(1).register()?;
///
/// let examples = api::get_examples(&multiply)?;
/// assert!(std::sync::Arc::ptr_eq(&examples[1], &last));
/// # Ok::<(), fn_examples::Error>(())
/// ```
#[must_use]
pub fn add_example_to(function: &Arc<ExampleFn>) -> ExampleFactory {
    ExampleFactory::new(function)
}

/// Examples associated with a function, module or module name.
///
/// Absence is not an error: unknown identifiers yield an empty list.
///
/// # Errors
///
/// [`Error::UnsupportedIdentifier`] for any other identifier kind.
pub fn get_examples<'a>(item: impl Into<Identifier<'a>>) -> Result<Vec<Arc<Example>>> {
    Ok(Target::resolve(item.into())?.examples())
}

/// Verify the signature of every associated example.
///
/// # Errors
///
/// [`Error::UnsupportedIdentifier`], [`Error::NotFound`] when there are no
/// examples, or the first example failure.
pub fn verify_signatures<'a>(item: impl Into<Identifier<'a>>, check_types: bool) -> Result<()> {
    let target = Target::resolve(item.into())?;
    let _span = info_span!("verify_signatures", target = %target.name(), check_types).entered();
    let examples = target.required_examples("verifying example signatures")?;
    registry::verify_signatures(&examples, check_types)?;
    info!(examples = examples.len(), "Example signatures verified");
    Ok(())
}

/// Run every associated example against its function.
///
/// # Errors
///
/// [`Error::UnsupportedIdentifier`], [`Error::NotFound`] when there are no
/// examples, or the first example failure.
pub fn test_examples<'a>(item: impl Into<Identifier<'a>>, verify_return_type: bool) -> Result<()> {
    let target = Target::resolve(item.into())?;
    let _span =
        info_span!("test_examples", target = %target.name(), verify_return_type).entered();
    let examples = target.required_examples("testing examples")?;
    registry::test_examples(&examples, verify_return_type)?;
    info!(examples = examples.len(), "Examples passed");
    Ok(())
}

/// Verify signatures then run every associated example.
///
/// # Errors
///
/// [`Error::UnsupportedIdentifier`], [`Error::NotFound`] when there are no
/// examples, or the first example failure.
pub fn verify_and_test_examples<'a>(
    item: impl Into<Identifier<'a>>,
    check_types: bool,
) -> Result<()> {
    let target = Target::resolve(item.into())?;
    let _span =
        info_span!("verify_and_test_examples", target = %target.name(), check_types).entered();
    let examples =
        target.required_examples("verifying example signatures and running tests")?;
    registry::verify_and_test_examples(&examples, check_types)?;
    info!(examples = examples.len(), "Examples verified and passed");
    Ok(())
}

/// [`verify_signatures`] for every registered module.
///
/// # Errors
///
/// The first failing module's error.
pub fn verify_all_signatures(check_types: bool) -> Result<()> {
    registry::module_ids()
        .iter()
        .try_for_each(|module| verify_signatures(module, check_types))
}

/// [`test_examples`] for every registered module.
///
/// # Errors
///
/// The first failing module's error.
pub fn test_all_examples(verify_return_type: bool) -> Result<()> {
    registry::module_ids()
        .iter()
        .try_for_each(|module| test_examples(module, verify_return_type))
}

/// [`verify_and_test_examples`] for every registered module.
///
/// # Errors
///
/// The first failing module's error.
pub fn verify_and_test_all_examples(check_types: bool) -> Result<()> {
    registry::module_ids()
        .iter()
        .try_for_each(|module| verify_and_test_examples(module, check_types))
}
