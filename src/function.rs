//! Example targets: functions described by a signature and a body
//!
//! Rust has no runtime reflection, so a target carries its own
//! [`Signature`] descriptor next to the body that implements it.
//!
//! ```rust
//! use fn_examples::{ExampleFn, Param, TypeHint};
//! use serde_json::json;
//!
//! let add = ExampleFn::builder(module_path!(), "add")
//!     .param(Param::new("number_1").typed(TypeHint::Int))
//!     .param(Param::new("number_2").typed(TypeHint::Int))
//!     .returns(TypeHint::Int)
//!     .doc("Adds two numbers together.")
//!     .build(|args| Ok(json!(args.int("number_1")? + args.int("number_2")?)))?;
//!
//! assert_eq!(add.name(), "add");
//! assert_eq!(add.doc().as_deref(), Some("Adds two numbers together."));
//! # Ok::<(), fn_examples::Error>(())
//! ```

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::exception::Exception;
use crate::signature::{Arguments, Param, Signature, TypeHint};
use crate::Result;

/// What a target body produces: a value, or a raised exception.
pub type CallResult = std::result::Result<Value, Exception>;

/// Boxed future returned by async bodies.
pub type BoxFuture = Pin<Box<dyn Future<Output = CallResult> + Send + 'static>>;

type SyncBody = dyn Fn(&Arguments) -> CallResult + Send + Sync;
type AsyncBody = dyn Fn(Arguments) -> BoxFuture + Send + Sync;

pub(crate) enum Body {
    Sync(Box<SyncBody>),
    Async(Box<AsyncBody>),
}

/// Qualified name of a target: its module path plus its name.
///
/// Names label a target in messages and renderings. Examples are indexed by
/// the [`ExampleFn`] instance itself, so two targets sharing a name keep
/// separate examples.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FunctionId {
    module: String,
    name: String,
}

impl FunctionId {
    /// Create an identity.
    #[must_use]
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
        }
    }

    /// Module path.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.module, self.name)
    }
}

/// Handle for a module that declares examples.
///
/// Usually built from `module_path!()` in the declaring module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Module {
    name: String,
}

impl Module {
    /// Create a module handle.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Fully-qualified module name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A function examples can be attached to.
pub struct ExampleFn {
    id: FunctionId,
    signature: Signature,
    doc: RwLock<Option<String>>,
    body: Body,
}

impl ExampleFn {
    /// Start describing a function declared in `module`.
    #[must_use]
    pub fn builder(module: impl Into<String>, name: impl Into<String>) -> ExampleFnBuilder {
        ExampleFnBuilder::new(module, name)
    }

    /// Identity.
    #[must_use]
    pub const fn id(&self) -> &FunctionId {
        &self.id
    }

    /// Function name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.id.name()
    }

    /// Declaring module path.
    #[must_use]
    pub fn module(&self) -> &str {
        self.id.module()
    }

    /// Signature descriptor.
    #[must_use]
    pub const fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Whether the body is asynchronous.
    #[must_use]
    pub const fn is_async(&self) -> bool {
        matches!(self.body, Body::Async(_))
    }

    /// Current documentation string.
    #[must_use]
    pub fn doc(&self) -> Option<String> {
        self.doc
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn update_doc(&self, update: impl FnOnce(Option<&str>) -> String) {
        let mut doc = self.doc.write().unwrap_or_else(PoisonError::into_inner);
        let updated = update(doc.as_deref());
        *doc = Some(updated);
    }

    pub(crate) const fn body(&self) -> &Body {
        &self.body
    }
}

/// Index key for one [`ExampleFn`] instance.
///
/// Stays unique while a registered example holds the target's `Arc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct FunctionKey(usize);

impl FunctionKey {
    pub(crate) fn of(function: &ExampleFn) -> Self {
        Self(std::ptr::from_ref(function) as usize)
    }
}

impl fmt::Debug for ExampleFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExampleFn")
            .field("id", &self.id)
            .field("signature", &self.signature)
            .field("is_async", &self.is_async())
            .finish_non_exhaustive()
    }
}

/// Builder for [`ExampleFn`].
#[derive(Debug)]
pub struct ExampleFnBuilder {
    id: FunctionId,
    params: Vec<Param>,
    returns: Option<TypeHint>,
    doc: Option<String>,
}

impl ExampleFnBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: FunctionId::new(module, name),
            params: Vec::new(),
            returns: None,
            doc: None,
        }
    }

    /// Append a parameter.
    #[must_use]
    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Append several parameters.
    #[must_use]
    pub fn params(mut self, params: impl IntoIterator<Item = Param>) -> Self {
        self.params.extend(params);
        self
    }

    /// Declare the return annotation.
    #[must_use]
    pub fn returns(mut self, hint: TypeHint) -> Self {
        self.returns = Some(hint);
        self
    }

    /// Set the documentation string.
    #[must_use]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Build a function with a synchronous body.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Construction`] if the parameter list is invalid.
    pub fn build<F>(self, body: F) -> Result<Arc<ExampleFn>>
    where
        F: Fn(&Arguments) -> CallResult + Send + Sync + 'static,
    {
        self.finish(Body::Sync(Box::new(body)))
    }

    /// Build a function with an asynchronous body.
    ///
    /// Examples of async functions are still executed synchronously: the
    /// future is driven to completion before the outcome is reported.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Construction`] if the parameter list is invalid.
    pub fn build_async<F, Fut>(self, body: F) -> Result<Arc<ExampleFn>>
    where
        F: Fn(Arguments) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CallResult> + Send + 'static,
    {
        self.finish(Body::Async(Box::new(move |args| -> BoxFuture {
            Box::pin(body(args))
        })))
    }

    fn finish(self, body: Body) -> Result<Arc<ExampleFn>> {
        Ok(Arc::new(ExampleFn {
            signature: Signature::new(self.params, self.returns)?,
            id: self.id,
            doc: RwLock::new(self.doc),
            body,
        }))
    }
}
