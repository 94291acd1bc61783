//! # fn-examples: Runnable Examples Attached to Functions
//!
//! Attach sample calls, with an expected return value or an expected
//! exception, to a function. Later retrieve them, check them against the
//! function's declared signature, and execute them as lightweight
//! documentation-tests.
//!
//! ## Components
//!
//! - **Example Record** ([`Example`]): one recorded call plus its expectation
//! - **Signature Binder/Validator** ([`Signature`]): binds arguments and checks [`TypeHint`]s
//! - **Execution Engine** ([`Example::execute`], [`Example::check`]): runs and compares
//! - **Module Registry** ([`registry`]): process-wide examples per module and per function
//! - **Query/Verify/Test API** ([`api`]): operations over functions, modules and module names
//!
//! ## Example Usage
//!
//! ```rust
//! use fn_examples::{api, ExampleFn, Exception, Param, TypeHint};
//! use serde_json::json;
//!
//! let add = ExampleFn::builder("quickstart::math", "add")
//!     .param(Param::new("number_1").typed(TypeHint::Int))
//!     .param(Param::new("number_2").typed(TypeHint::Int))
//!     .returns(TypeHint::Int)
//!     .build(|args| Ok(json!(args.int("number_1")? + args.int("number_2")?)))?;
//!
//! let divide = ExampleFn::builder("quickstart::math", "divide")
//!     .param(Param::new("number_1").typed(TypeHint::Int))
//!     .param(Param::new("number_2").typed(TypeHint::Int))
//!     .build(|_| Err(Exception::with_message("NotImplementedError", "No division support!")))?;
//!
//! api::example(&add).args([1, 1]).returns(2).register()?;
//! api::example(&divide).args([1, 1]).raises("NotImplementedError").register()?;
//!
//! api::verify_and_test_examples("quickstart::math", true)?;
//! assert!(add.doc().unwrap_or_default().contains("Examples:"));
//! # Ok::<(), fn_examples::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod api;
pub mod error;
pub mod example;
pub mod exception;
pub mod function;
pub mod registry;
pub mod signature;

pub use error::{Error, Result};
pub use example::{Example, ExampleBuilder, ExampleFactory, Expected, ExpectedException, Outcome};
pub use exception::Exception;
pub use function::{ExampleFn, ExampleFnBuilder, FunctionId, Module};
pub use registry::{Examples, ModuleRegistry, RegistryConfig};
pub use signature::{Arguments, BindError, Param, ParamKind, Signature, TypeHint};

/// Dynamic value type used for example arguments and results.
pub use serde_json::Value;
