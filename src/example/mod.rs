//! Example records and the execution engine
//!
//! ## Lifecycle
//!
//! ```text
//! ExampleBuilder ──register──> Example (immutable, Arc-shared)
//!                                 │
//!                                 ├── verify_signature(check_types)   bind + annotations
//!                                 ├── execute()                       -> Outcome
//!                                 └── check(verify_return_type)       outcome vs expectation
//! ```
//!
//! An example expects either a return value or an exception, never both.

mod builder;
mod engine;
mod record;
mod render;

pub use builder::ExampleBuilder;
pub use builder::ExampleFactory;
pub use engine::Outcome;
pub use record::{Example, Expected, ExpectedException};

pub(crate) use builder::Destination;
pub(crate) use render::append_to_doc;
