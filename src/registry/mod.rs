//! Module Registry - process-wide store of examples keyed by module
//!
//! ## Layout
//!
//! ```text
//! ModuleRegistry (1) ──< Examples (N, one per module, first-registration order)
//!                            │
//!                            ├── examples     [all records, registration order]
//!                            └── by_function  ExampleFn instance -> [records]
//! ```
//!
//! The global instance is created on first use and never torn down.
//! Lookups hand out `Arc` snapshots so the lock is released before any
//! example runs; a target is free to register further examples.

mod examples;

pub use examples::{Examples, ExamplesBuilder, RegistryConfig};

pub(crate) use examples::{test_examples, verify_and_test_examples, verify_signatures};

use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError};

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::example::Example;
use crate::function::ExampleFn;

static REGISTRY: LazyLock<Mutex<ModuleRegistry>> =
    LazyLock::new(|| Mutex::new(ModuleRegistry::default()));

/// Module identifier -> examples declared in that module.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    config: RegistryConfig,
    order: Vec<String>,
    by_module: FxHashMap<String, Examples>,
}

impl ModuleRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry whose module sets use `config`.
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> RegistryConfig {
        self.config
    }

    /// Replace the configuration, including for existing module sets.
    pub fn configure(&mut self, config: RegistryConfig) {
        self.config = config;
        for examples in self.by_module.values_mut() {
            examples.set_config(config);
        }
    }

    /// Append `example` under `module_id`, creating the module set if absent.
    pub fn register(&mut self, module_id: &str, example: Example, doc_string: bool) -> Arc<Example> {
        if !self.by_module.contains_key(module_id) {
            debug!(module = module_id, "Creating module example set");
            self.order.push(module_id.to_string());
        }
        let config = self.config;
        self.by_module
            .entry(module_id.to_string())
            .or_insert_with(|| Examples::with_config(config))
            .add(example, doc_string)
    }

    /// Examples targeting `function`; empty if none.
    #[must_use]
    pub fn lookup_by_function(&self, function: &ExampleFn) -> Vec<Arc<Example>> {
        self.by_module
            .get(function.module())
            .map(|examples| examples.get(function).to_vec())
            .unwrap_or_default()
    }

    /// Examples declared in `module_id`; empty if none.
    #[must_use]
    pub fn lookup_by_module(&self, module_id: &str) -> Vec<Arc<Example>> {
        self.by_module
            .get(module_id)
            .map(|examples| examples.examples().to_vec())
            .unwrap_or_default()
    }

    /// Known module identifiers in first-registration order.
    #[must_use]
    pub fn module_ids(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Example set for `module_id`.
    #[must_use]
    pub fn module(&self, module_id: &str) -> Option<&Examples> {
        self.by_module.get(module_id)
    }

    /// Number of modules with examples.
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.order.len()
    }
}

fn global() -> MutexGuard<'static, ModuleRegistry> {
    REGISTRY.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Register `example` in the global registry under its target's module.
pub fn register(example: Example, doc_string: bool) -> Arc<Example> {
    let module_id = example.target().module().to_string();
    global().register(&module_id, example, doc_string)
}

/// Global examples targeting `function`.
#[must_use]
pub fn lookup_by_function(function: &ExampleFn) -> Vec<Arc<Example>> {
    global().lookup_by_function(function)
}

/// Global examples declared in `module_id`.
#[must_use]
pub fn lookup_by_module(module_id: &str) -> Vec<Arc<Example>> {
    global().lookup_by_module(module_id)
}

/// Module identifiers known to the global registry.
#[must_use]
pub fn module_ids() -> Vec<String> {
    global().module_ids()
}

/// Configure the global registry.
pub fn configure(config: RegistryConfig) {
    global().configure(config);
}

/// Configuration of the global registry.
#[must_use]
pub fn config() -> RegistryConfig {
    global().config()
}
