//! Basic fn-examples usage: attach, inspect and run examples
//!
//! This example demonstrates:
//! - Declaring example targets with typed signatures
//! - Registering examples with expected returns and expected exceptions
//! - Rendered examples appended to documentation
//! - Verifying and testing a whole module
//!
//! Run with: `RUST_LOG=debug cargo run --example basic_usage`

use fn_examples::{api, ExampleFn, Exception, Module, Param, TypeHint};
use serde_json::json;
use tracing_subscriber::EnvFilter;

const MODULE: &str = "demos::math";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== fn-examples Basic Usage ===\n");

    let add = ExampleFn::builder(MODULE, "add")
        .param(Param::new("number_1").typed(TypeHint::Int))
        .param(Param::new("number_2").typed(TypeHint::Int).default(1))
        .returns(TypeHint::Int)
        .doc("Adds two numbers together.")
        .build(|args| Ok(json!(args.int("number_1")? + args.int("number_2")?)))?;

    let divide = ExampleFn::builder(MODULE, "divide")
        .params([
            Param::new("number_1").typed(TypeHint::Int),
            Param::new("number_2").typed(TypeHint::Int),
        ])
        .build(|_| {
            Err(Exception::with_message(
                "NotImplementedError",
                "No division support! This is just an POC.",
            ))
        })?;

    println!("Registering examples...");
    api::example(&add).args([1, 2]).register()?;
    api::example(&add).arg(1).register()?;
    api::example(&add)
        .kwarg("number_1", 1)
        .kwarg("number_2", 1)
        .returns(2)
        .register()?;
    api::example(&divide)
        .args([1, 1])
        .raises("NotImplementedError")
        .register()?;
    println!("  ✓ {} examples in {MODULE}\n", api::get_examples(MODULE)?.len());

    println!("Documentation of `add`:");
    println!("{}", add.doc().unwrap_or_default());

    println!("Running each example:");
    for example in api::get_examples(&Module::new(MODULE))? {
        println!("  {} -> {:?}", example.target().id(), example.execute()?);
    }
    println!();

    api::verify_and_test_examples(MODULE, api::DEFAULT_CHECK_TYPES)?;
    println!("  ✓ All examples in {MODULE} verified and passed");

    let failing = api::example(&add).args([1, 1]).returns(3).doc_string(false).register()?;
    match failing.check(true) {
        Ok(()) => println!("  unexpected pass"),
        Err(err) => println!("  ✓ Deliberately wrong example reported: {err}"),
    }

    Ok(())
}
