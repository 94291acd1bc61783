//! Examples registered away from the function definition
//!
//! This example demonstrates:
//! - `add_example_to` for keeping examples in a separate place
//! - A standalone `Examples` set that never touches the global registry
//! - Variadic parameters and structured values
//!
//! Run with: cargo run --example separate_examples

use fn_examples::{api, ExampleFn, Examples, Param, TypeHint};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

mod implementation {
    use super::*;

    pub fn multiply() -> fn_examples::Result<std::sync::Arc<ExampleFn>> {
        ExampleFn::builder("demos::separate", "multiply")
            .params([
                Param::new("number_1").typed(TypeHint::Int),
                Param::new("number_2").typed(TypeHint::Int),
            ])
            .returns(TypeHint::Int)
            .build(|args| Ok(json!(args.int("number_1")? * args.int("number_2")?)))
    }

    pub fn summarize() -> fn_examples::Result<std::sync::Arc<ExampleFn>> {
        ExampleFn::builder("demos::separate", "summarize")
            .params([
                Param::var_positional("values").typed(TypeHint::Float),
                Param::keyword_only("label").typed(TypeHint::Str).default("total"),
            ])
            .returns(TypeHint::dict(TypeHint::Any))
            .build(|args| {
                let total: f64 = args.list("values")?.iter().filter_map(Value::as_f64).sum();
                let mut summary = serde_json::Map::new();
                summary.insert(args.str("label")?.to_string(), json!(total));
                Ok(Value::Object(summary))
            })
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== fn-examples Separate Registration ===\n");

    let multiply = implementation::multiply()?;
    let add_example = api::add_example_to(&multiply);
    add_example.example().args([2, 2]).register()?;
    add_example.example().args([3, 2]).returns(6).register()?;
    api::test_examples(&multiply, true)?;
    println!("  ✓ multiply: {} examples passed", api::get_examples(&multiply)?.len());

    println!("\nStandalone example set:");
    let summarize = implementation::summarize()?;
    let mut examples = Examples::builder().add_to_doc_strings(false).build();
    examples
        .example(&summarize)
        .args([1.5, 2.5])
        .returns(json!({"total": 4.0}))
        .register()?;
    examples
        .example(&summarize)
        .args([1, 2, 3])
        .kwarg("label", "sum")
        .returns(json!({"sum": 6.0}))
        .register()?;
    examples.verify_and_test_examples(true)?;
    println!("  ✓ summarize: {} local examples passed", examples.get(&summarize).len());
    println!("  ✓ global registry untouched: {}", api::get_examples("demos::separate")?.len());

    for example in examples.examples() {
        println!("\n{example}");
    }

    Ok(())
}
