//! Async example targets
//!
//! Async bodies are driven to completion on the calling thread, so the
//! same verify/test operations work for them unchanged.
//!
//! Run with: `RUST_LOG=info cargo run --example async_examples`

use std::time::Duration;

use fn_examples::{api, ExampleFn, Exception, Param, TypeHint};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== fn-examples Async Targets ===\n");

    let delayed_echo = ExampleFn::builder("demos::async", "delayed_echo")
        .param(Param::new("value"))
        .param(Param::new("delay_ms").typed(TypeHint::Int).default(5))
        .build_async(|args| async move {
            let delay = u64::try_from(args.int("delay_ms")?)
                .map_err(|_| Exception::with_message("ValueError", "negative delay"))?;
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok::<_, Exception>(args.value("value")?.clone())
        })?;

    api::example(&delayed_echo).arg("hello").returns("hello").register()?;
    api::example(&delayed_echo)
        .arg(json!([1, 2, 3]))
        .kwarg("delay_ms", 1)
        .returns(json!([1, 2, 3]))
        .register()?;
    api::example(&delayed_echo)
        .arg(0)
        .kwarg("delay_ms", -1)
        .raises("ValueError")
        .register()?;

    api::verify_and_test_examples(&delayed_echo, true)?;
    println!("  ✓ delayed_echo: {} async examples passed", api::get_examples(&delayed_echo)?.len());
    println!("\n{}", delayed_echo.doc().unwrap_or_default());

    Ok(())
}
