//! Global registry behaviour: module indexing, separate registration and
//! the documentation side effect

use std::sync::Arc;

use fn_examples::api;
use fn_examples::registry;
use fn_examples::{Error, ExampleFn, Exception, Module, Param, TypeHint};
use serde_json::json;

fn multiply(module: &str) -> Arc<ExampleFn> {
    ExampleFn::builder(module, "multiply")
        .params([
            Param::new("number_1").typed(TypeHint::Int),
            Param::new("number_2").typed(TypeHint::Int),
        ])
        .returns(TypeHint::Int)
        .doc("Multiply two numbers together.")
        .build(|args| Ok(json!(args.int("number_1")? * args.int("number_2")?)))
        .unwrap()
}

#[test]
fn test_examples_indexed_by_function_and_module() {
    const MODULE: &str = "registry_test::indexed";
    let multiply = multiply(MODULE);
    let square = ExampleFn::builder(MODULE, "square")
        .param(Param::new("x").typed(TypeHint::Float))
        .build(|args| {
            let x = args.float("x")?;
            Ok(json!(x * x))
        })
        .unwrap();

    api::example(&multiply).args([2, 3]).returns(6).register().unwrap();
    api::example(&square).arg(1.5).returns(2.25).register().unwrap();
    api::example(&multiply).args([0, 9]).returns(0).register().unwrap();

    let by_module = registry::lookup_by_module(MODULE);
    assert_eq!(by_module.len(), 3);
    assert_eq!(by_module[1].target().name(), "square");

    let by_function = registry::lookup_by_function(&multiply);
    assert_eq!(by_function.len(), 2);
    assert!(Arc::ptr_eq(&by_function[0], &by_module[0]));
    assert!(Arc::ptr_eq(&by_function[1], &by_module[2]));

    assert!(registry::module_ids().iter().any(|id| id == MODULE));
    api::verify_and_test_examples(&Module::new(MODULE), true).unwrap();
}

#[test]
fn test_separate_registration() {
    const MODULE: &str = "registry_test::separate";
    let multiply = multiply(MODULE);

    let add_example = api::add_example_to(&multiply);
    assert!(Arc::ptr_eq(add_example.function(), &multiply));
    add_example.example().args([2, 2]).register().unwrap();
    add_example.example().args([3, 2]).returns(6).register().unwrap();

    let examples = api::get_examples(&multiply).unwrap();
    assert_eq!(examples.len(), 2);
    assert_eq!(examples[1].expected_return().value(), Some(&json!(6)));
    api::test_examples(MODULE, true).unwrap();
}

#[test]
fn test_doc_string_accumulates_examples() {
    const MODULE: &str = "registry_test::docs";
    let multiply = multiply(MODULE);

    api::example(&multiply).args([2, 2]).returns(4).register().unwrap();
    api::example(&multiply)
        .kwarg("number_1", 1)
        .kwarg("number_2", 0)
        .returns(0)
        .register()
        .unwrap();

    let doc = multiply.doc().unwrap();
    assert!(doc.starts_with("Multiply two numbers together."));
    assert_eq!(doc.matches("Examples:").count(), 1);
    assert!(doc.contains("        multiply(\n            2,\n            2\n        )\n         == \n        4\n"));
    assert!(doc.contains("            number_1=1,\n            number_2=0\n"));
}

#[test]
fn test_doc_string_opt_out_per_example() {
    const MODULE: &str = "registry_test::no_docs";
    let multiply = multiply(MODULE);

    api::example(&multiply)
        .args([2, 2])
        .doc_string(false)
        .register()
        .unwrap();
    assert_eq!(multiply.doc().as_deref(), Some("Multiply two numbers together."));
    assert_eq!(api::get_examples(&multiply).unwrap().len(), 1);
}

#[test]
fn test_raises_rendered_in_doc() {
    const MODULE: &str = "registry_test::raises";
    let divide = ExampleFn::builder(MODULE, "divide")
        .params([Param::new("number_1"), Param::new("number_2")])
        .build(|_| Err(Exception::new("NotImplementedError")))
        .unwrap();

    api::example(&divide)
        .args([1, 1])
        .raises("NotImplementedError")
        .register()
        .unwrap();
    assert!(divide.doc().unwrap().contains("raises NotImplementedError"));
    api::test_examples(&divide, true).unwrap();
}

#[test]
fn test_rejected_example_not_registered() {
    const MODULE: &str = "registry_test::rejected";
    let multiply = multiply(MODULE);

    let result = api::example(&multiply)
        .args([1, 1])
        .returns(1)
        .raises("ValueError")
        .register();
    assert!(matches!(result, Err(Error::Construction(_))));
    assert!(api::get_examples(&multiply).unwrap().is_empty());
    assert!(multiply.doc().unwrap().find("Examples:").is_none());
}

#[test]
fn test_target_registering_from_inside_a_run() {
    const MODULE: &str = "registry_test::reentrant";
    let echo = ExampleFn::builder(MODULE, "echo")
        .param(Param::new("value"))
        .build(|args| Ok(args.value("value")?.clone()))
        .unwrap();
    let inner = Arc::clone(&echo);
    let recorder = ExampleFn::builder(MODULE, "recorder")
        .build(move |_| {
            api::example(&inner)
                .arg("late")
                .returns("late")
                .register()
                .map_err(|err| Exception::with_message("RuntimeError", err.to_string()))?;
            Ok(json!(true))
        })
        .unwrap();

    api::example(&recorder).returns(true).register().unwrap();
    api::test_examples(&recorder, true).unwrap();
    assert_eq!(api::get_examples(&echo).unwrap().len(), 1);
}

#[test]
fn test_same_name_functions_keep_separate_examples() {
    const MODULE: &str = "registry_test::same_name";
    let first = ExampleFn::builder(MODULE, "f")
        .build(|_| Ok(json!(1)))
        .unwrap();
    let second = ExampleFn::builder(MODULE, "f")
        .build(|_| Ok(json!(2)))
        .unwrap();

    api::example(&first).returns(1).register().unwrap();

    assert_eq!(api::get_examples(&first).unwrap().len(), 1);
    assert!(api::get_examples(&second).unwrap().is_empty());
    assert!(matches!(
        api::test_examples(&second, true),
        Err(Error::NotFound { kind: "function", .. })
    ));
    api::test_examples(&first, true).unwrap();
    assert_eq!(api::get_examples(MODULE).unwrap().len(), 1);
}
