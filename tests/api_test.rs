//! Query / verify / test API against sample modules
//!
//! Each sample module registers its examples on first use, the way a
//! module's examples come into existence when it is loaded.

use std::sync::{Arc, LazyLock, Once};

use fn_examples::api::{self, Identifier};
use fn_examples::{Error, Example, ExampleFn, Exception, Module, Param, TypeHint};
use serde_json::json;

fn int_param(name: &str) -> Param {
    Param::new(name).typed(TypeHint::Int)
}

fn sum(args: &fn_examples::Arguments) -> Result<serde_json::Value, Exception> {
    Ok(json!(args.int("number_1")? + args.int("number_2")?))
}

fn product(args: &fn_examples::Arguments) -> Result<serde_json::Value, Exception> {
    Ok(json!(args.int("number_1")? * args.int("number_2")?))
}

mod example_module_pass {
    use super::*;

    pub const NAME: &str = "api_test::example_module_pass";

    pub static ADD: LazyLock<Arc<ExampleFn>> = LazyLock::new(|| {
        ExampleFn::builder(NAME, "add")
            .params([int_param("number_1"), int_param("number_2").default(1)])
            .returns(TypeHint::Int)
            .build(sum)
            .expect("valid signature")
    });

    pub static MULTIPLY: LazyLock<Arc<ExampleFn>> = LazyLock::new(|| {
        ExampleFn::builder(NAME, "multiply")
            .params([int_param("number_1"), int_param("number_2")])
            .returns(TypeHint::Int)
            .build(product)
            .expect("valid signature")
    });

    pub static DIVIDE: LazyLock<Arc<ExampleFn>> = LazyLock::new(|| {
        ExampleFn::builder(NAME, "divide")
            .params([int_param("number_1"), int_param("number_2")])
            .build(|_| {
                Err(Exception::with_message(
                    "NotImplementedError",
                    "No division support! This is just an POC.",
                ))
            })
            .expect("valid signature")
    });

    static LOAD: Once = Once::new();

    pub fn load() -> Module {
        LOAD.call_once(|| {
            api::example(&ADD)
                .kwarg("number_1", 1)
                .kwarg("number_2", 1)
                .returns(2)
                .register()
                .unwrap();
            api::example(&ADD).arg(1).register().unwrap();
            api::example(&ADD).args([1, 2]).register().unwrap();

            api::example(&MULTIPLY).args([3, 2]).returns(6).register().unwrap();
            api::example(&MULTIPLY).args([2, 2]).register().unwrap();

            api::example(&DIVIDE)
                .args([1, 2])
                .raises(Exception::with_message(
                    "NotImplementedError",
                    "No division support! This is just an POC.",
                ))
                .register()
                .unwrap();
            api::example(&DIVIDE)
                .args([1, 1])
                .raises("NotImplementedError")
                .register()
                .unwrap();
        });
        Module::new(NAME)
    }
}

mod example_module_fail {
    use super::*;

    pub const NAME: &str = "api_test::example_module_fail";

    pub static ADD: LazyLock<Arc<ExampleFn>> = LazyLock::new(|| {
        ExampleFn::builder(NAME, "add")
            .params([int_param("number_1"), int_param("number_2").default(1)])
            .returns(TypeHint::Int)
            .build(sum)
            .expect("valid signature")
    });

    pub static MULTIPLY: LazyLock<Arc<ExampleFn>> = LazyLock::new(|| {
        ExampleFn::builder(NAME, "multiply")
            .params([int_param("number_1"), int_param("number_2")])
            .returns(TypeHint::Int)
            .build(product)
            .expect("valid signature")
    });

    static LOAD: Once = Once::new();

    pub fn load() -> Module {
        LOAD.call_once(|| {
            // Missing the required first argument.
            api::example(&ADD).register().unwrap();
            api::example(&ADD)
                .kwarg("number_1", 1)
                .kwarg("number_2", 1)
                .returns(2)
                .register()
                .unwrap();
            api::example(&ADD).args([1, 2]).register().unwrap();

            api::example(&MULTIPLY).args([2, 2]).register().unwrap();
            api::example(&MULTIPLY)
                .args([3, 2])
                .returns("apple")
                .register()
                .unwrap();
        });
        Module::new(NAME)
    }
}

mod no_examples_module {
    use super::*;

    pub const NAME: &str = "api_test::no_examples_module";

    pub static FUNCTION: LazyLock<Arc<ExampleFn>> = LazyLock::new(|| {
        ExampleFn::builder(NAME, "function")
            .build(|_| Ok(json!(null)))
            .expect("valid signature")
    });

    pub fn load() -> Module {
        Module::new(NAME)
    }
}

fn same_records(left: &[Arc<Example>], right: &[Arc<Example>]) -> bool {
    left.len() == right.len() && left.iter().zip(right).all(|(a, b)| Arc::ptr_eq(a, b))
}

#[test]
fn test_get_examples() {
    assert!(matches!(
        api::get_examples(Identifier::of(&42_i64)),
        Err(Error::UnsupportedIdentifier(_))
    ));

    let module = example_module_pass::load();
    let module_examples = api::get_examples(&module).unwrap();
    assert!(same_records(
        &module_examples,
        &api::get_examples(example_module_pass::NAME).unwrap()
    ));
    assert_eq!(module_examples.len(), 7);

    let function_examples = api::get_examples(&*example_module_pass::ADD).unwrap();
    assert_eq!(function_examples.len(), 3);
    assert!(function_examples
        .iter()
        .all(|example| example.target().name() == "add"));

    let empty = no_examples_module::load();
    assert!(api::get_examples(&empty).unwrap().is_empty());
    assert!(api::get_examples(&*no_examples_module::FUNCTION)
        .unwrap()
        .is_empty());
}

#[test]
fn test_verify_signatures() {
    assert!(matches!(
        api::verify_signatures(Identifier::of(&42_i64), true),
        Err(Error::UnsupportedIdentifier(_))
    ));
    assert!(matches!(
        api::verify_signatures(&*no_examples_module::FUNCTION, true),
        Err(Error::NotFound { kind: "function", .. })
    ));
    assert!(matches!(
        api::verify_signatures(&no_examples_module::load(), true),
        Err(Error::NotFound { kind: "module", .. })
    ));

    let pass = example_module_pass::load();
    for check_types in [true, false] {
        api::verify_signatures(&pass, check_types).unwrap();
        api::verify_signatures(example_module_pass::NAME, check_types).unwrap();
        api::verify_signatures(&*example_module_pass::ADD, check_types).unwrap();
    }

    let fail = example_module_fail::load();
    for check_types in [true, false] {
        assert!(api::verify_signatures(&fail, check_types).is_err());
        assert!(api::verify_signatures(example_module_fail::NAME, check_types).is_err());
        assert!(matches!(
            api::verify_signatures(&*example_module_fail::ADD, check_types),
            Err(Error::Binding { .. })
        ));
    }
    // Only the annotation check catches the "apple" return value.
    assert!(api::verify_signatures(&*example_module_fail::MULTIPLY, false).is_ok());
    assert!(matches!(
        api::verify_signatures(&*example_module_fail::MULTIPLY, true),
        Err(Error::TypeValidation { .. })
    ));
}

#[test]
fn test_test_examples() {
    assert!(matches!(
        api::test_examples(Identifier::of(&42_i64), true),
        Err(Error::UnsupportedIdentifier(_))
    ));
    assert!(matches!(
        api::test_examples(&*no_examples_module::FUNCTION, true),
        Err(Error::NotFound { .. })
    ));
    assert!(matches!(
        api::test_examples(&no_examples_module::load(), true),
        Err(Error::NotFound { .. })
    ));

    let pass = example_module_pass::load();
    for verify_return_type in [true, false] {
        api::test_examples(&pass, verify_return_type).unwrap();
        api::test_examples(example_module_pass::NAME, verify_return_type).unwrap();
        api::test_examples(&*example_module_pass::ADD, verify_return_type).unwrap();
        api::test_examples(&*example_module_pass::DIVIDE, verify_return_type).unwrap();
    }

    let fail = example_module_fail::load();
    for verify_return_type in [true, false] {
        assert!(api::test_examples(&fail, verify_return_type).is_err());
        assert!(api::test_examples(example_module_fail::NAME, verify_return_type).is_err());
        assert!(api::test_examples(&*example_module_fail::ADD, verify_return_type).is_err());
    }
    let err = api::test_examples(&*example_module_fail::MULTIPLY, true).unwrap_err();
    assert!(matches!(err, Error::ExpectationMismatch { .. }));
    assert!(err.to_string().contains("\"apple\""));
}

#[test]
fn test_verify_and_test_examples() {
    assert!(matches!(
        api::verify_and_test_examples(Identifier::of(&42_i64), true),
        Err(Error::UnsupportedIdentifier(_))
    ));
    assert!(matches!(
        api::verify_and_test_examples(&*no_examples_module::FUNCTION, true),
        Err(Error::NotFound { .. })
    ));
    assert!(matches!(
        api::verify_and_test_examples(&no_examples_module::load(), true),
        Err(Error::NotFound { .. })
    ));

    let pass = example_module_pass::load();
    for check_types in [true, false] {
        api::verify_and_test_examples(&pass, check_types).unwrap();
        api::verify_and_test_examples(example_module_pass::NAME, check_types).unwrap();
        api::verify_and_test_examples(&*example_module_pass::ADD, check_types).unwrap();
    }

    let fail = example_module_fail::load();
    for check_types in [true, false] {
        assert!(api::verify_and_test_examples(&fail, check_types).is_err());
        assert!(api::verify_and_test_examples(example_module_fail::NAME, check_types).is_err());
        assert!(matches!(
            api::verify_and_test_examples(&*example_module_fail::ADD, check_types),
            Err(Error::Binding { .. })
        ));
    }
}

#[test]
fn test_verify_all_signatures() {
    example_module_pass::load();
    example_module_fail::load();
    assert!(api::verify_all_signatures(api::DEFAULT_ALL_CHECK_TYPES).is_err());
    assert!(api::verify_all_signatures(true).is_err());
}

#[test]
fn test_test_all_examples() {
    example_module_pass::load();
    example_module_fail::load();
    assert!(api::test_all_examples(api::DEFAULT_ALL_CHECK_TYPES).is_err());
    assert!(api::test_all_examples(true).is_err());
}

#[test]
fn test_verify_and_test_all_examples() {
    example_module_pass::load();
    example_module_fail::load();
    assert!(api::verify_and_test_all_examples(api::DEFAULT_ALL_CHECK_TYPES).is_err());
    assert!(api::verify_and_test_all_examples(true).is_err());
}

#[test]
fn test_default_flag_asymmetry() {
    assert!(api::DEFAULT_CHECK_TYPES);
    assert!(!api::DEFAULT_ALL_CHECK_TYPES);
}
