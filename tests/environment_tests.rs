//! Integration tests for predicate-dispatched environments.
//!
//! Environments resolve a method by trying its overloads in registration
//! order and invoking the first whose predicate accepts the arguments.

#![cfg(feature = "environment")]

use bilby::environment::predicate;
use bilby::{BindingKind, Environment, Error, ErrorKind, TaggedSum, Value};
use rstest::rstest;

fn numbers_and_strings() -> Environment {
    Environment::new()
        .method("f", predicate::is_number(), |_, arguments| {
            Ok(Value::from(arguments[0].expect_number()? + 1.0))
        })
        .unwrap()
        .method("f", predicate::is_string(), |_, arguments| {
            Ok(Value::from(format!("{}!", arguments[0])))
        })
        .unwrap()
}

// =============================================================================
// Dispatch
// =============================================================================

#[rstest]
fn number_overload_selected() {
    assert_eq!(
        numbers_and_strings().call("f", &[Value::from(3)]),
        Ok(Value::from(4))
    );
}

#[rstest]
fn string_overload_selected() {
    assert_eq!(
        numbers_and_strings().call("f", &[Value::from("hi")]),
        Ok(Value::from("hi!"))
    );
}

#[rstest]
fn boolean_is_not_implemented() {
    let error = numbers_and_strings()
        .call("f", &[Value::from(true)])
        .unwrap_err();
    assert_eq!(
        error,
        Error::NotImplemented {
            name: "f".to_string()
        }
    );
}

#[rstest]
fn general_overload_registered_first_shadows_specific_one() {
    let environment = Environment::new()
        .method("describe", predicate::always(), |_, _| Ok(Value::from("anything")))
        .unwrap()
        .method("describe", predicate::is_number(), |_, _| Ok(Value::from("number")))
        .unwrap();
    assert_eq!(
        environment.call("describe", &[Value::from(1)]),
        Ok(Value::from("anything"))
    );
}

#[rstest]
fn catch_all_registered_last_acts_as_fallback() {
    let environment = Environment::new()
        .method("describe", predicate::is_number(), |_, _| Ok(Value::from("number")))
        .unwrap()
        .method("describe", predicate::always(), |_, _| Ok(Value::from("anything")))
        .unwrap();
    assert_eq!(
        environment.call("describe", &[Value::from(1)]),
        Ok(Value::from("number"))
    );
    assert_eq!(
        environment.call("describe", &[Value::from("x")]),
        Ok(Value::from("anything"))
    );
}

#[rstest]
fn implementations_call_back_into_environment() {
    let list = TaggedSum::new("List", [("Cons", vec!["head", "tail"]), ("Nil", vec![])]).unwrap();
    let environment = Environment::new()
        .method("length", predicate::is_case(&list, "Nil"), |_, _| Ok(Value::from(0)))
        .unwrap()
        .method(
            "length",
            predicate::is_case(&list, "Cons"),
            |environment, arguments| {
                let tail = arguments[0].as_tagged().unwrap().values()[1].clone();
                let rest = environment.call("length", &[tail])?.expect_number()?;
                Ok(Value::from(rest + 1.0))
            },
        )
        .unwrap();

    let nil = list.sentinel("Nil").unwrap();
    let two = list.construct("Cons", vec![Value::from("b"), nil]).unwrap();
    let value = list.construct("Cons", vec![Value::from("a"), two]).unwrap();
    assert_eq!(environment.call("length", &[value]), Ok(Value::from(2)));
}

// =============================================================================
// Registration
// =============================================================================

#[rstest]
fn property_then_method_conflicts() {
    let error = Environment::new()
        .property("a", 1)
        .unwrap()
        .method("a", predicate::always(), |_, _| Ok(Value::Null))
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Definition);
}

#[rstest]
fn method_then_property_conflicts() {
    let error = Environment::new()
        .method("a", predicate::always(), |_, _| Ok(Value::Null))
        .unwrap()
        .property("a", 1)
        .unwrap_err();
    assert_eq!(
        error,
        Error::Conflict {
            name: "a".to_string(),
            existing: BindingKind::Method,
        }
    );
}

#[rstest]
fn never_predicate_misses_with_method_name() {
    let environment = Environment::new()
        .method("a", predicate::never(), |_, _| Ok(Value::Null))
        .unwrap();
    let error = environment.call("a", &[Value::from(1)]).unwrap_err();
    assert!(error.to_string().contains("`a`"));
}

#[rstest]
fn generations_are_independent() {
    let base = numbers_and_strings();
    let extended = base
        .method("f", predicate::is_boolean(), |_, _| Ok(Value::from("bool")))
        .unwrap();
    assert!(base.call("f", &[Value::from(true)]).is_err());
    assert_eq!(
        extended.call("f", &[Value::from(true)]),
        Ok(Value::from("bool"))
    );
    assert_eq!(base.len() + 1, extended.len());
}

#[rstest]
fn is_defined_at_reflects_predicates() {
    let environment = numbers_and_strings();
    assert!(environment.is_defined_at("f", &[Value::from(1)]));
    assert!(environment.is_defined_at("f", &[Value::from("1")]));
    assert!(!environment.is_defined_at("f", &[Value::Null]));
    assert!(!environment.is_defined_at("g", &[Value::from(1)]));
}

#[rstest]
fn names_lists_each_binding_once() {
    let environment = numbers_and_strings().property("version", 1).unwrap();
    assert_eq!(environment.names(), vec!["f", "version"]);
    assert!(environment.has_method("f"));
    assert!(environment.has_property("version"));
    assert!(!Environment::new().has_method("f"));
    assert!(Environment::new().is_empty());
}

#[rstest]
fn method_function_is_bound_to_its_generation() {
    let base = numbers_and_strings();
    let f = base.method_function("f").unwrap();
    let _extended = base
        .method("f", predicate::is_boolean(), |_, _| Ok(Value::from("bool")))
        .unwrap();
    assert!(f.call(&[Value::from(true)]).is_err());
    assert_eq!(f.call(&[Value::from(1)]), Ok(Value::from(2)));
}
