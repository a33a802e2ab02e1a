//! Integration tests for `Partial`.
//!
//! A partial function is a single predicate-dispatched slot: it is defined
//! exactly where one of its predicates accepts the arguments.

#![cfg(feature = "environment")]

use bilby::environment::predicate;
use bilby::{Environment, Error, Partial, Value};
use rstest::rstest;

fn sign() -> Partial {
    Partial::new()
        .method(
            predicate::first(|value| value.as_number().is_some_and(|number| number < 0.0)),
            |_, _| Ok(Value::from("negative")),
        )
        .method(
            predicate::first(|value| value.as_number().is_some_and(|number| number > 0.0)),
            |_, _| Ok(Value::from("positive")),
        )
}

// =============================================================================
// Definition
// =============================================================================

#[rstest]
#[case(Value::from(-3), true)]
#[case(Value::from(3), true)]
#[case(Value::from(0), false)]
#[case(Value::from("3"), false)]
fn is_defined_at_follows_predicates(#[case] value: Value, #[case] expected: bool) {
    assert_eq!(sign().is_defined_at(&[value]), expected);
}

#[rstest]
fn empty_partial_is_defined_nowhere() {
    let partial = Partial::new();
    assert!(!partial.is_defined_at(&[]));
    assert!(matches!(
        partial.call(&[Value::Null]),
        Err(Error::NotImplemented { .. })
    ));
}

// =============================================================================
// Invocation
// =============================================================================

#[rstest]
fn call_selects_accepting_overload() {
    assert_eq!(sign().call(&[Value::from(-1)]), Ok(Value::from("negative")));
    assert_eq!(sign().call(&[Value::from(1)]), Ok(Value::from("positive")));
}

#[rstest]
fn call_outside_domain_fails() {
    assert!(sign().call(&[Value::from(0)]).is_err());
}

#[rstest]
fn earlier_overload_wins_on_overlap() {
    let partial = Partial::new()
        .method(predicate::always(), |_, _| Ok(Value::from("first")))
        .method(predicate::always(), |_, _| Ok(Value::from("second")));
    assert_eq!(partial.call(&[]), Ok(Value::from("first")));
}

#[rstest]
fn extension_leaves_original_untouched() {
    let base = sign();
    let total = base.method(predicate::always(), |_, _| Ok(Value::from("zero")));
    assert!(!base.is_defined_at(&[Value::from(0)]));
    assert_eq!(total.call(&[Value::from(0)]), Ok(Value::from("zero")));
}

#[rstest]
fn apply_passes_explicit_receiver() {
    let receiver = Environment::new().property("greeting", "hello").unwrap();
    let partial = Partial::new().method(predicate::always(), |environment, _| {
        Ok(environment.get("greeting").cloned().unwrap_or_default())
    });
    assert_eq!(partial.apply(&receiver, &[]), Ok(Value::from("hello")));
    assert_eq!(partial.call(&[]), Ok(Value::Null));
}

#[rstest]
fn to_function_is_first_class() {
    let function = sign().to_function();
    assert_eq!(function.call(&[Value::from(-2)]), Ok(Value::from("negative")));
    assert!(function.call(&[Value::from(0)]).is_err());
}
