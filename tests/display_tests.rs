//! Integration tests for the canonical text rendering of values.

use bilby::{Function, TaggedProduct, TaggedSum, Value};
use rstest::rstest;

// =============================================================================
// Tagged Values
// =============================================================================

#[rstest]
fn product_renders_name_and_fields() {
    let tuple = TaggedProduct::new("Tuple3", ["_1", "_2", "_3"]).unwrap();
    let value = tuple
        .construct(vec![Value::from(1), Value::from("b"), Value::from(true)])
        .unwrap();
    assert_eq!(value.to_string(), "Tuple3(1, b, true)");
}

#[rstest]
fn zero_field_product_keeps_parentheses() {
    let unit = TaggedProduct::new("Unit", Vec::<String>::new()).unwrap();
    assert_eq!(unit.construct(Vec::new()).unwrap().to_string(), "Unit()");
}

#[rstest]
fn marker_case_renders_bare_key() {
    let color = TaggedSum::new("Color", [("Red", Vec::<&str>::new()), ("Green", Vec::new())]).unwrap();
    assert_eq!(color.sentinel("Red").unwrap().to_string(), "Red");
}

#[rstest]
fn nested_containers_render_inside_cases() {
    let option = TaggedSum::new("Option", [("Some", vec!["value"]), ("None", vec![])]).unwrap();
    let inner = Value::object([("k", Value::from(vec![Value::from(1), Value::Null]))]);
    let value = option.construct("Some", vec![inner]).unwrap();
    assert_eq!(value.to_string(), "Some({k: [1, null]})");
}

// =============================================================================
// Plain Values
// =============================================================================

#[rstest]
#[case(Value::from(0.25), "0.25")]
#[case(Value::from(-7), "-7")]
#[case(Value::from(Vec::<Value>::new()), "[]")]
#[case(Value::object(Vec::<(&str, Value)>::new()), "{}")]
fn plain_values_render(#[case] value: Value, #[case] expected: &str) {
    assert_eq!(value.to_string(), expected);
}

#[rstest]
fn functions_render_their_name() {
    let function = Function::new("double", |arguments| Ok(arguments[0].clone()));
    assert_eq!(Value::from(function).to_string(), "<function double>");
}

#[rstest]
fn debug_quotes_nested_strings() {
    let value = Value::from(vec![Value::from("a"), Value::from(1)]);
    assert_eq!(format!("{value:?}"), "[\"a\", 1]");
}
