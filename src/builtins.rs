//! A standard environment with common generic operations.
//!
//! [`standard`] registers the operations below for the built-in value
//! kinds. Overloads for each name are registered from most to least
//! specific, so callers can extend the environment with their own types by
//! adding more overloads through [`Environment::method`].
//!
//! | Name | Accepts |
//! |------|---------|
//! | `equal` | any two values (structural equality) |
//! | `concat` | two strings, two arrays, two objects (right-biased merge) |
//! | `map` | array and function; function and function (composition) |
//! | `flat_map` | array and a function returning arrays |
//! | `ap` | array of functions and array of values |
//! | `fold` | array, initial value and a two-argument function |
//! | `to_array` | tagged value (leaf fields, flattened) |
//! | `to_string` | any value (canonical rendering) |
//!
//! Properties: `identity`, `constant`, `compose`.
//!
//! # Examples
//!
//! ```rust
//! use bilby::{Function, Value};
//! use bilby::builtins;
//!
//! let environment = builtins::standard().unwrap();
//! let double = Function::new("double", |arguments| {
//!     Ok(Value::from(arguments[0].expect_number()? * 2.0))
//! });
//!
//! let numbers = Value::from(vec![Value::from(1), Value::from(2)]);
//! let doubled = environment.call("map", &[numbers, Value::from(double)]).unwrap();
//! assert_eq!(doubled.to_string(), "[2, 4]");
//!
//! let greeting = environment
//!     .call("concat", &[Value::from("hello, "), Value::from("world")])
//!     .unwrap();
//! assert_eq!(greeting, Value::from("hello, world"));
//! ```

use std::sync::Arc;

use crate::environment::{Environment, predicate};
use crate::error::{Error, Result};
use crate::value::{Function, Value};

/// Builds the standard environment.
///
/// # Errors
///
/// Never fails on its own; the registration chain reports conflicts like any
/// other sequence of [`Environment::method`] and [`Environment::property`]
/// calls.
pub fn standard() -> Result<Environment> {
    register(Environment::new())
}

fn register(environment: Environment) -> Result<Environment> {
    let pair_of = |test: fn(&Value) -> bool| predicate::arity(2).and(&predicate::all(test));

    environment
        .method("equal", predicate::arity(2), |_, arguments| {
            Ok(Value::from(arguments[0] == arguments[1]))
        })?
        .method(
            "concat",
            pair_of(|value| matches!(value, Value::String(_))),
            |_, arguments| Ok(Value::from(format!("{}{}", arguments[0], arguments[1]))),
        )?
        .method(
            "concat",
            pair_of(|value| matches!(value, Value::Array(_))),
            |_, arguments| {
                let mut elements = arguments[0].expect_array()?.to_vec();
                elements.extend_from_slice(arguments[1].expect_array()?);
                Ok(Value::from(elements))
            },
        )?
        .method(
            "concat",
            pair_of(|value| matches!(value, Value::Object(_))),
            |_, arguments| match (&arguments[0], &arguments[1]) {
                (Value::Object(left), Value::Object(right)) => {
                    let mut merged = (**left).clone();
                    merged.extend(right.iter().map(|(key, value)| (key.clone(), value.clone())));
                    Ok(Value::Object(Arc::new(merged)))
                }
                _ => Err(Error::Type {
                    expected: "object",
                    actual: arguments[0].type_name(),
                }),
            },
        )?
        .method(
            "map",
            predicate::is_array().and(&second_is_function()),
            |_, arguments| {
                let function = arguments[1].expect_function()?;
                arguments[0]
                    .expect_array()?
                    .iter()
                    .map(|element| function.call(std::slice::from_ref(element)))
                    .collect::<Result<Vec<_>>>()
                    .map(Value::from)
            },
        )?
        .method(
            "map",
            predicate::is_function().and(&second_is_function()),
            |_, arguments| {
                let inner = arguments[0].expect_function()?;
                let outer = arguments[1].expect_function()?;
                Ok(Value::from(outer.compose(inner)))
            },
        )?
        .method(
            "flat_map",
            predicate::is_array().and(&second_is_function()),
            |_, arguments| {
                let function = arguments[1].expect_function()?;
                let mut flattened = Vec::new();
                for element in arguments[0].expect_array()? {
                    let produced = function.call(std::slice::from_ref(element))?;
                    flattened.extend_from_slice(produced.expect_array()?);
                }
                Ok(Value::from(flattened))
            },
        )?
        .method(
            "ap",
            predicate::arity(2).and(&predicate::is_array_of(|value| {
                matches!(value, Value::Function(_))
            })),
            |_, arguments| {
                let values = arguments[1].expect_array()?;
                let mut applied = Vec::new();
                for function in arguments[0].expect_array()? {
                    let function = function.expect_function()?;
                    for value in values {
                        applied.push(function.call(std::slice::from_ref(value))?);
                    }
                }
                Ok(Value::from(applied))
            },
        )?
        .method(
            "fold",
            predicate::arity(3)
                .and(&predicate::is_array())
                .and(&predicate::Predicate::new(|arguments| {
                    matches!(arguments.get(2), Some(Value::Function(_)))
                })),
            |_, arguments| {
                let function = arguments[2].expect_function()?;
                arguments[0]
                    .expect_array()?
                    .iter()
                    .try_fold(arguments[1].clone(), |accumulator, element| {
                        function.call(&[accumulator, element.clone()])
                    })
            },
        )?
        .method("to_array", predicate::is_tagged(), |_, arguments| {
            let instance = arguments[0].as_tagged().ok_or(Error::Type {
                expected: "tagged",
                actual: arguments[0].type_name(),
            })?;
            Ok(Value::from(instance.to_array()))
        })?
        .method("to_string", predicate::arity(1), |_, arguments| {
            Ok(Value::from(arguments[0].to_string()))
        })?
        .property("identity", Function::identity())?
        .property(
            "constant",
            Function::new("constant", |arguments| {
                Ok(Value::from(Function::constant(
                    arguments.first().cloned().unwrap_or_default(),
                )))
            }),
        )?
        .property(
            "compose",
            Function::new("compose", |arguments| match arguments {
                [Value::Function(outer), Value::Function(inner)] => {
                    Ok(Value::from(outer.compose(inner)))
                }
                _ => Err(Error::Type {
                    expected: "two functions",
                    actual: arguments.first().map_or("nothing", Value::type_name),
                }),
            }),
        )
}

fn second_is_function() -> predicate::Predicate {
    predicate::Predicate::new(|arguments| {
        arguments.len() == 2 && matches!(arguments[1], Value::Function(_))
    })
}
