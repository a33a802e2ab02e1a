//! Runtime guards used to select method overloads.
//!
//! A [`Predicate`] looks at the full argument list of a call. The stock
//! predicates in this module that describe a single value (`is_number`,
//! `is_string`, ...) test the first argument, which is the receiver-like
//! value in most generic operations.
//!
//! # Examples
//!
//! ```rust
//! use bilby::Value;
//! use bilby::environment::predicate;
//!
//! let numeric_pair = predicate::arity(2).and(&predicate::all(|value| value.as_number().is_some()));
//! assert!(numeric_pair.test(&[Value::from(1), Value::from(2)]));
//! assert!(!numeric_pair.test(&[Value::from(1), Value::from("2")]));
//! assert!(!numeric_pair.test(&[Value::from(1)]));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::tagged::{TaggedProduct, TaggedSum};
use crate::value::Value;

type Test = dyn Fn(&[Value]) -> bool + Send + Sync;

/// A shareable test over a call's arguments.
#[derive(Clone)]
pub struct Predicate {
    test: Arc<Test>,
}

impl Predicate {
    /// Wraps a closure over the argument list.
    pub fn new<F>(test: F) -> Self
    where
        F: Fn(&[Value]) -> bool + Send + Sync + 'static,
    {
        Self {
            test: Arc::new(test),
        }
    }

    /// Evaluates the predicate.
    pub fn test(&self, arguments: &[Value]) -> bool {
        (self.test)(arguments)
    }

    /// Accepts when both predicates accept.
    #[must_use]
    pub fn and(&self, other: &Self) -> Self {
        let (left, right) = (self.clone(), other.clone());
        Self::new(move |arguments| left.test(arguments) && right.test(arguments))
    }

    /// Accepts when either predicate accepts.
    #[must_use]
    pub fn or(&self, other: &Self) -> Self {
        let (left, right) = (self.clone(), other.clone());
        Self::new(move |arguments| left.test(arguments) || right.test(arguments))
    }

    /// Accepts exactly when `self` rejects.
    #[must_use]
    pub fn not(&self) -> Self {
        let inner = self.clone();
        Self::new(move |arguments| !inner.test(arguments))
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Predicate")
    }
}

/// Accepts every argument list. Register it last to act as a catch-all.
pub fn always() -> Predicate {
    Predicate::new(|_| true)
}

/// Rejects every argument list.
pub fn never() -> Predicate {
    Predicate::new(|_| false)
}

/// Accepts when the first argument satisfies `test`.
pub fn first<F>(test: F) -> Predicate
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Predicate::new(move |arguments| arguments.first().is_some_and(&test))
}

/// Accepts when every argument satisfies `test`. An empty argument list is
/// accepted.
pub fn all<F>(test: F) -> Predicate
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Predicate::new(move |arguments| arguments.iter().all(&test))
}

/// Accepts argument lists of exactly `count` values.
pub fn arity(count: usize) -> Predicate {
    Predicate::new(move |arguments| arguments.len() == count)
}

/// First argument is `Null`.
pub fn is_null() -> Predicate {
    first(Value::is_null)
}

/// First argument is a boolean.
pub fn is_boolean() -> Predicate {
    first(|value| matches!(value, Value::Boolean(_)))
}

/// First argument is a number.
pub fn is_number() -> Predicate {
    first(|value| matches!(value, Value::Number(_)))
}

/// First argument is a string.
pub fn is_string() -> Predicate {
    first(|value| matches!(value, Value::String(_)))
}

/// First argument is an array.
pub fn is_array() -> Predicate {
    first(|value| matches!(value, Value::Array(_)))
}

/// First argument is an object.
pub fn is_object() -> Predicate {
    first(|value| matches!(value, Value::Object(_)))
}

/// First argument is a function.
pub fn is_function() -> Predicate {
    first(|value| matches!(value, Value::Function(_)))
}

/// First argument is any tagged instance.
pub fn is_tagged() -> Predicate {
    first(|value| matches!(value, Value::Tagged(_)))
}

/// First argument is an array whose elements all satisfy `test`.
pub fn is_array_of<F>(test: F) -> Predicate
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    first(move |value| {
        value
            .as_array()
            .is_some_and(|elements| elements.iter().all(&test))
    })
}

/// First argument was built by `product`.
pub fn is_instance_of(product: &TaggedProduct) -> Predicate {
    let product = product.clone();
    first(move |value| product.is_instance(value))
}

/// First argument is an instance of any case of `sum`.
pub fn is_member_of(sum: &TaggedSum) -> Predicate {
    let sum = sum.clone();
    first(move |value| sum.is_member(value))
}

/// First argument is an instance of the case `key` of `sum`.
pub fn is_case(sum: &TaggedSum, key: &str) -> Predicate {
    let sum = sum.clone();
    let key = key.to_string();
    first(move |value| sum.is_case(value, &key))
}
