//! First-class callables and the classic combinators over them.

use std::fmt;
use std::sync::Arc;

use super::Value;
use crate::error::Result;

type Body = dyn Fn(&[Value]) -> Result<Value> + Send + Sync;

/// A named, shareable callable taking positional [`Value`] arguments.
///
/// Cloning a `Function` shares the underlying closure; two clones compare
/// equal, two separately built functions never do.
///
/// # Examples
///
/// ```rust
/// use bilby::{Function, Value};
///
/// let increment = Function::new("increment", |arguments| {
///     Ok(Value::from(arguments[0].expect_number()? + 1.0))
/// });
/// let double = Function::new("double", |arguments| {
///     Ok(Value::from(arguments[0].expect_number()? * 2.0))
/// });
///
/// let composed = increment.compose(&double);
/// assert_eq!(composed.call(&[Value::from(5)]).unwrap(), Value::from(11));
/// ```
#[derive(Clone)]
pub struct Function {
    name: Arc<str>,
    body: Arc<Body>,
}

impl Function {
    /// Wraps a closure as a named function.
    pub fn new<F>(name: impl Into<Arc<str>>, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            body: Arc::new(body),
        }
    }

    /// Returns the function's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invokes the function with positional arguments.
    ///
    /// # Errors
    ///
    /// Propagates whatever error the wrapped closure returns.
    pub fn call(&self, arguments: &[Value]) -> Result<Value> {
        (self.body)(arguments)
    }

    /// Returns `true` if both handles share the same closure.
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }

    /// Returns its first argument, or `Null` when called without one.
    pub fn identity() -> Self {
        Self::new("identity", |arguments| {
            Ok(arguments.first().cloned().unwrap_or_default())
        })
    }

    /// Ignores its arguments and always returns `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bilby::{Function, Value};
    ///
    /// let always_seven = Function::constant(Value::from(7));
    /// assert_eq!(always_seven.call(&[Value::from("ignored")]).unwrap(), Value::from(7));
    /// ```
    pub fn constant(value: Value) -> Self {
        Self::new("constant", move |_| Ok(value.clone()))
    }

    /// Returns `self ∘ inner`: calls `inner` with all arguments, then `self`
    /// with the single result.
    pub fn compose(&self, inner: &Self) -> Self {
        let outer = self.clone();
        let inner = inner.clone();
        let name = format!("{}.{}", outer.name, inner.name);
        Self::new(name, move |arguments| {
            let intermediate = inner.call(arguments)?;
            outer.call(&[intermediate])
        })
    }

    /// Swaps the first two arguments before calling `self`.
    pub fn flip(&self) -> Self {
        let function = self.clone();
        let name = format!("flip({})", function.name);
        Self::new(name, move |arguments| {
            let mut flipped = arguments.to_vec();
            if flipped.len() >= 2 {
                flipped.swap(0, 1);
            }
            function.call(&flipped)
        })
    }

    /// Returns a function that accumulates arguments across calls until at
    /// least `arity` have been supplied, then calls `self` with all of them.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bilby::{Function, Value};
    ///
    /// let add = Function::new("add", |arguments| {
    ///     Ok(Value::from(arguments[0].expect_number()? + arguments[1].expect_number()?))
    /// });
    /// let curried = add.curry(2);
    ///
    /// let add_one = curried.call(&[Value::from(1)]).unwrap();
    /// let add_one = add_one.as_function().unwrap();
    /// assert_eq!(add_one.call(&[Value::from(2)]).unwrap(), Value::from(3));
    /// ```
    pub fn curry(&self, arity: usize) -> Self {
        curried(self.clone(), arity, Vec::new())
    }
}

fn curried(function: Function, arity: usize, collected: Vec<Value>) -> Function {
    let name = format!("curry({})", function.name);
    Function::new(name, move |arguments| {
        let mut supplied = collected.clone();
        supplied.extend_from_slice(arguments);
        if supplied.len() >= arity {
            function.call(&supplied)
        } else {
            Ok(Value::Function(curried(function.clone(), arity, supplied)))
        }
    })
}

impl fmt::Display for Function {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "<function {}>", self.name)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, formatter)
    }
}
