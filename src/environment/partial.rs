//! Partial functions: a single predicate-dispatched slot.

use std::sync::Arc;

use super::registry::{Binding, Overload};
use super::{Environment, Predicate};
use crate::error::{Error, Result};
use crate::value::{Function, Value};

const SLOT: &str = "call";

/// A function defined piecewise by predicate/implementation pairs.
///
/// `Partial` is an [`Environment`] restricted to one unnamed method. It
/// resolves calls exactly like an environment method: oldest overload
/// first, first accepting predicate wins.
///
/// # Examples
///
/// ```rust
/// use bilby::{Partial, Value};
/// use bilby::environment::predicate;
///
/// let describe = Partial::new()
///     .method(predicate::is_number(), |_, _| Ok(Value::from("number")))
///     .method(predicate::is_string(), |_, _| Ok(Value::from("string")));
///
/// assert_eq!(describe.call(&[Value::from(1)]).unwrap(), Value::from("number"));
/// assert!(describe.is_defined_at(&[Value::from("x")]));
/// assert!(!describe.is_defined_at(&[Value::from(true)]));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Partial {
    environment: Environment,
}

impl Partial {
    /// Creates a partial function defined nowhere.
    pub const fn new() -> Self {
        Self {
            environment: Environment::new(),
        }
    }

    /// Returns a new partial function with one more overload.
    #[must_use]
    pub fn method<F>(&self, predicate: Predicate, implementation: F) -> Self
    where
        F: Fn(&Environment, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        // The slot is only ever bound as a method, so no conflict check is needed.
        let overload = Overload {
            predicate,
            implementation: Arc::new(implementation),
        };
        let overloads = self.environment.overloads_after(SLOT, overload);
        Self {
            environment: self.environment.push(SLOT, Binding::Method(overloads)),
        }
    }

    /// Invokes the partial function with its own environment as receiver.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotImplemented`] when no overload accepts `arguments`.
    pub fn call(&self, arguments: &[Value]) -> Result<Value> {
        self.apply(&self.environment, arguments)
    }

    /// Invokes the partial function with an explicit receiver.
    ///
    /// Overloads are resolved against this partial function; `receiver` is
    /// what the selected implementation sees as its environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotImplemented`] when no overload accepts `arguments`.
    pub fn apply(&self, receiver: &Environment, arguments: &[Value]) -> Result<Value> {
        let (index, overload) = self
            .environment
            .resolve(SLOT, arguments)
            .ok_or_else(|| Error::NotImplemented {
                name: SLOT.to_string(),
            })?;
        tracing::trace!(overload = index, "dispatched partial function");
        (overload.implementation)(receiver, arguments)
    }

    /// Returns `true` if some overload accepts `arguments`.
    pub fn is_defined_at(&self, arguments: &[Value]) -> bool {
        self.environment.is_defined_at(SLOT, arguments)
    }

    /// Exposes the partial function as a first-class [`Function`].
    pub fn to_function(&self) -> Function {
        let partial = self.clone();
        Function::new("partial", move |arguments| partial.call(arguments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::predicate;
    use rstest::rstest;

    fn half() -> Partial {
        Partial::new().method(
            predicate::first(|value| {
                value
                    .as_number()
                    .is_some_and(|number| number % 2.0 == 0.0)
            }),
            |_, arguments| Ok(Value::from(arguments[0].expect_number()? / 2.0)),
        )
    }

    #[rstest]
    fn test_defined_input() {
        assert_eq!(half().call(&[Value::from(8)]), Ok(Value::from(4)));
    }

    #[rstest]
    fn test_undefined_input_fails() {
        let error = half().call(&[Value::from(3)]).unwrap_err();
        assert_eq!(
            error,
            Error::NotImplemented {
                name: "call".to_string()
            }
        );
    }

    #[rstest]
    fn test_extension_is_persistent() {
        let base = half();
        let total = base.method(predicate::is_number(), |_, _| Ok(Value::Null));
        assert!(!base.is_defined_at(&[Value::from(3)]));
        assert!(total.is_defined_at(&[Value::from(3)]));
    }

    #[rstest]
    fn test_apply_passes_receiver() {
        let receiver = Environment::new().property("scale", 10).unwrap();
        let scaled = Partial::new().method(predicate::is_number(), |environment, arguments| {
            let scale = environment
                .get("scale")
                .map_or(Ok(1.0), Value::expect_number)?;
            Ok(Value::from(arguments[0].expect_number()? * scale))
        });
        assert_eq!(
            scaled.apply(&receiver, &[Value::from(2)]),
            Ok(Value::from(20))
        );
        assert_eq!(scaled.call(&[Value::from(2)]), Ok(Value::from(2)));
    }

    #[rstest]
    fn test_function_form() {
        let function = half().to_function();
        assert_eq!(function.call(&[Value::from(10)]), Ok(Value::from(5)));
    }
}
